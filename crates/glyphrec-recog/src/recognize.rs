//! Recognition of a page with a trained classifier
//!
//! A page is binarized, optionally cleared of border shapes and
//! segmented; every glyph is classified and outlined on a color copy of
//! the page. Labels are concatenated in glyph order.

use crate::backend::{NativeBackend, VisionBackend};
use crate::binarize::{BinarizeOptions, binarize_with};
use crate::border::{BorderOptions, clear_border_shapes_with};
use crate::charset::{CLASS_COUNT, class_index, classes};
use crate::classify::{BruteForceKnn, Classifier, NearestNeighbor};
use crate::kb::KnowledgeBase;
use crate::segment::{SegmentOptions, segment_with};
use crate::RecogResult;
use glyphrec_core::{Box, Color, Pix, convert_to_rgb};

/// Outline color of recognized glyphs
pub const ANNOTATION_COLOR: Color = Color::new(65, 203, 62);

/// Outline width of recognized glyphs
pub const ANNOTATION_WIDTH: u32 = 2;

/// Recognition settings
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecognizeOptions {
    pub binarize: BinarizeOptions,
    pub border: BorderOptions,
    pub segment: SegmentOptions,
}

impl RecognizeOptions {
    /// Set the binarization parameters
    pub fn with_binarize(mut self, binarize: BinarizeOptions) -> Self {
        self.binarize = binarize;
        self
    }

    /// Set the border cleanup settings
    pub fn with_border(mut self, border: BorderOptions) -> Self {
        self.border = border;
        self
    }

    /// Set the segmentation settings
    pub fn with_segment(mut self, segment: SegmentOptions) -> Self {
        self.segment = segment;
        self
    }
}

/// Result of recognizing one page
#[derive(Debug, Clone)]
pub struct Recognition {
    /// Labels of all glyphs in glyph order
    pub text: String,
    /// Bounding boxes of the glyphs, aligned with `text`
    pub boxes: Vec<Box>,
    /// 32 bpp copy of the page with each glyph outlined
    pub annotated: Pix,
}

impl Recognition {
    /// Per-class counts of the recognized text
    pub fn histogram(&self) -> Histogram {
        count_by_label(&self.text)
    }
}

/// Page recognizer
#[derive(Debug, Clone)]
pub struct Recognizer<B = NativeBackend, K = BruteForceKnn> {
    backend: B,
    classifier: Classifier<K>,
    options: RecognizeOptions,
}

impl Recognizer<NativeBackend, BruteForceKnn> {
    /// Create a recognizer using the native backend.
    pub fn new(classifier: Classifier, options: RecognizeOptions) -> Self {
        Self::with_backend(NativeBackend, classifier, options)
    }

    /// Train a classifier on `kb` and wrap it.
    pub fn from_knowledge_base(kb: &KnowledgeBase, options: RecognizeOptions) -> RecogResult<Self> {
        Ok(Self::new(Classifier::train(kb)?, options))
    }
}

impl<B: VisionBackend, K: NearestNeighbor> Recognizer<B, K> {
    /// Create a recognizer with an explicit backend.
    pub fn with_backend(backend: B, classifier: Classifier<K>, options: RecognizeOptions) -> Self {
        Self {
            backend,
            classifier,
            options,
        }
    }

    /// Recognize every glyph on `pix` (8 or 32 bpp).
    ///
    /// # Errors
    /// Returns an error if the page cannot be binarized or a sample does
    /// not match the classifier's sample size.
    pub fn recognize(&self, pix: &Pix) -> RecogResult<Recognition> {
        let mut mask = binarize_with(&self.backend, pix, &self.options.binarize)?;
        if self.options.border.enabled {
            mask = clear_border_shapes_with(&self.backend, &mask, self.options.border.radius)?;
        }
        let glyphs = segment_with(&self.backend, &mask, &self.options.segment)?;

        let mut annotated = convert_to_rgb(pix)?.to_mut();
        let mut text = String::with_capacity(glyphs.len());
        let mut boxes = Vec::with_capacity(glyphs.len());
        for glyph in &glyphs {
            let label = self.classifier.classify(&glyph.sample)?;
            let bbox = glyph.shape.bounding_box();
            annotated.render_box_color(&bbox, ANNOTATION_WIDTH, ANNOTATION_COLOR)?;
            text.push(label);
            boxes.push(bbox);
        }

        tracing::info!(glyphs = boxes.len(), "recognized page");
        Ok(Recognition {
            text,
            boxes,
            annotated: annotated.into(),
        })
    }

    /// The trained classifier
    pub fn classifier(&self) -> &Classifier<K> {
        &self.classifier
    }

    /// Current settings
    pub fn options(&self) -> &RecognizeOptions {
        &self.options
    }
}

/// Count of each valid class, in canonical class order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Histogram {
    counts: [u64; CLASS_COUNT],
}

impl Default for Histogram {
    fn default() -> Self {
        Self {
            counts: [0; CLASS_COUNT],
        }
    }
}

impl Histogram {
    /// Count of `c`; zero for characters outside the class set
    pub fn get(&self, c: char) -> u64 {
        class_index(c).map_or(0, |i| self.counts[i])
    }

    /// Add one occurrence of `c`; returns `false` (and counts nothing)
    /// for characters outside the class set
    pub fn add(&mut self, c: char) -> bool {
        match class_index(c) {
            Some(i) => {
                self.counts[i] += 1;
                true
            }
            None => false,
        }
    }

    /// Sum of all counts
    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }

    /// Every class with its count, in canonical order
    pub fn iter(&self) -> impl Iterator<Item = (char, u64)> + '_ {
        classes().zip(self.counts.iter().copied())
    }
}

/// Count each valid class in `text`; other characters are dropped.
pub fn count_by_label(text: &str) -> Histogram {
    let mut histogram = Histogram::default();
    for c in text.chars() {
        histogram.add(c);
    }
    histogram
}
