//! Interactive training
//!
//! Every glyph of every training image is shown to an operator, who types
//! the character it represents. Runs of near-identical shapes are labeled
//! automatically (see [`DedupAdvisor`]). Pressing escape cancels the whole
//! session; nothing is written in that case.

use crate::backend::{NativeBackend, VisionBackend};
use crate::binarize::{BinarizeOptions, binarize_with};
use crate::border::{BorderOptions, clear_border_shapes_with};
use crate::charset::is_valid_class;
use crate::dedup::{Advice, DedupAdvisor, DedupOptions};
use crate::kb::KnowledgeBase;
use crate::segment::{NormalizedSample, SegmentOptions, segment_with};
use crate::{RecogError, RecogResult};
use glyphrec_core::{Box, Pix};
use glyphrec_io::{list_images, read_image};
use std::path::Path;

/// Operator response to a labeling prompt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyPress {
    /// A character key
    Char(char),
    /// Cancel training
    Escape,
}

/// What the operator is asked to label
#[derive(Debug, Clone, Copy)]
pub struct LabelRequest<'a> {
    /// Image the glyph comes from
    pub image: &'a Path,
    /// Position of the glyph within its image
    pub index: usize,
    /// Bounding box of the glyph in the image
    pub bbox: Box,
    /// The normalized sample that will be stored
    pub sample: &'a NormalizedSample,
}

/// Source of operator labels
pub trait LabelSource {
    /// Ask for the label of one glyph.
    fn label(&mut self, request: &LabelRequest<'_>) -> RecogResult<KeyPress>;
}

/// Training settings
#[derive(Debug, Clone, PartialEq)]
pub struct TrainOptions {
    /// Image file extensions to use, case-insensitive (default: `["jpg"]`)
    pub extensions: Vec<String>,
    pub binarize: BinarizeOptions,
    pub border: BorderOptions,
    pub segment: SegmentOptions,
    pub dedup: DedupOptions,
}

impl Default for TrainOptions {
    fn default() -> Self {
        Self {
            extensions: vec!["jpg".to_string()],
            binarize: BinarizeOptions::default(),
            border: BorderOptions::default(),
            segment: SegmentOptions::default(),
            dedup: DedupOptions::default(),
        }
    }
}

impl TrainOptions {
    /// Set the image file extensions
    pub fn with_extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.extensions = extensions.into_iter().map(Into::into).collect();
        self
    }

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

    /// Set the shape comparison settings
    pub fn with_dedup(mut self, dedup: DedupOptions) -> Self {
        self.dedup = dedup;
        self
    }
}

/// How a training run ended
#[derive(Debug, Clone)]
pub enum TrainingOutcome {
    /// Every image was processed
    Completed(KnowledgeBase),
    /// The operator pressed escape; `accepted` samples were discarded
    Cancelled { accepted: usize },
}

/// Whether to keep going after a page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageOutcome {
    Continue,
    Cancelled,
}

/// Counters of one session
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TrainingStats {
    /// Images processed
    pub images: usize,
    /// Glyphs segmented
    pub glyphs: usize,
    /// Glyphs the operator was asked about
    pub prompts: usize,
    /// Glyphs labeled from the previous shape
    pub reused: usize,
    /// Samples added to the knowledge base
    pub stored: usize,
    /// Glyphs labeled with a character outside the class set
    pub skipped: usize,
}

/// A training session: the knowledge base under construction and the
/// deduplication state, shared by all images of one run
pub struct TrainingSession<B = NativeBackend> {
    backend: B,
    options: TrainOptions,
    advisor: DedupAdvisor,
    kb: KnowledgeBase,
    stats: TrainingStats,
}

impl TrainingSession<NativeBackend> {
    /// Create a session using the native backend.
    pub fn new(options: TrainOptions) -> Self {
        Self::with_backend(NativeBackend, options)
    }
}

impl<B: VisionBackend> TrainingSession<B> {
    /// Create a session with an explicit backend.
    pub fn with_backend(backend: B, options: TrainOptions) -> Self {
        let kb = KnowledgeBase::with_sample_size(
            options.segment.sample_width,
            options.segment.sample_height,
        );
        Self {
            backend,
            advisor: DedupAdvisor::new(options.dedup),
            options,
            kb,
            stats: TrainingStats::default(),
        }
    }

    /// Label every glyph of one page.
    ///
    /// # Arguments
    /// * `pix` - 8 or 32 bpp page
    /// * `image` - Name of the page, passed on to the label source
    /// * `source` - Operator
    pub fn train_page<L: LabelSource + ?Sized>(
        &mut self,
        pix: &Pix,
        image: &Path,
        source: &mut L,
    ) -> RecogResult<PageOutcome> {
        let mut mask = binarize_with(&self.backend, pix, &self.options.binarize)?;
        if self.options.border.enabled {
            mask = clear_border_shapes_with(&self.backend, &mask, self.options.border.radius)?;
        }
        let glyphs = segment_with(&self.backend, &mask, &self.options.segment)?;
        self.stats.images += 1;
        self.stats.glyphs += glyphs.len();

        for (index, glyph) in glyphs.into_iter().enumerate() {
            let label = match self.advisor.advise_with(&self.backend, &glyph.shape) {
                Advice::Reuse(label) => {
                    self.stats.reused += 1;
                    label
                }
                Advice::Prompt => {
                    self.stats.prompts += 1;
                    let request = LabelRequest {
                        image,
                        index,
                        bbox: glyph.shape.bounding_box(),
                        sample: &glyph.sample,
                    };
                    match source.label(&request)? {
                        KeyPress::Escape => {
                            tracing::info!(accepted = self.kb.len(), "training cancelled");
                            return Ok(PageOutcome::Cancelled);
                        }
                        KeyPress::Char(label) => {
                            self.advisor.record_label(label);
                            label
                        }
                    }
                }
            };

            if is_valid_class(label) {
                self.kb.append(label, glyph.sample)?;
                self.stats.stored += 1;
            } else {
                tracing::debug!(?label, index, "not a character class, skipping glyph");
                self.stats.skipped += 1;
            }
        }
        Ok(PageOutcome::Continue)
    }

    /// Label every image in `dir` whose extension is in the options.
    ///
    /// Images are visited in path order.
    ///
    /// # Errors
    /// - [`RecogError::MissingDirectory`] if `dir` does not exist
    /// - [`RecogError::NoImages`] if no file matches the extensions
    pub fn run<P: AsRef<Path>, L: LabelSource + ?Sized>(
        mut self,
        dir: P,
        source: &mut L,
    ) -> RecogResult<TrainingOutcome> {
        let dir = dir.as_ref();
        if !dir.is_dir() {
            return Err(RecogError::MissingDirectory(dir.to_path_buf()));
        }
        let images = list_images(dir, &self.options.extensions)?;
        if images.is_empty() {
            return Err(RecogError::NoImages {
                dir: dir.to_path_buf(),
                extensions: self.options.extensions.clone(),
            });
        }

        for path in &images {
            tracing::info!(image = %path.display(), "extracting characters");
            let pix = read_image(path)?;
            if self.train_page(&pix, path, source)? == PageOutcome::Cancelled {
                return Ok(TrainingOutcome::Cancelled {
                    accepted: self.kb.len(),
                });
            }
        }

        let stats = self.stats;
        tracing::info!(
            images = stats.images,
            glyphs = stats.glyphs,
            prompts = stats.prompts,
            prompts_saved = stats.reused,
            stored = stats.stored,
            "training complete"
        );
        Ok(TrainingOutcome::Completed(self.kb))
    }

    /// Counters so far
    pub fn stats(&self) -> TrainingStats {
        self.stats
    }

    /// The knowledge base built so far
    pub fn knowledge_base(&self) -> &KnowledgeBase {
        &self.kb
    }

    /// End the session and take the knowledge base
    pub fn into_knowledge_base(self) -> KnowledgeBase {
        self.kb
    }
}

/// Train on `images_dir` and, unless cancelled, save the knowledge base
/// into `output_dir`.
///
/// The output directory is checked before any prompt so the operator does
/// not label a whole set only to lose it.
pub fn train<P, Q, L>(
    images_dir: P,
    output_dir: Q,
    options: TrainOptions,
    source: &mut L,
) -> RecogResult<TrainingOutcome>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
    L: LabelSource + ?Sized,
{
    let output_dir = output_dir.as_ref();
    if !output_dir.is_dir() {
        return Err(RecogError::MissingDirectory(output_dir.to_path_buf()));
    }
    let outcome = TrainingSession::new(options).run(images_dir, source)?;
    if let TrainingOutcome::Completed(kb) = &outcome {
        kb.persist(output_dir)?;
    }
    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use glyphrec_core::PixelDepth;
    use glyphrec_morph::Sel;
    use glyphrec_region::{Border, BorderPoint, ContourMode, ShapeMatchMethod};
    use std::collections::VecDeque;

    /// Thresholds at mid-gray and skips smoothing and morphology, so the
    /// page pixels map one-to-one onto the mask.
    struct PlainBackend;

    impl VisionBackend for PlainBackend {
        fn smooth(&self, gray: &Pix, _: u32, _: f32, _: f32) -> RecogResult<Pix> {
            Ok(gray.clone())
        }

        fn adaptive_threshold(&self, gray: &Pix, _: u32, _: f32) -> RecogResult<Pix> {
            let data = gray.data().iter().map(|&v| u32::from(v < 128)).collect();
            Ok(Pix::from_raw(gray.width(), gray.height(), PixelDepth::Bit1, data)?)
        }

        fn morph_open(&self, mask: &Pix, _: &Sel) -> RecogResult<Pix> {
            Ok(mask.clone())
        }

        fn morph_close(&self, mask: &Pix, _: &Sel) -> RecogResult<Pix> {
            Ok(mask.clone())
        }

        fn find_contours(&self, mask: &Pix, mode: ContourMode) -> RecogResult<Vec<Border>> {
            NativeBackend.find_contours(mask, mode)
        }

        fn shape_distance(&self, a: &[BorderPoint], b: &[BorderPoint], m: ShapeMatchMethod) -> f64 {
            NativeBackend.shape_distance(a, b, m)
        }
    }

    struct Scripted {
        keys: VecDeque<KeyPress>,
        asked: usize,
    }

    impl Scripted {
        fn new(keys: &[KeyPress]) -> Self {
            Self {
                keys: keys.iter().copied().collect(),
                asked: 0,
            }
        }
    }

    impl LabelSource for Scripted {
        fn label(&mut self, _: &LabelRequest<'_>) -> RecogResult<KeyPress> {
            self.asked += 1;
            Ok(self.keys.pop_front().unwrap_or(KeyPress::Escape))
        }
    }

    /// White page with dark blocks at the given (x, y, w, h)
    fn page(blocks: &[(u32, u32, u32, u32)]) -> Pix {
        let (w, h) = (80u32, 30u32);
        let data = (0..w * h)
            .map(|i| {
                let (x, y) = (i % w, i / w);
                let ink = blocks
                    .iter()
                    .any(|&(bx, by, bw, bh)| x >= bx && x < bx + bw && y >= by && y < by + bh);
                if ink { 0 } else { 255 }
            })
            .collect();
        Pix::from_raw(w, h, PixelDepth::Bit8, data).unwrap()
    }

    fn options() -> TrainOptions {
        TrainOptions::default().with_border(BorderOptions::default().with_enabled(false))
    }

    #[test]
    fn test_repeated_shapes_prompt_once() {
        let pix = page(&[(2, 5, 6, 6), (20, 5, 8, 8), (40, 5, 3, 15)]);
        let mut session = TrainingSession::with_backend(PlainBackend, options());
        let mut source = Scripted::new(&[KeyPress::Char('o'), KeyPress::Char('l')]);

        let outcome = session.train_page(&pix, Path::new("p.png"), &mut source).unwrap();
        assert_eq!(outcome, PageOutcome::Continue);
        assert_eq!(source.asked, 2);
        assert_eq!(session.knowledge_base().labels(), &['o', 'o', 'l']);
        let stats = session.stats();
        assert_eq!((stats.prompts, stats.reused, stats.stored), (2, 1, 3));
    }

    #[test]
    fn test_invalid_key_skips_and_is_reused() {
        let pix = page(&[(2, 5, 6, 6), (20, 5, 6, 6)]);
        let mut session = TrainingSession::with_backend(PlainBackend, options());
        let mut source = Scripted::new(&[KeyPress::Char(' ')]);

        session.train_page(&pix, Path::new("p.png"), &mut source).unwrap();
        assert_eq!(source.asked, 1);
        assert!(session.knowledge_base().is_empty());
        assert_eq!(session.stats().skipped, 2);
    }

    #[test]
    fn test_escape_cancels() {
        let pix = page(&[(2, 5, 6, 6), (40, 5, 3, 15)]);
        let mut session = TrainingSession::with_backend(PlainBackend, options());
        let mut source = Scripted::new(&[KeyPress::Char('o'), KeyPress::Escape]);

        let outcome = session.train_page(&pix, Path::new("p.png"), &mut source).unwrap();
        assert_eq!(outcome, PageOutcome::Cancelled);
        assert_eq!(session.knowledge_base().len(), 1);
    }

    #[test]
    fn test_reference_carries_across_pages() {
        let mut session = TrainingSession::with_backend(PlainBackend, options());
        let mut source = Scripted::new(&[KeyPress::Char('o')]);
        session
            .train_page(&page(&[(2, 5, 6, 6)]), Path::new("a.png"), &mut source)
            .unwrap();
        session
            .train_page(&page(&[(30, 10, 7, 7)]), Path::new("b.png"), &mut source)
            .unwrap();
        assert_eq!(source.asked, 1);
        assert_eq!(session.knowledge_base().labels(), &['o', 'o']);
    }

    #[test]
    fn test_run_requires_images() {
        let dir = tempfile::tempdir().unwrap();
        let session = TrainingSession::new(TrainOptions::default());
        let mut source = Scripted::new(&[]);
        let err = session.run(dir.path(), &mut source).unwrap_err();
        assert!(matches!(err, RecogError::NoImages { .. }));

        let session = TrainingSession::new(TrainOptions::default());
        let err = session
            .run(dir.path().join("missing"), &mut source)
            .unwrap_err();
        assert!(matches!(err, RecogError::MissingDirectory(_)));
    }

    #[test]
    fn test_train_requires_output_dir() {
        let dir = tempfile::tempdir().unwrap();
        let mut source = Scripted::new(&[]);
        let err = train(
            dir.path(),
            dir.path().join("missing"),
            TrainOptions::default(),
            &mut source,
        )
        .unwrap_err();
        assert!(matches!(err, RecogError::MissingDirectory(_)));
    }
}
