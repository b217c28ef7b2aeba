//! Labeling shortcut for runs of identical glyphs
//!
//! Training pages usually contain the same character many times in a row.
//! The advisor remembers the previous shape only (a sliding window of one)
//! and, when the next shape has nearly the same Hu moments, suggests the
//! label the operator gave last instead of prompting again.

use crate::backend::{NativeBackend, VisionBackend};
use crate::segment::Shape;
use glyphrec_region::{BorderPoint, ShapeMatchMethod};

/// Shape comparison settings
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DedupOptions {
    /// Maximum shape distance still treated as "same glyph" (default: 0.25)
    pub threshold: f64,
    /// Hu-moment comparison formula (default: I1)
    pub method: ShapeMatchMethod,
}

impl Default for DedupOptions {
    fn default() -> Self {
        Self {
            threshold: 0.25,
            method: ShapeMatchMethod::I1,
        }
    }
}

impl DedupOptions {
    /// Set the distance threshold
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    /// Set the comparison formula
    pub fn with_method(mut self, method: ShapeMatchMethod) -> Self {
        self.method = method;
        self
    }
}

/// What to do with a newly segmented shape
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advice {
    /// Same shape as the previous one; apply this label without asking
    Reuse(char),
    /// Ask the operator
    Prompt,
}

/// Session-scoped reference shape and last applied label
#[derive(Debug, Clone, Default)]
pub struct DedupAdvisor {
    options: DedupOptions,
    reference: Option<Vec<BorderPoint>>,
    last_label: Option<char>,
}

impl DedupAdvisor {
    /// Create an advisor with no reference shape
    pub fn new(options: DedupOptions) -> Self {
        Self {
            options,
            reference: None,
            last_label: None,
        }
    }

    /// Advise on `shape` using the native backend.
    pub fn advise(&mut self, shape: &Shape) -> Advice {
        self.advise_with(&NativeBackend, shape)
    }

    /// Advise on `shape`, which then becomes the reference for the next
    /// call.
    ///
    /// The first shape of a session always prompts. Later shapes reuse the
    /// last applied label when their distance to the reference is at most
    /// the threshold and a label has been applied.
    pub fn advise_with<B: VisionBackend + ?Sized>(&mut self, backend: &B, shape: &Shape) -> Advice {
        let points = shape.points().to_vec();
        let Some(reference) = self.reference.replace(points) else {
            tracing::debug!("first shape of session, prompting");
            return Advice::Prompt;
        };

        let distance = backend.shape_distance(&reference, shape.points(), self.options.method);
        match self.last_label {
            Some(label) if distance <= self.options.threshold => {
                tracing::debug!(distance, %label, "shape matches previous, reusing label");
                Advice::Reuse(label)
            }
            _ => {
                tracing::debug!(distance, "shape differs from previous, prompting");
                Advice::Prompt
            }
        }
    }

    /// Record the label the operator chose after a [`Advice::Prompt`].
    pub fn record_label(&mut self, label: char) {
        self.last_label = Some(label);
    }

    /// The last applied label, if any
    pub fn last_label(&self) -> Option<char> {
        self.last_label
    }

    /// Whether a reference shape is held
    pub fn has_reference(&self) -> bool {
        self.reference.is_some()
    }

    /// Current settings
    pub fn options(&self) -> &DedupOptions {
        &self.options
    }
}
