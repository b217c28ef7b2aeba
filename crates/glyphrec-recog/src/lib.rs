//! glyphrec-recog - Glyph segmentation, training and recognition
//!
//! This crate provides the character recognition pipeline:
//!
//! - **Binarization**: Clean ink mask from a scanned page
//! - **Border cleanup**: Erase shapes near the page edges
//! - **Segmentation**: One normalized sample per connected shape
//! - **Training**: Interactive labeling into a knowledge base, with
//!   automatic labeling of repeated shapes
//! - **Recognition**: Nearest-neighbor classification of every glyph
//! - **Accuracy**: Comparison of recognized counts with ground truth
//!
//! # Quick Start
//!
//! ```no_run
//! use glyphrec_recog::{KnowledgeBase, RecognizeOptions, Recognizer, count_by_label};
//!
//! let kb = KnowledgeBase::load_dir("data/ocr").unwrap();
//! let recognizer = Recognizer::from_knowledge_base(&kb, RecognizeOptions::default()).unwrap();
//!
//! let page = glyphrec_io::read_image("page.jpg").unwrap();
//! let result = recognizer.recognize(&page).unwrap();
//! for (c, n) in count_by_label(&result.text).iter() {
//!     println!("{}={}", c, n);
//! }
//! ```
//!
//! # Modules
//!
//! - [`backend`]: Image-processing capabilities used by the pipeline
//! - [`binarize`]: Page binarization
//! - [`border`]: Border shape removal
//! - [`segment`]: Glyph segmentation and normalized samples
//! - [`dedup`]: Repeated-shape detection during training
//! - [`kb`]: Knowledge base and its file format
//! - [`classify`]: Nearest-neighbor classification
//! - [`recognize`]: Page recognition and label histograms
//! - [`accuracy`]: Accuracy against ground truth
//! - [`train`]: Interactive training sessions

pub mod accuracy;
pub mod backend;
pub mod binarize;
pub mod border;
pub mod charset;
pub mod classify;
pub mod dedup;
mod error;
pub mod kb;
pub mod recognize;
pub mod segment;
pub mod train;

pub use error::{RecogError, RecogResult};

// Re-export commonly used types
pub use accuracy::{AccuracyReport, CharAccuracy, GroundTruth, evaluate, evaluate_for_image};
pub use backend::{NativeBackend, VisionBackend};
pub use binarize::{BinarizeOptions, binarize};
pub use border::{BorderOptions, clear_border_shapes};
pub use charset::{VALID_CHARACTERS, is_valid_class};
pub use classify::{BruteForceKnn, Classifier, NearestNeighbor};
pub use dedup::{Advice, DedupAdvisor, DedupOptions};
pub use glyphrec_region::ShapeMatchMethod;
pub use kb::KnowledgeBase;
pub use recognize::{Histogram, RecognizeOptions, Recognition, Recognizer, count_by_label};
pub use segment::{Glyph, NormalizedSample, SegmentOptions, SegmentOrder, Shape, segment};
pub use train::{
    KeyPress, LabelRequest, LabelSource, TrainOptions, TrainingOutcome, TrainingSession, train,
};

// Re-export core for convenience
pub use glyphrec_core;
