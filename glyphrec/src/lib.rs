//! glyphrec - Character recognition for scanned images
//!
//! # Overview
//!
//! glyphrec builds a character recognizer from scanned pages:
//!
//! - Image I/O and numeric table files
//! - Binarization (bilateral smoothing, adaptive threshold, morphology)
//! - Contour tracing and Hu-moment shape comparison
//! - Glyph segmentation into fixed-size samples
//! - Interactive labeling into a knowledge base
//! - Nearest-neighbor recognition and accuracy scoring
//!
//! # Example
//!
//! ```
//! use glyphrec::{Pix, PixelDepth};
//! use glyphrec::recog::{SegmentOptions, segment};
//!
//! // An empty mask has no glyphs
//! let mask = Pix::new(64, 32, PixelDepth::Bit1).unwrap();
//! let glyphs = segment(&mask, &SegmentOptions::default()).unwrap();
//! assert!(glyphs.is_empty());
//! ```

// Re-export core types (primary data structures used everywhere)
pub use glyphrec_core::*;

// Re-export domain crates as modules to avoid name conflicts
pub use glyphrec_filter as filter;
pub use glyphrec_io as io;
pub use glyphrec_morph as morph;
pub use glyphrec_recog as recog;
pub use glyphrec_region as region;
pub use glyphrec_transform as transform;
