//! glyphrec-transform - Resampling
//!
//! Scales glyph crops to the fixed sample grid used for classification.

mod error;
pub mod scale;

pub use error::{TransformError, TransformResult};
pub use scale::scale_to_size;
