//! glyphrec-morph - Binary morphology
//!
//! - [`Sel`]: structuring elements (bricks, lines, crosses)
//! - Erosion, dilation, opening and closing of 1 bpp masks, with
//!   separable fast paths for bricks

pub mod binary;
mod error;
pub mod sel;

pub use binary::{
    close, close_brick, dilate, dilate_brick, erode, erode_brick, open, open_brick,
};
pub use error::{MorphError, MorphResult};
pub use sel::Sel;
