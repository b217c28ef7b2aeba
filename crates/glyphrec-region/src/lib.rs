//! glyphrec-region - Region analysis
//!
//! This crate provides the region operations used to find and compare
//! glyph shapes:
//!
//! - Border following ([`find_contours`]) with outer/hole classification
//! - Solid filling of traced borders
//! - Polygon moments, Hu invariants and shape matching

pub mod ccbord;
mod error;
pub mod moments;
pub mod seedfill;

pub use ccbord::{Border, BorderPoint, BorderType, ContourMode, Direction, find_contours};
pub use error::{RegionError, RegionResult};
pub use moments::{Moments, ShapeMatchMethod, match_hu, match_shapes};
pub use seedfill::fill_border;
