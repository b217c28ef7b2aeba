//! glyphrec-filter - Image filtering operations
//!
//! This crate provides the filters used to binarize scanned pages:
//!
//! - Gaussian kernels ([`Kernel`])
//! - Bilateral filtering (edge-preserving smoothing)
//! - Adaptive thresholding against a Gaussian or box local mean

pub mod adaptive;
pub mod bilateral;
mod error;
pub mod kernel;

pub use error::{FilterError, FilterResult};
pub use kernel::Kernel;

pub use adaptive::{AdaptiveMethod, ThresholdType, adaptive_threshold, local_mean};
pub use bilateral::{bilateral_gray, make_range_kernel};
