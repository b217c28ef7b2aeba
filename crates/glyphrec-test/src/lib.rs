//! glyphrec-test - Regression test helpers for glyphrec
//!
//! Provides [`RegParams`], a small bookkeeping object for regression
//! tests, and image fixtures built from ASCII art so tests never depend on
//! image files on disk.
//!
//! # Usage
//!
//! ```ignore
//! use glyphrec_test::RegParams;
//!
//! let mut rp = RegParams::new("segment");
//! rp.compare_values(3.0, glyphs.len() as f64, 0.0);
//! assert!(rp.cleanup());
//! ```
//!
//! # Environment Variables
//!
//! - `REGTEST_MODE`: Set to "display" to write intermediate images to
//!   `tests/regout` for visual inspection

mod error;
pub mod fixtures;
mod params;

pub use error::{TestError, TestResult};
pub use params::{RegParams, RegTestMode};

/// Get the path to the workspace root
fn workspace_root() -> String {
    let manifest_dir = env!("CARGO_MANIFEST_DIR");
    // glyphrec-test is at crates/glyphrec-test, so go up two directories
    format!("{}/../..", manifest_dir)
}

/// Get the path to the regout (regression output) directory
pub fn regout_dir() -> String {
    format!("{}/tests/regout", workspace_root())
}
