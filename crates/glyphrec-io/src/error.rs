//! I/O error types
//!
//! Provides a unified error type for image decoding, image encoding,
//! directory scanning and numeric table files, so callers only need to
//! handle one error type.

use std::path::PathBuf;
use thiserror::Error;

/// Error type for glyphrec I/O operations.
#[derive(Error, Debug)]
pub enum IoError {
    /// Standard I/O error (file not found, permission denied, etc.)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The image could not be decoded or encoded
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    /// The image data is structurally invalid
    #[error("invalid image data: {0}")]
    InvalidData(String),

    /// The directory to scan does not exist
    #[error("directory not found: {}", .0.display())]
    DirectoryNotFound(PathBuf),

    /// A numeric table line could not be parsed
    #[error("table parse error at line {line}: {message}")]
    TableParse { line: usize, message: String },

    /// An error from the core library (e.g. pixel depth mismatch)
    #[error("core error: {0}")]
    Core(#[from] glyphrec_core::Error),
}

/// Result type for I/O operations
pub type IoResult<T> = Result<T, IoError>;
