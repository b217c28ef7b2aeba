//! Error types for glyphrec-recog

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during training and recognition
#[derive(Debug, Error)]
pub enum RecogError {
    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] glyphrec_core::Error),

    /// Image or table I/O error
    #[error("io error: {0}")]
    Io(#[from] glyphrec_io::IoError),

    /// Filter library error
    #[error("filter error: {0}")]
    Filter(#[from] glyphrec_filter::FilterError),

    /// Morphology library error
    #[error("morphology error: {0}")]
    Morph(#[from] glyphrec_morph::MorphError),

    /// Transform library error
    #[error("transform error: {0}")]
    Transform(#[from] glyphrec_transform::TransformError),

    /// Region library error
    #[error("region error: {0}")]
    Region(#[from] glyphrec_region::RegionError),

    /// Unsupported pixel depth for this operation
    #[error("unsupported depth: expected {expected}, got {actual}")]
    UnsupportedDepth { expected: &'static str, actual: u32 },

    /// Invalid parameter provided
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// A classifier cannot be trained without samples
    #[error("knowledge base is empty")]
    EmptyKnowledgeBase,

    /// Knowledge-base files are inconsistent or unreadable
    #[error("corrupt knowledge base: {0}")]
    CorruptKnowledgeBase(String),

    /// A required input file does not exist
    #[error("file not found: {}", .0.display())]
    MissingFile(PathBuf),

    /// A required directory does not exist
    #[error("directory not found: {}", .0.display())]
    MissingDirectory(PathBuf),

    /// No image in the training directory matched the extensions
    #[error("no images with extension {extensions:?} in {}", .dir.display())]
    NoImages {
        dir: PathBuf,
        extensions: Vec<String>,
    },

    /// The ground-truth file parsed but does not describe character counts
    #[error("malformed ground truth: {0}")]
    MalformedGroundTruth(String),

    /// JSON decoding error
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// Filesystem error outside image and table I/O
    #[error("filesystem error: {0}")]
    Fs(#[from] std::io::Error),
}

/// Result type for recognition operations
pub type RecogResult<T> = Result<T, RecogError>;
