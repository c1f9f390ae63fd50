//! Error types for punctum-region

use thiserror::Error;

/// Errors that can occur during region processing operations
#[derive(Debug, Error)]
pub enum RegionError {
    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] punctum_core::Error),

    /// Label volume and image disagree in shape
    #[error("label volume shape {labels:?} doesn't match image shape {image:?}")]
    ShapeMismatch {
        labels: (usize, usize, usize),
        image: (usize, usize, usize),
    },

    /// Object label absent from the label volume
    #[error("label {0} not present in label volume")]
    MissingLabel(u32),

    /// Invalid parameters
    #[error("invalid parameters: {0}")]
    InvalidParameters(String),
}

/// Result type for region operations
pub type RegionResult<T> = Result<T, RegionError>;
