//! Error types for punctum-morph

use thiserror::Error;

/// Errors that can occur while building or placing masks
#[derive(Debug, Error)]
pub enum MorphError {
    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] punctum_core::Error),

    /// Spot radii must be finite and strictly positive
    #[error("invalid spot radii: ({z}, {y}, {x})")]
    InvalidRadii { z: f64, y: f64, x: f64 },

    /// Invalid parameters
    #[error("invalid parameters: {0}")]
    InvalidParameters(String),
}

/// Result type for mask operations
pub type MorphResult<T> = Result<T, MorphError>;
