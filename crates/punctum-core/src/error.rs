//! Error types for punctum-core
//!
//! Provides a unified error type for all operations in the core crate.
//! Each variant captures enough context for diagnostics without exposing
//! internal implementation details.

use thiserror::Error;

/// punctum-core error type
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid volume dimensions
    #[error("invalid volume dimensions: {depth}x{height}x{width}")]
    InvalidDimension {
        depth: usize,
        height: usize,
        width: usize,
    },

    /// Coordinate outside the volume
    #[error("coordinate ({z}, {y}, {x}) outside volume of shape {shape:?}")]
    OutOfBounds {
        z: usize,
        y: usize,
        x: usize,
        shape: (usize, usize, usize),
    },

    /// Volume shape mismatch
    #[error("shape mismatch: expected {expected:?}, got {actual:?}")]
    ShapeMismatch {
        expected: (usize, usize, usize),
        actual: (usize, usize, usize),
    },

    /// Data length doesn't match the requested shape
    #[error("data length {len} doesn't match shape {shape:?}")]
    DataLength {
        len: usize,
        shape: (usize, usize, usize),
    },

    /// Bounds not contained in the volume
    #[error("bounds {start:?}..{stop:?} not inside volume of shape {shape:?}")]
    InvalidBounds {
        start: (usize, usize, usize),
        stop: (usize, usize, usize),
        shape: (usize, usize, usize),
    },

    /// Invalid parameter value
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
}

/// Result type alias for punctum-core operations
pub type Result<T> = std::result::Result<T, Error>;
