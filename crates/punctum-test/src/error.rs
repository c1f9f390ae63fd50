//! Error types for the test framework

use thiserror::Error;

/// Errors that can occur while building test fixtures
#[derive(Debug, Error)]
pub enum TestError {
    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] punctum_core::Error),

    /// Fixture does not fit in the requested volume
    #[error("fixture '{name}' does not fit in volume of shape {shape:?}")]
    FixtureOutOfBounds {
        name: String,
        shape: (usize, usize, usize),
    },
}

/// Result type for test operations
pub type TestResult<T> = Result<T, TestError>;
