//! Error types for punctum-stats

use thiserror::Error;

/// Errors that can occur when resolving statistics
///
/// Computations themselves never fail: degenerate samples yield NaN.
#[derive(Debug, Error)]
pub enum StatsError {
    /// Unknown distribution metric name
    #[error("unknown distribution metric: {0}")]
    UnknownMetric(String),

    /// Unknown effect size name
    #[error("unknown effect size: {0}")]
    UnknownEffectSize(String),
}

/// Result type for statistics lookups
pub type StatsResult<T> = Result<T, StatsError>;
