//! Error types for punctum-features

use thiserror::Error;

/// Errors that can occur during feature extraction
///
/// Objects without spots and degenerate statistics are not errors: the
/// former are skipped and the latter yield NaN.
#[derive(Debug, Error)]
pub enum FeatureError {
    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] punctum_core::Error),

    /// Region processing error
    #[error("region error: {0}")]
    Region(#[from] punctum_region::RegionError),

    /// Spot geometry error
    #[error("morph error: {0}")]
    Morph(#[from] punctum_morph::MorphError),

    /// Filtering error
    #[error("filter error: {0}")]
    Filter(#[from] punctum_filter::FilterError),

    /// Spot radii must be finite and strictly positive
    #[error("invalid spot radii: ({z}, {y}, {x})")]
    InvalidRadii { z: f64, y: f64, x: f64 },

    /// An image channel doesn't match the label volume
    #[error("{channel} image shape {actual:?} doesn't match label volume shape {expected:?}")]
    ShapeMismatch {
        channel: &'static str,
        expected: (usize, usize, usize),
        actual: (usize, usize, usize),
    },
}

/// Result type for feature extraction
pub type FeatureResult<T> = Result<T, FeatureError>;
