//! Channel preprocessing
//!
//! Optional hot-pixel removal followed by an optional isotropic Gaussian
//! blur, the same treatment applied to the raw channel before spots are
//! measured.

use punctum_core::Image;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::convolve::gaussian_filter_impl;
use crate::rank::remove_hot_pixels_impl;
use crate::{FilterError, FilterResult};

/// Preprocessing options
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PreprocessOptions {
    /// Apply a per-plane 3x3 grayscale opening first
    pub remove_hot_pixels: bool,
    /// Gaussian sigma applied on every axis; 0 disables the blur
    pub gaussian_sigma: f64,
    /// Run filter passes plane-parallel on the rayon pool
    pub use_accelerated_backend: bool,
}

impl Default for PreprocessOptions {
    fn default() -> Self {
        Self {
            remove_hot_pixels: false,
            gaussian_sigma: 0.0,
            use_accelerated_backend: false,
        }
    }
}

impl PreprocessOptions {
    /// Set hot-pixel removal
    pub fn with_remove_hot_pixels(mut self, enable: bool) -> Self {
        self.remove_hot_pixels = enable;
        self
    }

    /// Set the Gaussian sigma
    pub fn with_gaussian_sigma(mut self, sigma: f64) -> Self {
        self.gaussian_sigma = sigma;
        self
    }

    /// Set plane-parallel filtering
    pub fn with_accelerated_backend(mut self, enable: bool) -> Self {
        self.use_accelerated_backend = enable;
        self
    }

    /// Check the options
    ///
    /// # Errors
    ///
    /// Returns `FilterError::InvalidParameters` if the sigma is negative or
    /// not finite.
    pub fn validate(&self) -> FilterResult<()> {
        if !self.gaussian_sigma.is_finite() || self.gaussian_sigma < 0.0 {
            return Err(FilterError::InvalidParameters(format!(
                "gaussian_sigma must be finite and non-negative, got {}",
                self.gaussian_sigma
            )));
        }
        Ok(())
    }

    /// True when `preprocess` would return the input unchanged
    pub fn is_identity(&self) -> bool {
        !self.remove_hot_pixels && self.gaussian_sigma == 0.0
    }
}

/// Preprocess one channel.
///
/// # Arguments
///
/// * `image` - Input channel
/// * `options` - Filters to apply
///
/// # Errors
///
/// Returns `FilterError::InvalidParameters` for invalid options.
pub fn preprocess(image: &Image, options: &PreprocessOptions) -> FilterResult<Image> {
    options.validate()?;
    let parallel = options.use_accelerated_backend;

    let mut result = if options.remove_hot_pixels {
        debug!(parallel, "removing hot pixels");
        remove_hot_pixels_impl(image, parallel)?
    } else {
        image.clone()
    };

    if options.gaussian_sigma > 0.0 {
        let s = options.gaussian_sigma;
        debug!(sigma = s, parallel, "gaussian filter");
        result = gaussian_filter_impl(&result, (s, s, s), parallel)?;
    }
    Ok(result)
}
