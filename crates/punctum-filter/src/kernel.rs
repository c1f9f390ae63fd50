//! One-dimensional convolution kernels
//!
//! Every 3D filter in this crate is separable, so a kernel is a single line
//! of weights with its origin on the middle sample.

use crate::{FilterError, FilterResult};

/// Gaussian kernels extend to this many standard deviations
pub const GAUSSIAN_TRUNCATE: f64 = 4.0;

/// A 1D convolution kernel of odd length, centered on its middle sample
#[derive(Debug, Clone, PartialEq)]
pub struct Kernel1d {
    /// Samples on each side of the center
    radius: usize,
    /// Weights, `2 * radius + 1` of them
    data: Vec<f64>,
}

impl Kernel1d {
    /// Create a kernel from explicit weights.
    ///
    /// # Errors
    ///
    /// Returns `FilterError::InvalidKernel` if `data` is empty or has even
    /// length.
    pub fn from_slice(data: &[f64]) -> FilterResult<Self> {
        if data.is_empty() || data.len() % 2 == 0 {
            return Err(FilterError::InvalidKernel(format!(
                "kernel length must be odd, got {}",
                data.len()
            )));
        }
        Ok(Self {
            radius: data.len() / 2,
            data: data.to_vec(),
        })
    }

    /// Create a normalized Gaussian kernel.
    ///
    /// The radius is `ceil(4 * sigma)` and the weights sum to 1.
    ///
    /// # Arguments
    ///
    /// * `sigma` - Standard deviation in samples, finite and `> 0`
    ///
    /// # Errors
    ///
    /// Returns `FilterError::InvalidKernel` for a non-positive or
    /// non-finite sigma.
    pub fn gaussian(sigma: f64) -> FilterResult<Self> {
        if !sigma.is_finite() || sigma <= 0.0 {
            return Err(FilterError::InvalidKernel(format!(
                "gaussian sigma must be finite and positive, got {}",
                sigma
            )));
        }
        let radius = (GAUSSIAN_TRUNCATE * sigma).ceil() as usize;
        let denom = 2.0 * sigma * sigma;
        let mut data: Vec<f64> = (0..=2 * radius)
            .map(|i| {
                let d = i as f64 - radius as f64;
                (-d * d / denom).exp()
            })
            .collect();
        let sum: f64 = data.iter().sum();
        for w in &mut data {
            *w /= sum;
        }
        Ok(Self { radius, data })
    }

    /// Samples on each side of the center
    #[inline]
    pub fn radius(&self) -> usize {
        self.radius
    }

    /// Number of weights
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Always false; kernels hold at least the center weight
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Weights from `-radius` to `+radius`
    #[inline]
    pub fn weights(&self) -> &[f64] {
        &self.data
    }

    /// Sum of all weights
    pub fn sum(&self) -> f64 {
        self.data.iter().sum()
    }
}
