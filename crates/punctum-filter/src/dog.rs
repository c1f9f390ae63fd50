//! Difference-of-Gaussians spot enhancement
//!
//! Subtracting a wider blur from a narrower one acts as a band-pass filter
//! tuned to blobs of the expected spot size.

use std::f64::consts::SQRT_2;

use punctum_core::Image;
use punctum_morph::SpotRadii;

use crate::FilterResult;
use crate::convolve::gaussian_filter_impl;

/// The two per-axis sigmas used to enhance spots of the given radii.
///
/// `sigma1 = r / (1 + sqrt(2))` and `sigma2 = sqrt(2) * sigma1`.
pub fn dog_sigmas(radii: SpotRadii) -> ((f64, f64, f64), (f64, f64, f64)) {
    let [z, y, x] = radii.to_array().map(|r| r / (1.0 + SQRT_2));
    ((z, y, x), (z * SQRT_2, y * SQRT_2, x * SQRT_2))
}

/// Enhance spots of the given radii with a difference of Gaussians.
///
/// Returns `G(sigma1) - G(sigma2)` of the input (see [`dog_sigmas`]).
///
/// # Errors
///
/// Returns `FilterError::Morph` if the radii are invalid.
pub fn dog_sharpen_spots(image: &Image, radii: SpotRadii) -> FilterResult<Image> {
    dog_sharpen_spots_impl(image, radii, false)
}

/// Same as [`dog_sharpen_spots`], with the blurs computed plane-parallel on
/// the rayon pool.
pub fn dog_sharpen_spots_parallel(image: &Image, radii: SpotRadii) -> FilterResult<Image> {
    dog_sharpen_spots_impl(image, radii, true)
}

fn dog_sharpen_spots_impl(image: &Image, radii: SpotRadii, parallel: bool) -> FilterResult<Image> {
    radii.validate()?;
    let (sigma1, sigma2) = dog_sigmas(radii);
    let narrow = gaussian_filter_impl(image, sigma1, parallel)?;
    let wide = gaussian_filter_impl(image, sigma2, parallel)?;

    let mut out = narrow;
    for (o, w) in out.data_mut().iter_mut().zip(wide.data()) {
        *o -= w;
    }
    Ok(out)
}
