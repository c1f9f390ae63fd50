//! Separable convolution of 3D images
//!
//! Convolution runs one axis at a time with edge samples replicated
//! ("nearest" mode). Each pass produces its output one z-plane at a time,
//! which lets the passes run plane-parallel on the rayon pool.

use punctum_core::{Image, Volume};
use rayon::prelude::*;

use crate::kernel::Kernel1d;
use crate::{FilterError, FilterResult};

/// Image axis
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    /// Planes
    Z,
    /// Rows
    Y,
    /// Columns
    X,
}

impl Axis {
    /// All axes in (z, y, x) order
    pub const ALL: [Axis; 3] = [Axis::Z, Axis::Y, Axis::X];
}

/// Convolve `image` with `kernel` along one axis.
///
/// # Arguments
///
/// * `image` - Input image
/// * `kernel` - 1D kernel, applied centered
/// * `axis` - Axis to filter along
/// * `parallel` - Compute output planes on the rayon pool
pub fn convolve_axis(image: &Image, kernel: &Kernel1d, axis: Axis, parallel: bool) -> FilterResult<Image> {
    let shape = image.shape();
    let plane_len = shape.y * shape.x;
    let mut out = vec![0.0f32; image.len()];

    if parallel {
        out.par_chunks_mut(plane_len)
            .enumerate()
            .for_each(|(z, plane)| convolve_plane(image, kernel, axis, z, plane));
    } else {
        out.chunks_mut(plane_len)
            .enumerate()
            .for_each(|(z, plane)| convolve_plane(image, kernel, axis, z, plane));
    }

    Ok(Volume::from_data(shape, out)?)
}

fn convolve_plane(src: &Image, kernel: &Kernel1d, axis: Axis, z: usize, out: &mut [f32]) {
    let shape = src.shape();
    let data = src.data();
    let radius = kernel.radius() as isize;
    let weights = kernel.weights();
    let n = match axis {
        Axis::Z => shape.z,
        Axis::Y => shape.y,
        Axis::X => shape.x,
    } as isize;

    for y in 0..shape.y {
        for x in 0..shape.x {
            let pos = match axis {
                Axis::Z => z,
                Axis::Y => y,
                Axis::X => x,
            } as isize;
            let mut acc = 0.0f64;
            for (k, &w) in weights.iter().enumerate() {
                let p = (pos + k as isize - radius).clamp(0, n - 1) as usize;
                let idx = match axis {
                    Axis::Z => (p * shape.y + y) * shape.x + x,
                    Axis::Y => (z * shape.y + p) * shape.x + x,
                    Axis::X => (z * shape.y + y) * shape.x + p,
                };
                acc += w * data[idx] as f64;
            }
            out[y * shape.x + x] = acc as f32;
        }
    }
}

/// Apply a separable Gaussian filter.
///
/// # Arguments
///
/// * `image` - Input image
/// * `sigma` - Standard deviation per axis as (z, y, x); 0 leaves that axis
///   untouched
///
/// # Errors
///
/// Returns `FilterError::InvalidParameters` if any sigma is negative or not
/// finite.
pub fn gaussian_filter(image: &Image, sigma: (f64, f64, f64)) -> FilterResult<Image> {
    gaussian_filter_impl(image, sigma, false)
}

/// Same as [`gaussian_filter`], with every pass computed plane-parallel on
/// the rayon pool.
pub fn gaussian_filter_parallel(image: &Image, sigma: (f64, f64, f64)) -> FilterResult<Image> {
    gaussian_filter_impl(image, sigma, true)
}

pub(crate) fn gaussian_filter_impl(
    image: &Image,
    sigma: (f64, f64, f64),
    parallel: bool,
) -> FilterResult<Image> {
    let sigmas = [sigma.0, sigma.1, sigma.2];
    if sigmas.iter().any(|s| !s.is_finite() || *s < 0.0) {
        return Err(FilterError::InvalidParameters(format!(
            "gaussian sigma must be finite and non-negative, got {:?}",
            sigma
        )));
    }

    let mut result = image.clone();
    for (axis, s) in Axis::ALL.into_iter().zip(sigmas) {
        if s == 0.0 {
            continue;
        }
        let kernel = Kernel1d::gaussian(s)?;
        result = convolve_axis(&result, &kernel, axis, parallel)?;
    }
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use punctum_core::Zyx;

    fn ramp_x(shape: Zyx) -> Image {
        Image::from_fn(shape, |p| p.x as f32).unwrap()
    }

    #[test]
    fn test_identity_kernel() {
        let image = Image::from_fn(Zyx::new(3, 4, 5), |p| (p.z * 20 + p.y * 5 + p.x) as f32).unwrap();
        let k = Kernel1d::from_slice(&[0.0, 1.0, 0.0]).unwrap();
        for axis in Axis::ALL {
            let out = convolve_axis(&image, &k, axis, false).unwrap();
            assert_eq!(out.data(), image.data());
        }
    }

    #[test]
    fn test_box_along_each_axis() {
        let image = Image::from_fn(Zyx::new(3, 3, 3), |p| if p == Zyx::new(1, 1, 1) { 3.0 } else { 0.0 }).unwrap();
        let k = Kernel1d::from_slice(&[1.0 / 3.0, 1.0 / 3.0, 1.0 / 3.0]).unwrap();
        let out = convolve_axis(&image, &k, Axis::Y, false).unwrap();
        for y in 0..3 {
            assert!((out.get_unchecked(Zyx::new(1, y, 1)) - 1.0).abs() < 1e-6);
        }
        assert_eq!(out.get_unchecked(Zyx::new(0, 1, 1)), 0.0);
    }

    #[test]
    fn test_replicate_edges() {
        let image = Image::from_data(Zyx::new(1, 1, 3), vec![10.0, 0.0, 0.0]).unwrap();
        let k = Kernel1d::from_slice(&[0.5, 0.0, 0.5]).unwrap();
        let out = convolve_axis(&image, &k, Axis::X, false).unwrap();
        // left neighbour of x=0 replicates x=0
        assert_eq!(out.data(), &[5.0, 5.0, 0.0]);
    }

    #[test]
    fn test_gaussian_preserves_constant_and_linear() {
        let constant = Image::new_with_value(Zyx::new(4, 6, 6), 7.5).unwrap();
        let out = gaussian_filter(&constant, (1.0, 1.0, 1.0)).unwrap();
        assert!(out.data().iter().all(|v| (v - 7.5).abs() < 1e-4));

        // A symmetric kernel keeps a linear ramp unchanged away from the edges
        let ramp = ramp_x(Zyx::new(1, 1, 20));
        let out = gaussian_filter(&ramp, (0.0, 0.0, 1.0)).unwrap();
        assert!((out.get_unchecked(Zyx::new(0, 0, 10)) - 10.0).abs() < 1e-4);
    }

    #[test]
    fn test_gaussian_zero_sigma_is_identity() {
        let image = ramp_x(Zyx::new(2, 2, 4));
        let out = gaussian_filter(&image, (0.0, 0.0, 0.0)).unwrap();
        assert_eq!(out.data(), image.data());
    }

    #[test]
    fn test_parallel_matches_serial() {
        let image = Image::from_fn(Zyx::new(5, 7, 9), |p| ((p.z * 31 + p.y * 7 + p.x * 3) % 11) as f32).unwrap();
        let a = gaussian_filter(&image, (1.0, 0.7, 1.3)).unwrap();
        let b = gaussian_filter_parallel(&image, (1.0, 0.7, 1.3)).unwrap();
        assert_eq!(a.data(), b.data());
    }

    #[test]
    fn test_invalid_sigma() {
        let image = ramp_x(Zyx::new(1, 2, 2));
        assert!(gaussian_filter(&image, (-1.0, 0.0, 0.0)).is_err());
        assert!(gaussian_filter(&image, (0.0, f64::INFINITY, 0.0)).is_err());
    }
}
