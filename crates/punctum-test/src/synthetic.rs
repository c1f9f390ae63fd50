//! Synthetic fixtures
//!
//! Label volumes made of axis-aligned cubes and noisy images with Gaussian
//! spots, seeded so every run sees identical data.

use punctum_core::{Bounds3, Image, LabelVolume, Zyx};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::{TestError, TestResult};

/// One labeled box in a synthetic label volume
#[derive(Debug, Clone, Copy)]
pub struct SyntheticCube {
    /// Label written into the box
    pub label: u32,
    /// Inclusive start corner
    pub start: Zyx,
    /// Extent along (z, y, x)
    pub size: Zyx,
}

impl SyntheticCube {
    /// Create a cube with equal edges
    pub fn new(label: u32, start: Zyx, edge: usize) -> Self {
        Self {
            label,
            start,
            size: Zyx::new(edge, edge, edge),
        }
    }

    /// Bounds covered by the cube
    pub fn bounds(&self) -> Bounds3 {
        Bounds3::new_unchecked(self.start, self.start.offset_by(self.size))
    }
}

/// Build a label volume from labeled boxes (later boxes overwrite earlier)
///
/// # Errors
///
/// Returns `TestError::FixtureOutOfBounds` if a box exceeds the volume.
pub fn cube_labels(shape: Zyx, cubes: &[SyntheticCube]) -> TestResult<LabelVolume> {
    let mut labels = LabelVolume::new(shape)?;
    for cube in cubes {
        let bounds = cube.bounds();
        if !bounds.fits_in(shape) {
            return Err(TestError::FixtureOutOfBounds {
                name: format!("cube {}", cube.label),
                shape: shape.as_tuple(),
            });
        }
        for p in bounds.iter() {
            labels.set_unchecked(p, cube.label);
        }
    }
    Ok(labels)
}

/// Uniform noise in `[base, base + amplitude)` from a seeded generator
pub fn noisy_image(shape: Zyx, base: f32, amplitude: f32, seed: u64) -> TestResult<Image> {
    let mut rng = StdRng::seed_from_u64(seed);
    let image = Image::from_fn(shape, |_| {
        if amplitude > 0.0 {
            base + rng.random_range(0.0..amplitude)
        } else {
            base
        }
    })?;
    Ok(image)
}

/// Add an anisotropic Gaussian blob of peak `amplitude` centered at `center`
pub fn add_gaussian_spot(image: &mut Image, center: Zyx, sigma_zyx: (f64, f64, f64), amplitude: f32) {
    let (sz, sy, sx) = sigma_zyx;
    for p in Bounds3::full(image.shape()).iter() {
        let dz = (p.z as f64 - center.z as f64) / sz;
        let dy = (p.y as f64 - center.y as f64) / sy;
        let dx = (p.x as f64 - center.x as f64) / sx;
        let g = (-0.5 * (dz * dz + dy * dy + dx * dx)).exp() as f32;
        let v = image.get_unchecked(p);
        image.set_unchecked(p, v + amplitude * g);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cube_labels() {
        let labels = cube_labels(
            Zyx::new(4, 10, 10),
            &[
                SyntheticCube::new(1, Zyx::new(0, 0, 0), 2),
                SyntheticCube::new(2, Zyx::new(1, 5, 5), 3),
            ],
        )
        .unwrap();
        assert_eq!(labels.data().iter().filter(|&&l| l == 1).count(), 8);
        assert_eq!(labels.data().iter().filter(|&&l| l == 2).count(), 27);
    }

    #[test]
    fn test_cube_out_of_bounds() {
        let r = cube_labels(Zyx::new(2, 2, 2), &[SyntheticCube::new(1, Zyx::new(1, 1, 1), 2)]);
        assert!(matches!(r, Err(TestError::FixtureOutOfBounds { .. })));
    }

    #[test]
    fn test_noisy_image_seeded() {
        let a = noisy_image(Zyx::new(2, 3, 3), 10.0, 5.0, 7).unwrap();
        let b = noisy_image(Zyx::new(2, 3, 3), 10.0, 5.0, 7).unwrap();
        assert_eq!(a, b);
        assert!(a.data().iter().all(|&v| (10.0..15.0).contains(&v)));
    }

    #[test]
    fn test_gaussian_spot_peak() {
        let mut img = Image::new(Zyx::new(5, 5, 5)).unwrap();
        add_gaussian_spot(&mut img, Zyx::new(2, 2, 2), (1.0, 1.0, 1.0), 100.0);
        assert_eq!(img.get(Zyx::new(2, 2, 2)), Some(100.0));
        assert!(img.get(Zyx::new(2, 2, 3)).unwrap() < 100.0);
    }
}
