//! Spheroid masks
//!
//! A spot is approximated by an axis-aligned ellipsoid whose semi-axes are
//! the expected point-spread-function radii, in voxels. The mask is built
//! once per radii configuration and then placed at every spot.

use punctum_core::{Mask, Zyx};
use serde::{Deserialize, Serialize};

use crate::error::{MorphError, MorphResult};

/// Spot radii in voxels along (z, y, x)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpotRadii {
    /// Radius along z (planes)
    pub z: f64,
    /// Radius along y (rows)
    pub y: f64,
    /// Radius along x (columns)
    pub x: f64,
}

impl Default for SpotRadii {
    fn default() -> Self {
        Self::new(1.0, 1.0, 1.0)
    }
}

impl SpotRadii {
    /// Create new radii
    pub const fn new(z: f64, y: f64, x: f64) -> Self {
        Self { z, y, x }
    }

    /// Radii as an axis-indexed array
    #[inline]
    pub fn to_array(self) -> [f64; 3] {
        [self.z, self.y, self.x]
    }

    /// Check that every radius is finite and strictly positive, and that
    /// the spheroid mask is addressable
    ///
    /// # Errors
    ///
    /// Returns `MorphError::InvalidRadii` otherwise.
    pub fn validate(&self) -> MorphResult<()> {
        self.mask_shape().map(|_| ())
    }

    /// Shape of the spheroid mask, `2 * ceil(r) + 1` per axis
    ///
    /// # Errors
    ///
    /// Returns `MorphError::InvalidRadii` if a radius is not finite and
    /// strictly positive, or if the mask would not fit in memory.
    pub fn mask_shape(&self) -> MorphResult<Zyx> {
        fn extent(r: f64) -> Option<usize> {
            if !(r.is_finite() && r > 0.0) {
                return None;
            }
            let half = r.ceil();
            // f64 to usize casts saturate
            if half >= usize::MAX as f64 {
                return None;
            }
            (half as usize).checked_mul(2)?.checked_add(1)
        }

        let shape = extent(self.z).zip(extent(self.y)).zip(extent(self.x)).and_then(|((z, y), x)| {
            let voxels = z.checked_mul(y)?.checked_mul(x)?;
            (voxels <= isize::MAX as usize).then_some(Zyx::new(z, y, x))
        });
        shape.ok_or(MorphError::InvalidRadii {
            z: self.z,
            y: self.y,
            x: self.x,
        })
    }

    /// Half-extent of the spheroid mask, `ceil(r)` per axis
    pub fn half_extent(&self) -> Zyx {
        let [z, y, x] = self.to_array().map(|r| r.ceil() as usize);
        Zyx::new(z, y, x)
    }
}

/// Build the smallest mask holding the spheroid with the given radii
///
/// The mask has shape `2 * ceil(r) + 1` on every axis and is centered on
/// its middle voxel. A voxel at offset (dz, dy, dx) from the center is set
/// when `(dz/rz)^2 + (dy/ry)^2 + (dx/rx)^2 <= 1`.
///
/// # Errors
///
/// Returns `MorphError::InvalidRadii` if any radius is not strictly
/// positive or the mask shape overflows.
pub fn local_spheroid_mask(radii: SpotRadii) -> MorphResult<Mask> {
    let shape = radii.mask_shape()?;
    let half = radii.half_extent();

    let mask = Mask::from_fn(shape, |p| {
        let dz = (p.z as f64 - half.z as f64) / radii.z;
        let dy = (p.y as f64 - half.y as f64) / radii.y;
        let dx = (p.x as f64 - half.x as f64) / radii.x;
        dz * dz + dy * dy + dx * dx <= 1.0
    })?;
    Ok(mask)
}

/// Margin added around object bounding boxes so that spheroids centered
/// near the object edge are not truncated: `ceil(r) + 1` per axis
///
/// # Errors
///
/// Returns `MorphError::InvalidRadii` if any radius is not strictly
/// positive.
pub fn expand_tolerance(radii: SpotRadii) -> MorphResult<Zyx> {
    radii.validate()?;
    let half = radii.half_extent();
    Ok(half.offset_by(Zyx::new(1, 1, 1)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unit_sphere() {
        let mask = local_spheroid_mask(SpotRadii::new(1.0, 1.0, 1.0)).unwrap();
        assert_eq!(mask.shape(), Zyx::new(3, 3, 3));
        // Center plus six face neighbours
        assert_eq!(mask.count(), 7);
        assert_eq!(mask.get(Zyx::new(1, 1, 1)), Some(true));
        assert_eq!(mask.get(Zyx::new(0, 0, 0)), Some(false));
    }

    #[test]
    fn test_anisotropic_shape() {
        let mask = local_spheroid_mask(SpotRadii::new(1.5, 2.2, 3.0)).unwrap();
        assert_eq!(mask.shape(), Zyx::new(5, 7, 7));
        let center = Zyx::new(2, 3, 3);
        assert_eq!(mask.get(center), Some(true));
        assert_eq!(mask.get(Zyx::new(2, 3, 6)), Some(true));
        assert_eq!(mask.get(Zyx::new(0, 3, 3)), Some(false));
    }

    #[test]
    fn test_symmetric() {
        let mask = local_spheroid_mask(SpotRadii::new(2.0, 3.5, 2.7)).unwrap();
        let s = mask.shape();
        for i in 0..mask.len() {
            let p = mask.coord_of(i);
            let mirrored = Zyx::new(s.z - 1 - p.z, s.y - 1 - p.y, s.x - 1 - p.x);
            assert_eq!(mask.get_unchecked(p), mask.get_unchecked(mirrored));
        }
    }

    #[test]
    fn test_invalid_radii() {
        assert!(matches!(
            local_spheroid_mask(SpotRadii::new(0.0, 1.0, 1.0)),
            Err(MorphError::InvalidRadii { .. })
        ));
        assert!(local_spheroid_mask(SpotRadii::new(1.0, -2.0, 1.0)).is_err());
        assert!(expand_tolerance(SpotRadii::new(1.0, 1.0, f64::NAN)).is_err());
    }

    #[test]
    fn test_oversized_radii() {
        assert!(matches!(
            local_spheroid_mask(SpotRadii::new(1e30, 1.0, 1.0)),
            Err(MorphError::InvalidRadii { .. })
        ));
        assert!(matches!(
            expand_tolerance(SpotRadii::new(1.0, f64::MAX, 1.0)),
            Err(MorphError::InvalidRadii { .. })
        ));
        // Each axis fits on its own, the voxel count doesn't
        assert!(SpotRadii::new(2e6, 2e6, 2e6).validate().is_err());
        assert_eq!(SpotRadii::new(1.0, 2.0, 0.5).mask_shape().unwrap(), Zyx::new(3, 5, 3));
    }

    #[test]
    fn test_expand_tolerance() {
        let tol = expand_tolerance(SpotRadii::new(1.0, 2.3, 0.5)).unwrap();
        assert_eq!(tol, Zyx::new(2, 4, 2));
    }
}
