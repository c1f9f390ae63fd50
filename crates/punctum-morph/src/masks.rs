//! Spot and background masks of one object
//!
//! Every spot claims the voxels of a spheroid placed at its center; the
//! object's background is whatever the object covers that no spot claims.
//! Overlapping spheroids simply merge.

use punctum_core::{Mask, Zyx};

use crate::error::MorphResult;
use crate::slicing::slice_local_into_global;

/// Spot/background split of one object crop
#[derive(Debug, Clone)]
pub struct SpotMasks {
    /// Union of all placed spheroids, clipped to the crop
    pub spheroids: Mask,
    /// Object voxels outside every spheroid
    pub background: Mask,
}

/// Place `spheroid` at every center and split `object` into spot and
/// background voxels
///
/// Centers are in the frame of `object`; those outside it are ignored.
pub fn spheroid_and_background_masks(
    centers: &[Zyx],
    object: &Mask,
    spheroid: &Mask,
) -> MorphResult<SpotMasks> {
    let spheroids = place_spheroids(centers, object.shape(), spheroid)?;
    let background = object.and_not(&spheroids)?;
    Ok(SpotMasks {
        spheroids,
        background,
    })
}

/// OR a copy of `spheroid` centered at each of `centers` into a new mask of
/// `shape`
pub fn place_spheroids(centers: &[Zyx], shape: Zyx, spheroid: &Mask) -> MorphResult<Mask> {
    let mut union = Mask::new(shape)?;
    for &center in centers.iter().filter(|c| c.is_inside(shape)) {
        let (outer, inner) = slice_local_into_global(center, shape, spheroid.shape())?;
        union.or_region(&outer, spheroid, &inner)?;
    }
    Ok(union)
}
