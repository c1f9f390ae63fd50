//! Object cropping
//!
//! Crops an object's neighborhood out of the label volume with a safety
//! margin, and assigns spot coordinates to objects.
//!
//! Two frames are in play for every object:
//!
//! - the *local* frame, relative to the object's own bounding box origin
//! - the *expanded* frame, relative to the origin of the dilated crop
//!
//! Both convert to the global frame by adding their own origin.

use punctum_core::{Bounds3, LabelVolume, Mask, Zyx};

use crate::error::RegionResult;
use crate::props::{ObjectProps, object_mask_in};

/// An object's dilated crop
#[derive(Debug, Clone)]
pub struct ExpandedObjectSlice {
    /// Crop bounds in the global frame
    pub slice: Bounds3,
    /// Object membership inside the crop
    pub mask: Mask,
}

impl ExpandedObjectSlice {
    /// Origin of the crop in the global frame
    #[inline]
    pub fn offset(&self) -> Zyx {
        self.slice.start
    }

    /// Convert a crop-frame coordinate to the global frame
    #[inline]
    pub fn to_global(&self, local: Zyx) -> Zyx {
        self.slice.to_global(local)
    }

    /// Convert a global coordinate to the crop frame
    #[inline]
    pub fn to_crop(&self, global: Zyx) -> Option<Zyx> {
        self.slice.to_local(global)
    }
}

/// Crop the object's bounding box dilated by `tolerance`, clipped to the
/// volume
///
/// The returned mask marks voxels carrying the object's label inside the
/// crop, so neighbouring objects that fall into the margin are excluded.
pub fn expanded_object_slice(
    object: &ObjectProps,
    tolerance: Zyx,
    labels: &LabelVolume,
) -> RegionResult<ExpandedObjectSlice> {
    let slice = object.bounds.expand_clipped(tolerance, labels.shape());
    let mask = object_mask_in(labels, object.label, &slice)?;
    Ok(ExpandedObjectSlice { slice, mask })
}

/// Convert global spot coordinates into the object's local frame
///
/// Keeps, in input order, only coordinates inside the object's bounding box
/// whose voxel carries the object's label.
pub fn to_local_coords(object: &ObjectProps, labels: &LabelVolume, coords: &[Zyx]) -> Vec<Zyx> {
    coords
        .iter()
        .filter(|&&p| object.owns(labels, p))
        .filter_map(|&p| object.bounds.to_local(p))
        .collect()
}
