//! Region properties
//!
//! Per-label measurements of a label volume: bounding box, centroid and
//! voxel count. Voxels are grouped by label value, not by connectivity;
//! use [`crate::conncomp`] to split a mask into connected pieces.

use punctum_core::{Bounds3, LabelVolume, Mask, Zyx};
use std::collections::BTreeMap;

use crate::error::{RegionError, RegionResult};

/// Measurements of one labeled object
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectProps {
    /// Object label (> 0)
    pub label: u32,
    /// Bounding box in the volume frame
    pub bounds: Bounds3,
    /// Number of voxels carrying the label
    pub voxel_count: usize,
    /// Centroid (z, y, x)
    pub centroid: (f64, f64, f64),
}

impl ObjectProps {
    /// The object's mask restricted to its own bounding box
    ///
    /// # Errors
    ///
    /// Returns an error if the bounds don't fit `labels`.
    pub fn image(&self, labels: &LabelVolume) -> RegionResult<Mask> {
        object_mask_in(labels, self.label, &self.bounds)
    }

    /// Check if the object owns the voxel at a global coordinate
    pub fn owns(&self, labels: &LabelVolume, p: Zyx) -> bool {
        self.bounds.contains(p) && labels.get(p) == Some(self.label)
    }
}

/// Mask of voxels equal to `label` inside `bounds`, in the bounds' frame
///
/// # Errors
///
/// Returns an error if `bounds` is empty or exceeds the volume.
pub fn object_mask_in(labels: &LabelVolume, label: u32, bounds: &Bounds3) -> RegionResult<Mask> {
    let crop = labels.crop(bounds)?;
    Ok(crop.map(|l| l == label))
}

/// Measure every positive label in ascending label order
///
/// An all-zero label volume yields an empty vector.
pub fn region_props(labels: &LabelVolume) -> Vec<ObjectProps> {
    #[derive(Default)]
    struct Accum {
        count: usize,
        sum: (f64, f64, f64),
        min: Zyx,
        max: Zyx,
    }

    let mut stats: BTreeMap<u32, Accum> = BTreeMap::new();

    for (i, &label) in labels.data().iter().enumerate() {
        if label == 0 {
            continue;
        }
        let p = labels.coord_of(i);
        let acc = stats.entry(label).or_insert_with(|| Accum {
            min: p,
            max: p,
            ..Default::default()
        });
        acc.count += 1;
        acc.sum.0 += p.z as f64;
        acc.sum.1 += p.y as f64;
        acc.sum.2 += p.x as f64;
        acc.min = Zyx::new(acc.min.z.min(p.z), acc.min.y.min(p.y), acc.min.x.min(p.x));
        acc.max = Zyx::new(acc.max.z.max(p.z), acc.max.y.max(p.y), acc.max.x.max(p.x));
    }

    stats
        .into_iter()
        .map(|(label, acc)| {
            let n = acc.count as f64;
            ObjectProps {
                label,
                bounds: Bounds3::new_unchecked(acc.min, acc.max.offset_by(Zyx::new(1, 1, 1))),
                voxel_count: acc.count,
                centroid: (acc.sum.0 / n, acc.sum.1 / n, acc.sum.2 / n),
            }
        })
        .collect()
}

/// Properties of a single label
///
/// # Errors
///
/// Returns `RegionError::MissingLabel` if no voxel carries `label`.
pub fn object_props(labels: &LabelVolume, label: u32) -> RegionResult<ObjectProps> {
    region_props(labels)
        .into_iter()
        .find(|o| o.label == label)
        .ok_or(RegionError::MissingLabel(label))
}
