//! Connected component analysis
//!
//! 3D connected-component labeling of boolean masks and the per-object
//! "keep only the largest piece" filter built on top of it.

use punctum_core::{LabelVolume, Mask, Zyx};
use std::collections::VecDeque;

use crate::error::RegionResult;
use crate::props::region_props;

/// Connectivity type for 3D component analysis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Connectivity {
    /// Face neighbors only (6 neighbors)
    Six,
    /// Face, edge and corner neighbors (26 neighbors)
    #[default]
    TwentySix,
}

impl Connectivity {
    fn offsets(self) -> Vec<(isize, isize, isize)> {
        let mut offsets = Vec::with_capacity(26);
        for dz in -1isize..=1 {
            for dy in -1isize..=1 {
                for dx in -1isize..=1 {
                    let nonzero = (dz != 0) as u8 + (dy != 0) as u8 + (dx != 0) as u8;
                    let keep = match self {
                        Connectivity::Six => nonzero == 1,
                        Connectivity::TwentySix => nonzero > 0,
                    };
                    if keep {
                        offsets.push((dz, dy, dx));
                    }
                }
            }
        }
        offsets
    }
}

/// Label all connected components of a mask
///
/// Labels start at 1 and are assigned in raster order of each component's
/// first voxel. Returns the label volume and the number of components.
pub fn label_connected_components(
    mask: &Mask,
    connectivity: Connectivity,
) -> RegionResult<(LabelVolume, u32)> {
    let shape = mask.shape();
    let mut labels = LabelVolume::new(shape)?;
    let offsets = connectivity.offsets();
    let mut next_label = 0u32;
    let mut queue = VecDeque::new();

    for start in 0..mask.len() {
        if !mask.data()[start] || labels.data()[start] != 0 {
            continue;
        }
        next_label += 1;
        labels.data_mut()[start] = next_label;
        queue.push_back(mask.coord_of(start));

        while let Some(p) = queue.pop_front() {
            for &(dz, dy, dx) in &offsets {
                let Some(n) = neighbor(p, (dz, dy, dx), shape) else {
                    continue;
                };
                let idx = mask.index_of(n);
                if mask.data()[idx] && labels.data()[idx] == 0 {
                    labels.data_mut()[idx] = next_label;
                    queue.push_back(n);
                }
            }
        }
    }

    Ok((labels, next_label))
}

/// Keep, inside every object of `labels`, only the largest connected piece
/// of `mask`
///
/// Returns a new mask; neither input is modified. Voxels of `mask` outside
/// every object are dropped. Ties keep the piece found first in raster
/// order.
pub fn filter_largest_sub_object(
    mask: &Mask,
    labels: &LabelVolume,
    connectivity: Connectivity,
) -> RegionResult<Mask> {
    labels.check_same_shape(mask)?;
    let mut out = Mask::new(mask.shape())?;

    for obj in region_props(labels) {
        let obj_mask = obj.image(labels)?;
        let sub = mask.crop(&obj.bounds)?.and(&obj_mask)?;
        if !sub.any() {
            continue;
        }
        let (sub_labels, n) = label_connected_components(&sub, connectivity)?;
        let mut sizes = vec![0usize; n as usize + 1];
        for &l in sub_labels.data() {
            sizes[l as usize] += 1;
        }
        let mut largest = 1usize;
        for l in 2..sizes.len() {
            if sizes[l] > sizes[largest] {
                largest = l;
            }
        }
        for (i, &l) in sub_labels.data().iter().enumerate() {
            if l as usize == largest {
                let global = obj.bounds.to_global(sub_labels.coord_of(i));
                out.set_unchecked(global, true);
            }
        }
    }

    Ok(out)
}

fn neighbor(p: Zyx, (dz, dy, dx): (isize, isize, isize), shape: Zyx) -> Option<Zyx> {
    let z = p.z.checked_add_signed(dz)?;
    let y = p.y.checked_add_signed(dy)?;
    let x = p.x.checked_add_signed(dx)?;
    let n = Zyx::new(z, y, x);
    n.is_inside(shape).then_some(n)
}
