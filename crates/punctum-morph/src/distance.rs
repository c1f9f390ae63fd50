//! Euclidean distance transform
//!
//! Exact squared Euclidean distance transform computed one axis at a time
//! with the lower-envelope-of-parabolas method (Felzenszwalb & Huttenlocher).

use punctum_core::{Bounds3, Mask, Volume, Zyx};

use crate::error::MorphResult;

/// Distance of every set voxel to the nearest unset voxel
///
/// Unset voxels get 0. When the mask has no unset voxel at all, the volume
/// is treated as surrounded by unset voxels.
pub fn distance_transform(mask: &Mask) -> MorphResult<Volume<f64>> {
    if mask.count() < mask.len() {
        return Ok(distance_transform_inner(mask)?.map(f64::sqrt));
    }

    let shape = mask.shape();
    let padded_shape = shape.offset_by(Zyx::new(2, 2, 2));
    let inner = Bounds3::new_unchecked(Zyx::new(1, 1, 1), shape.offset_by(Zyx::new(1, 1, 1)));
    let padded = Mask::from_fn(padded_shape, |p| inner.contains(p))?;
    let dist = distance_transform_inner(&padded)?;
    Ok(dist.crop(&inner)?.map(f64::sqrt))
}

/// Distance transform divided by its own maximum, in `[0, 1]`
///
/// An all-unset mask yields all zeros.
pub fn normalized_distance_transform(mask: &Mask) -> MorphResult<Volume<f64>> {
    let dist = distance_transform(mask)?;
    let max = dist.max_value();
    if max <= 0.0 {
        return Ok(dist);
    }
    Ok(dist.map(|d| d / max))
}

fn distance_transform_inner(mask: &Mask) -> MorphResult<Volume<f64>> {
    let shape = mask.shape();
    let mut dist = mask.map(|set| if set { f64::INFINITY } else { 0.0 });
    for axis in [2, 1, 0] {
        transform_axis(&mut dist, shape, axis);
    }
    Ok(dist)
}

fn transform_axis(dist: &mut Volume<f64>, shape: Zyx, axis: usize) {
    let dims = shape.to_array();
    let n = dims[axis];
    let mut starts = dims;
    starts[axis] = 1;
    let stride = match axis {
        0 => shape.y * shape.x,
        1 => shape.x,
        _ => 1,
    };

    let mut line = vec![0.0; n];
    let mut out = vec![0.0; n];
    for start in Bounds3::full(Zyx::from_array(starts)).iter() {
        let base = dist.index_of(start);
        for (i, v) in line.iter_mut().enumerate() {
            *v = dist.data()[base + i * stride];
        }
        squared_distance_1d(&line, &mut out);
        for (i, &v) in out.iter().enumerate() {
            dist.data_mut()[base + i * stride] = v;
        }
    }
}

/// One-dimensional pass over sampled function `f`; infinite samples are
/// not parabola sites.
fn squared_distance_1d(f: &[f64], out: &mut [f64]) {
    let mut sites: Vec<usize> = Vec::with_capacity(f.len());
    let mut bounds: Vec<f64> = Vec::with_capacity(f.len());

    let intersect = |p: usize, q: usize| {
        let (pf, qf) = (p as f64, q as f64);
        ((f[q] + qf * qf) - (f[p] + pf * pf)) / (2.0 * (qf - pf))
    };

    for q in 0..f.len() {
        if !f[q].is_finite() {
            continue;
        }
        let mut s = f64::NEG_INFINITY;
        while let Some(&p) = sites.last() {
            s = intersect(p, q);
            if s <= bounds[bounds.len() - 1] {
                sites.pop();
                bounds.pop();
                s = f64::NEG_INFINITY;
            } else {
                break;
            }
        }
        sites.push(q);
        bounds.push(s);
    }

    if sites.is_empty() {
        out.fill(f64::INFINITY);
        return;
    }

    let mut k = 0;
    for (q, o) in out.iter_mut().enumerate() {
        while k + 1 < sites.len() && bounds[k + 1] < q as f64 {
            k += 1;
        }
        let d = q as f64 - sites[k] as f64;
        *o = d * d + f[sites[k]];
    }
}
