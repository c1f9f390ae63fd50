//! Per-plane min and max filters
//!
//! Square-window order-statistic filters applied independently to every
//! z-plane, with edge pixels replicated. Hot-pixel removal is their
//! composition: a grayscale opening (min, then max) with a 3x3 window.

use punctum_core::{Image, Volume};
use rayon::prelude::*;

use crate::{FilterError, FilterResult};

/// Window side used for hot-pixel removal
pub const HOT_PIXEL_WINDOW: usize = 3;

#[derive(Debug, Clone, Copy)]
enum Extremum {
    Min,
    Max,
}

/// Apply a `size x size` minimum filter to every z-plane.
///
/// # Errors
///
/// Returns `FilterError::InvalidParameters` if `size` is 0 or even.
pub fn min_filter_planes(image: &Image, size: usize) -> FilterResult<Image> {
    extremum_filter(image, size, Extremum::Min, false)
}

/// Apply a `size x size` maximum filter to every z-plane.
///
/// # Errors
///
/// Returns `FilterError::InvalidParameters` if `size` is 0 or even.
pub fn max_filter_planes(image: &Image, size: usize) -> FilterResult<Image> {
    extremum_filter(image, size, Extremum::Max, false)
}

/// Remove isolated bright pixels with a per-plane 3x3 grayscale opening.
///
/// Structures smaller than the window (single hot pixels, one-pixel lines)
/// are flattened to their surroundings; anything at least 3x3 survives
/// unchanged.
pub fn remove_hot_pixels(image: &Image) -> FilterResult<Image> {
    remove_hot_pixels_impl(image, false)
}

pub(crate) fn remove_hot_pixels_impl(image: &Image, parallel: bool) -> FilterResult<Image> {
    let eroded = extremum_filter(image, HOT_PIXEL_WINDOW, Extremum::Min, parallel)?;
    extremum_filter(&eroded, HOT_PIXEL_WINDOW, Extremum::Max, parallel)
}

fn extremum_filter(image: &Image, size: usize, op: Extremum, parallel: bool) -> FilterResult<Image> {
    if size == 0 || size % 2 == 0 {
        return Err(FilterError::InvalidParameters(format!(
            "filter window must be odd and positive, got {}",
            size
        )));
    }

    let shape = image.shape();
    let plane_len = shape.y * shape.x;
    let mut out = vec![0.0f32; image.len()];
    let src = image.data();
    let half = size / 2;

    if parallel {
        out.par_chunks_mut(plane_len).enumerate().for_each(|(z, plane)| {
            filter_plane(&src[z * plane_len..(z + 1) * plane_len], shape.y, shape.x, half, op, plane)
        });
    } else {
        out.chunks_mut(plane_len).enumerate().for_each(|(z, plane)| {
            filter_plane(&src[z * plane_len..(z + 1) * plane_len], shape.y, shape.x, half, op, plane)
        });
    }

    Ok(Volume::from_data(shape, out)?)
}

/// Separable square-window extremum over one (y, x) plane
fn filter_plane(src: &[f32], height: usize, width: usize, half: usize, op: Extremum, out: &mut [f32]) {
    let pick = match op {
        Extremum::Min => f32::min,
        Extremum::Max => f32::max,
    };

    let mut rows = vec![0.0f32; src.len()];
    for y in 0..height {
        for x in 0..width {
            let lo = x.saturating_sub(half);
            let hi = (x + half).min(width - 1);
            let row = &src[y * width..(y + 1) * width];
            rows[y * width + x] = row[lo..=hi].iter().copied().reduce(pick).unwrap_or(row[x]);
        }
    }

    for y in 0..height {
        let lo = y.saturating_sub(half);
        let hi = (y + half).min(height - 1);
        for x in 0..width {
            out[y * width + x] = (lo..=hi).map(|yy| rows[yy * width + x]).reduce(pick).unwrap_or(rows[y * width + x]);
        }
    }
}
