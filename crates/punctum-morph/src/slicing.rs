//! Slice arithmetic for embedding a small centered mask into a larger volume
//!
//! When the center sits near the outer volume's border, the part of the
//! small mask that would fall outside is trimmed from both slices so they
//! always select regions of identical shape.

use punctum_core::{Bounds3, Zyx};

use crate::error::{MorphError, MorphResult};

/// Compute the pair of slices placing a mask of `inner_shape`, centered at
/// `center`, inside a volume of `outer_shape`
///
/// Returns `(outer_slice, inner_slice)`: the region of the outer volume the
/// mask overlaps, and the matching region of the mask itself. Per axis this
/// handles a full fit, clipping at the low end, clipping at the high end, or
/// both.
///
/// # Errors
///
/// Returns `MorphError::InvalidParameters` if `inner_shape` has an even
/// extent or `center` is outside `outer_shape`.
pub fn slice_local_into_global(
    center: Zyx,
    outer_shape: Zyx,
    inner_shape: Zyx,
) -> MorphResult<(Bounds3, Bounds3)> {
    if !center.is_inside(outer_shape) {
        return Err(MorphError::InvalidParameters(format!(
            "center {:?} outside volume of shape {:?}",
            center.as_tuple(),
            outer_shape.as_tuple()
        )));
    }

    let c = center.to_array();
    let outer = outer_shape.to_array();
    let inner = inner_shape.to_array();
    let mut outer_start = [0; 3];
    let mut outer_stop = [0; 3];
    let mut inner_start = [0; 3];
    let mut inner_stop = [0; 3];

    for axis in 0..3 {
        if inner[axis] % 2 == 0 {
            return Err(MorphError::InvalidParameters(format!(
                "inner extent {} on axis {} must be odd",
                inner[axis], axis
            )));
        }
        let half = inner[axis] / 2;
        let low_clip = half.saturating_sub(c[axis]);
        let high_clip = (c[axis] + half + 1).saturating_sub(outer[axis]);

        outer_start[axis] = c[axis].saturating_sub(half);
        outer_stop[axis] = (c[axis] + half + 1).min(outer[axis]);
        inner_start[axis] = low_clip;
        inner_stop[axis] = inner[axis] - high_clip;
    }

    Ok((
        Bounds3::new_unchecked(Zyx::from_array(outer_start), Zyx::from_array(outer_stop)),
        Bounds3::new_unchecked(Zyx::from_array(inner_start), Zyx::from_array(inner_stop)),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_fit() {
        let (outer, inner) =
            slice_local_into_global(Zyx::new(5, 5, 5), Zyx::new(10, 10, 10), Zyx::new(3, 5, 7)).unwrap();
        assert_eq!(outer.start, Zyx::new(4, 3, 2));
        assert_eq!(outer.stop, Zyx::new(7, 8, 9));
        assert_eq!(inner, Bounds3::full(Zyx::new(3, 5, 7)));
    }

    #[test]
    fn test_low_corner_clipped() {
        let (outer, inner) =
            slice_local_into_global(Zyx::new(0, 0, 0), Zyx::new(10, 10, 10), Zyx::new(5, 5, 5)).unwrap();
        assert_eq!(outer.start, Zyx::new(0, 0, 0));
        assert_eq!(outer.stop, Zyx::new(3, 3, 3));
        assert_eq!(inner.start, Zyx::new(2, 2, 2));
        assert_eq!(inner.stop, Zyx::new(5, 5, 5));
        assert_eq!(outer.shape(), inner.shape());
    }

    #[test]
    fn test_high_corner_clipped() {
        let (outer, inner) =
            slice_local_into_global(Zyx::new(9, 8, 9), Zyx::new(10, 10, 10), Zyx::new(5, 5, 5)).unwrap();
        assert_eq!(outer.start, Zyx::new(7, 6, 7));
        assert_eq!(outer.stop, Zyx::new(10, 10, 10));
        assert_eq!(inner.start, Zyx::new(0, 0, 0));
        assert_eq!(inner.stop, Zyx::new(3, 4, 3));
        assert_eq!(outer.shape(), inner.shape());
    }

    #[test]
    fn test_clipped_on_both_ends() {
        let (outer, inner) =
            slice_local_into_global(Zyx::new(1, 1, 1), Zyx::new(3, 3, 3), Zyx::new(7, 7, 7)).unwrap();
        assert_eq!(outer, Bounds3::full(Zyx::new(3, 3, 3)));
        assert_eq!(inner.start, Zyx::new(2, 2, 2));
        assert_eq!(inner.stop, Zyx::new(5, 5, 5));
    }

    #[test]
    fn test_invalid_inputs() {
        assert!(slice_local_into_global(Zyx::new(10, 0, 0), Zyx::new(10, 10, 10), Zyx::new(3, 3, 3)).is_err());
        assert!(slice_local_into_global(Zyx::new(1, 1, 1), Zyx::new(10, 10, 10), Zyx::new(3, 4, 3)).is_err());
    }
}
