//! Boolean mask operations
//!
//! Logical combinations and small-mask placement for [`Mask`].

use super::{Mask, Volume};
use crate::bounds::{Bounds3, Zyx};
use crate::error::{Error, Result};

impl Volume<bool> {
    /// Number of `true` voxels
    pub fn count(&self) -> usize {
        self.data.iter().filter(|&&v| v).count()
    }

    /// Check if any voxel is set
    pub fn any(&self) -> bool {
        self.data.iter().any(|&v| v)
    }

    /// `self AND NOT other`
    ///
    /// # Errors
    ///
    /// Returns `Error::ShapeMismatch` if the masks differ in shape.
    pub fn and_not(&self, other: &Mask) -> Result<Mask> {
        self.check_same_shape(other)?;
        let data = self
            .data
            .iter()
            .zip(&other.data)
            .map(|(&a, &b)| a && !b)
            .collect();
        Ok(Volume {
            shape: self.shape,
            data,
        })
    }

    /// `self AND other`
    ///
    /// # Errors
    ///
    /// Returns `Error::ShapeMismatch` if the masks differ in shape.
    pub fn and(&self, other: &Mask) -> Result<Mask> {
        self.check_same_shape(other)?;
        let data = self
            .data
            .iter()
            .zip(&other.data)
            .map(|(&a, &b)| a && b)
            .collect();
        Ok(Volume {
            shape: self.shape,
            data,
        })
    }

    /// OR the `src_bounds` part of `src` into the `dst_bounds` part of `self`
    ///
    /// Both bounds must have the same shape.
    ///
    /// # Errors
    ///
    /// Returns an error if the bounds differ in shape or exceed their volume.
    pub fn or_region(&mut self, dst_bounds: &Bounds3, src: &Mask, src_bounds: &Bounds3) -> Result<()> {
        if dst_bounds.shape() != src_bounds.shape() {
            return Err(Error::ShapeMismatch {
                expected: dst_bounds.shape().as_tuple(),
                actual: src_bounds.shape().as_tuple(),
            });
        }
        if !dst_bounds.fits_in(self.shape) || !src_bounds.fits_in(src.shape) {
            return Err(Error::InvalidParameter(
                "region exceeds mask bounds".to_string(),
            ));
        }
        for (d, s) in dst_bounds.iter().zip(src_bounds.iter()) {
            if src.get_unchecked(s) {
                self.set_unchecked(d, true);
            }
        }
        Ok(())
    }

    /// Values of `image` where this mask is set, in raster order
    ///
    /// # Errors
    ///
    /// Returns `Error::ShapeMismatch` if shapes differ.
    pub fn select<T: Copy>(&self, image: &Volume<T>) -> Result<Vec<T>> {
        self.check_same_shape(image)?;
        Ok(self
            .data
            .iter()
            .zip(&image.data)
            .filter_map(|(&m, &v)| m.then_some(v))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mask_from(shape: Zyx, set: &[Zyx]) -> Mask {
        let mut m = Mask::new(shape).unwrap();
        for &p in set {
            m.set(p, true).unwrap();
        }
        m
    }

    #[test]
    fn test_and_not() {
        let shape = Zyx::new(1, 2, 2);
        let a = mask_from(shape, &[Zyx::new(0, 0, 0), Zyx::new(0, 1, 1)]);
        let b = mask_from(shape, &[Zyx::new(0, 1, 1)]);
        let c = a.and_not(&b).unwrap();
        assert_eq!(c.count(), 1);
        assert_eq!(c.get(Zyx::new(0, 0, 0)), Some(true));
    }

    #[test]
    fn test_or_region_clipped() {
        let small = Mask::new_with_value(Zyx::new(3, 3, 3), true).unwrap();
        let mut big = Mask::new(Zyx::new(4, 4, 4)).unwrap();
        let dst = Bounds3::new(Zyx::new(0, 0, 0), Zyx::new(2, 2, 2)).unwrap();
        let src = Bounds3::new(Zyx::new(1, 1, 1), Zyx::new(3, 3, 3)).unwrap();
        big.or_region(&dst, &small, &src).unwrap();
        assert_eq!(big.count(), 8);

        let bad = Bounds3::new(Zyx::new(0, 0, 0), Zyx::new(3, 3, 3)).unwrap();
        assert!(big.or_region(&dst, &small, &bad).is_err());
    }

    #[test]
    fn test_max_project_z() {
        let m = mask_from(Zyx::new(3, 2, 2), &[Zyx::new(0, 0, 1), Zyx::new(2, 1, 0)]);
        let p = m.max_project_z();
        assert_eq!(p.shape(), Zyx::new(1, 2, 2));
        assert_eq!(p.data(), &[false, true, true, false]);
    }

    #[test]
    fn test_select() {
        let m = mask_from(Zyx::new(1, 1, 3), &[Zyx::new(0, 0, 2)]);
        let img = Volume::from_data(Zyx::new(1, 1, 3), vec![1.0f32, 2.0, 3.0]).unwrap();
        assert_eq!(m.select(&img).unwrap(), vec![3.0]);
    }
}
