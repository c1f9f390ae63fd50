//! Volume - Dense 3D array
//!
//! `Volume<T>` is a 3D array stored in (z, y, x) row-major order. It is the
//! container for label volumes (`Volume<u32>`), intensity images
//! (`Volume<f32>`) and boolean masks ([`Mask`]).
//!
//! See [`mask`] for boolean-specific operations.
//!
//! # Examples
//!
//! ```
//! use punctum_core::{Volume, Zyx};
//!
//! let mut vol = Volume::<f32>::new(Zyx::new(2, 3, 4)).unwrap();
//! vol.set(Zyx::new(1, 2, 3), 0.5).unwrap();
//! assert_eq!(vol.get(Zyx::new(1, 2, 3)), Some(0.5));
//! assert_eq!(vol.len(), 24);
//! ```

pub mod mask;

use crate::bounds::{Bounds3, Zyx};
use crate::error::{Error, Result};

/// Boolean volume
pub type Mask = Volume<bool>;

/// Dense 3D array
///
/// # Memory Layout
///
/// Data is stored in (z, y, x) row-major order with no padding. The voxel at
/// (z, y, x) is at index `(z * height + y) * width + x`.
#[derive(Debug, Clone, PartialEq)]
pub struct Volume<T> {
    /// Extent along (z, y, x)
    shape: Zyx,
    /// Voxel data
    data: Vec<T>,
}

impl<T: Copy + Default> Volume<T> {
    /// Create a new volume with every voxel set to `T::default()`
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidDimension` if any extent is 0.
    pub fn new(shape: Zyx) -> Result<Self> {
        Self::new_with_value(shape, T::default())
    }
}

impl<T: Copy> Volume<T> {
    /// Create a new volume with every voxel set to `value`
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidDimension` if any extent is 0.
    pub fn new_with_value(shape: Zyx, value: T) -> Result<Self> {
        check_shape(shape)?;
        Ok(Self {
            shape,
            data: vec![value; shape.product()],
        })
    }

    /// Create a volume from raw (z, y, x) row-major data
    ///
    /// # Errors
    ///
    /// Returns an error if the shape is degenerate or the data length doesn't
    /// match.
    pub fn from_data(shape: Zyx, data: Vec<T>) -> Result<Self> {
        check_shape(shape)?;
        if data.len() != shape.product() {
            return Err(Error::DataLength {
                len: data.len(),
                shape: shape.as_tuple(),
            });
        }
        Ok(Self { shape, data })
    }

    /// Create a volume by evaluating `f` at every coordinate
    pub fn from_fn(shape: Zyx, mut f: impl FnMut(Zyx) -> T) -> Result<Self> {
        check_shape(shape)?;
        let data = Bounds3::full(shape).iter().map(&mut f).collect();
        Ok(Self { shape, data })
    }

    /// Create a single-plane volume from a 2D (y, x) row-major image
    pub fn from_plane(height: usize, width: usize, data: Vec<T>) -> Result<Self> {
        Self::from_data(Zyx::new(1, height, width), data)
    }

    /// Extent along (z, y, x)
    #[inline]
    pub fn shape(&self) -> Zyx {
        self.shape
    }

    /// Number of planes
    #[inline]
    pub fn depth(&self) -> usize {
        self.shape.z
    }

    /// Number of rows per plane
    #[inline]
    pub fn height(&self) -> usize {
        self.shape.y
    }

    /// Number of columns per row
    #[inline]
    pub fn width(&self) -> usize {
        self.shape.x
    }

    /// Total number of voxels
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Always false for a constructed volume; kept for API symmetry
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Raw voxel data
    #[inline]
    pub fn data(&self) -> &[T] {
        &self.data
    }

    /// Mutable raw voxel data
    #[inline]
    pub fn data_mut(&mut self) -> &mut [T] {
        &mut self.data
    }

    /// Consume the volume, returning its data
    pub fn into_data(self) -> Vec<T> {
        self.data
    }

    /// Linear index of a coordinate (unchecked)
    #[inline]
    pub fn index_of(&self, p: Zyx) -> usize {
        (p.z * self.shape.y + p.y) * self.shape.x + p.x
    }

    /// Coordinate of a linear index (unchecked)
    #[inline]
    pub fn coord_of(&self, index: usize) -> Zyx {
        let plane = self.shape.y * self.shape.x;
        let z = index / plane;
        let rem = index % plane;
        Zyx::new(z, rem / self.shape.x, rem % self.shape.x)
    }

    /// Get the voxel at `p`, or `None` when out of range
    #[inline]
    pub fn get(&self, p: Zyx) -> Option<T> {
        if p.is_inside(self.shape) {
            Some(self.data[self.index_of(p)])
        } else {
            None
        }
    }

    /// Get the voxel at `p` without a bounds check on the coordinate
    ///
    /// Panics if the linear index is out of range.
    #[inline]
    pub fn get_unchecked(&self, p: Zyx) -> T {
        self.data[self.index_of(p)]
    }

    /// Set the voxel at `p`
    ///
    /// # Errors
    ///
    /// Returns `Error::OutOfBounds` if `p` is outside the volume.
    pub fn set(&mut self, p: Zyx, value: T) -> Result<()> {
        if !p.is_inside(self.shape) {
            return Err(Error::OutOfBounds {
                z: p.z,
                y: p.y,
                x: p.x,
                shape: self.shape.as_tuple(),
            });
        }
        let idx = self.index_of(p);
        self.data[idx] = value;
        Ok(())
    }

    /// Set the voxel at `p` without a bounds check on the coordinate
    #[inline]
    pub fn set_unchecked(&mut self, p: Zyx, value: T) {
        let idx = self.index_of(p);
        self.data[idx] = value;
    }

    /// One z-plane as a (y, x) row-major slice
    pub fn plane(&self, z: usize) -> Option<&[T]> {
        if z >= self.shape.z {
            return None;
        }
        let n = self.shape.y * self.shape.x;
        Some(&self.data[z * n..(z + 1) * n])
    }

    /// One z-plane as a mutable slice
    pub fn plane_mut(&mut self, z: usize) -> Option<&mut [T]> {
        if z >= self.shape.z {
            return None;
        }
        let n = self.shape.y * self.shape.x;
        Some(&mut self.data[z * n..(z + 1) * n])
    }

    /// Copy out the sub-volume selected by `bounds`
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidBounds` if `bounds` is empty or exceeds the
    /// volume.
    pub fn crop(&self, bounds: &Bounds3) -> Result<Volume<T>> {
        self.check_bounds(bounds)?;
        let data = bounds.iter().map(|p| self.get_unchecked(p)).collect();
        Ok(Volume {
            shape: bounds.shape(),
            data,
        })
    }

    /// Values inside `bounds` in raster order
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidBounds` if `bounds` exceeds the volume.
    pub fn values_in(&self, bounds: &Bounds3) -> Result<Vec<T>> {
        if !bounds.fits_in(self.shape) {
            return Err(self.bounds_error(bounds));
        }
        Ok(bounds.iter().map(|p| self.get_unchecked(p)).collect())
    }

    /// Apply `f` to every voxel, producing a new volume
    pub fn map<U>(&self, f: impl FnMut(T) -> U) -> Volume<U> {
        Volume {
            shape: self.shape,
            data: self.data.iter().copied().map(f).collect(),
        }
    }

    /// Check that `other` has the same shape
    ///
    /// # Errors
    ///
    /// Returns `Error::ShapeMismatch` when shapes differ.
    pub fn check_same_shape<U>(&self, other: &Volume<U>) -> Result<()> {
        if self.shape != other.shape {
            return Err(Error::ShapeMismatch {
                expected: self.shape.as_tuple(),
                actual: other.shape.as_tuple(),
            });
        }
        Ok(())
    }

    fn check_bounds(&self, bounds: &Bounds3) -> Result<()> {
        if bounds.is_empty() || !bounds.fits_in(self.shape) {
            return Err(self.bounds_error(bounds));
        }
        Ok(())
    }

    fn bounds_error(&self, bounds: &Bounds3) -> Error {
        Error::InvalidBounds {
            start: bounds.start.as_tuple(),
            stop: bounds.stop.as_tuple(),
            shape: self.shape.as_tuple(),
        }
    }
}

impl<T: Copy + PartialOrd> Volume<T> {
    /// Maximum voxel value
    pub fn max_value(&self) -> T {
        let mut best = self.data[0];
        for &v in &self.data[1..] {
            if v > best {
                best = v;
            }
        }
        best
    }

    /// Collapse the z axis keeping the per-(y, x) maximum
    ///
    /// The result has a single plane. On masks this is a logical OR.
    pub fn max_project_z(&self) -> Volume<T> {
        let plane_len = self.shape.y * self.shape.x;
        let mut out = self.data[..plane_len].to_vec();
        for chunk in self.data.chunks(plane_len).skip(1) {
            for (o, &v) in out.iter_mut().zip(chunk) {
                if v > *o {
                    *o = v;
                }
            }
        }
        Volume {
            shape: Zyx::new(1, self.shape.y, self.shape.x),
            data: out,
        }
    }
}

fn check_shape(shape: Zyx) -> Result<()> {
    if shape.product() == 0 {
        return Err(Error::InvalidDimension {
            depth: shape.z,
            height: shape.y,
            width: shape.x,
        });
    }
    Ok(())
}
