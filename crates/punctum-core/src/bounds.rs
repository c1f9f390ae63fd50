//! Zyx, Bounds3 - Voxel coordinates and half-open boxes
//!
//! Coordinates are always ordered (z, y, x), matching the memory layout of
//! [`Volume`](crate::Volume). A [`Bounds3`] doubles as a bounding box and as
//! a slice into a volume.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// A voxel coordinate or extent in (z, y, x) order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Zyx {
    /// Plane index
    pub z: usize,
    /// Row index
    pub y: usize,
    /// Column index
    pub x: usize,
}

impl Zyx {
    /// Create a new coordinate
    pub const fn new(z: usize, y: usize, x: usize) -> Self {
        Self { z, y, x }
    }

    /// Coordinate as a tuple
    #[inline]
    pub fn as_tuple(&self) -> (usize, usize, usize) {
        (self.z, self.y, self.x)
    }

    /// Coordinate as an array, indexable by axis
    #[inline]
    pub fn to_array(self) -> [usize; 3] {
        [self.z, self.y, self.x]
    }

    /// Build from an axis-indexed array
    #[inline]
    pub fn from_array(a: [usize; 3]) -> Self {
        Self::new(a[0], a[1], a[2])
    }

    /// Product of the three components (voxel count of an extent)
    #[inline]
    pub fn product(&self) -> usize {
        self.z * self.y * self.x
    }

    /// Component-wise addition
    #[inline]
    pub fn offset_by(&self, other: Zyx) -> Zyx {
        Zyx::new(self.z + other.z, self.y + other.y, self.x + other.x)
    }

    /// Component-wise subtraction, `None` when any component would underflow
    #[inline]
    pub fn checked_sub(&self, other: Zyx) -> Option<Zyx> {
        Some(Zyx::new(
            self.z.checked_sub(other.z)?,
            self.y.checked_sub(other.y)?,
            self.x.checked_sub(other.x)?,
        ))
    }

    /// Check if every component is strictly below the matching extent
    #[inline]
    pub fn is_inside(&self, shape: Zyx) -> bool {
        self.z < shape.z && self.y < shape.y && self.x < shape.x
    }
}

impl From<(usize, usize, usize)> for Zyx {
    fn from((z, y, x): (usize, usize, usize)) -> Self {
        Zyx::new(z, y, x)
    }
}

/// A half-open box `[start, stop)` in (z, y, x) order
///
/// Used both as an object bounding box and as the slice tuple selecting a
/// sub-volume.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Bounds3 {
    /// Inclusive start corner
    pub start: Zyx,
    /// Exclusive stop corner
    pub stop: Zyx,
}

impl Bounds3 {
    /// Create new bounds
    ///
    /// # Errors
    ///
    /// Returns an error if `stop` is below `start` on any axis.
    pub fn new(start: Zyx, stop: Zyx) -> Result<Self> {
        if stop.z < start.z || stop.y < start.y || stop.x < start.x {
            return Err(Error::InvalidParameter(format!(
                "bounds stop {:?} below start {:?}",
                stop.as_tuple(),
                start.as_tuple()
            )));
        }
        Ok(Self { start, stop })
    }

    /// Create bounds without validation
    pub const fn new_unchecked(start: Zyx, stop: Zyx) -> Self {
        Self { start, stop }
    }

    /// Bounds covering a whole volume of the given shape
    pub fn full(shape: Zyx) -> Self {
        Self::new_unchecked(Zyx::default(), shape)
    }

    /// Extent along each axis
    #[inline]
    pub fn shape(&self) -> Zyx {
        Zyx::new(
            self.stop.z - self.start.z,
            self.stop.y - self.start.y,
            self.stop.x - self.start.x,
        )
    }

    /// Number of voxels covered
    #[inline]
    pub fn volume(&self) -> usize {
        self.shape().product()
    }

    /// Check if the bounds cover no voxel
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.volume() == 0
    }

    /// Check if a coordinate lies inside
    #[inline]
    pub fn contains(&self, p: Zyx) -> bool {
        p.z >= self.start.z
            && p.z < self.stop.z
            && p.y >= self.start.y
            && p.y < self.stop.y
            && p.x >= self.start.x
            && p.x < self.stop.x
    }

    /// Check if these bounds fit in a volume of the given shape
    #[inline]
    pub fn fits_in(&self, shape: Zyx) -> bool {
        self.stop.z <= shape.z && self.stop.y <= shape.y && self.stop.x <= shape.x
    }

    /// Dilate by `margin` on every side, clipped to `[0, shape)`
    pub fn expand_clipped(&self, margin: Zyx, shape: Zyx) -> Bounds3 {
        let start = Zyx::new(
            self.start.z.saturating_sub(margin.z),
            self.start.y.saturating_sub(margin.y),
            self.start.x.saturating_sub(margin.x),
        );
        let stop = Zyx::new(
            (self.stop.z + margin.z).min(shape.z),
            (self.stop.y + margin.y).min(shape.y),
            (self.stop.x + margin.x).min(shape.x),
        );
        Bounds3::new_unchecked(start, stop)
    }

    /// Convert a global coordinate into this box's frame
    #[inline]
    pub fn to_local(&self, p: Zyx) -> Option<Zyx> {
        if self.contains(p) {
            p.checked_sub(self.start)
        } else {
            None
        }
    }

    /// Convert a coordinate in this box's frame back into the outer frame
    #[inline]
    pub fn to_global(&self, local: Zyx) -> Zyx {
        self.start.offset_by(local)
    }

    /// Iterate over every coordinate in raster (z, y, x) order
    pub fn iter(&self) -> impl Iterator<Item = Zyx> + '_ {
        let (start, stop) = (self.start, self.stop);
        (start.z..stop.z).flat_map(move |z| {
            (start.y..stop.y).flat_map(move |y| (start.x..stop.x).map(move |x| Zyx::new(z, y, x)))
        })
    }
}
