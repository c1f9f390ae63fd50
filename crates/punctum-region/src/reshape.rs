//! Label/image shape normalization
//!
//! Readers hand over either single planes or z-stacks. Everything downstream
//! works on 3D volumes, so planes get a singleton leading z axis here.

use punctum_core::{Image, LabelVolume, Volume, Zyx};

use crate::error::{RegionError, RegionResult};

/// A 2D (y, x) plane or a 3D (z, y, x) stack
#[derive(Debug, Clone)]
pub enum RawArray<T> {
    /// Single plane in (y, x) row-major order
    Plane {
        height: usize,
        width: usize,
        data: Vec<T>,
    },
    /// Already three-dimensional
    Stack(Volume<T>),
}

impl<T: Copy> RawArray<T> {
    /// Promote to a volume, adding a leading z axis to planes
    pub fn into_volume(self) -> RegionResult<Volume<T>> {
        match self {
            RawArray::Plane {
                height,
                width,
                data,
            } => Ok(Volume::from_plane(height, width, data)?),
            RawArray::Stack(v) => Ok(v),
        }
    }
}

impl<T> From<Volume<T>> for RawArray<T> {
    fn from(v: Volume<T>) -> Self {
        RawArray::Stack(v)
    }
}

/// Bring a label image and an intensity image to matching 3D volumes
///
/// When `labels` is `None` the whole image is treated as a single object
/// with label 1. Idempotent on inputs that are already 3D.
///
/// # Errors
///
/// Returns `RegionError::ShapeMismatch` if the two shapes differ after
/// promotion.
pub fn reshape_lab_image_to_3d(
    labels: Option<RawArray<u32>>,
    image: RawArray<f32>,
) -> RegionResult<(LabelVolume, Image)> {
    let image = image.into_volume()?;
    let labels = match labels {
        Some(l) => l.into_volume()?,
        None => single_object_labels(image.shape())?,
    };
    check_shapes(labels.shape(), image.shape())?;
    Ok((labels, image))
}

/// Label volume of `shape` holding one object, label 1, everywhere
pub fn single_object_labels(shape: Zyx) -> RegionResult<LabelVolume> {
    Ok(LabelVolume::new_with_value(shape, 1)?)
}

/// Ensure a label volume and an image have the same shape
pub fn check_shapes(labels: Zyx, image: Zyx) -> RegionResult<()> {
    if labels != image {
        return Err(RegionError::ShapeMismatch {
            labels: labels.as_tuple(),
            image: image.as_tuple(),
        });
    }
    Ok(())
}
