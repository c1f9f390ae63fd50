//! punctum core - Basic data structures for 3D spot analysis
//!
//! This crate provides the fundamental data structures used throughout
//! the punctum workspace:
//!
//! - [`Volume`] - Dense (z, y, x) array for labels, intensities and masks
//! - [`Mask`] - Boolean volume with logical and placement operations
//! - [`Zyx`] - Voxel coordinate / extent
//! - [`Bounds3`] - Half-open box, used as bounding box and slice
//!
//! Volumes produced by microscopes may be 2D; those are represented with a
//! singleton leading z axis (see [`Volume::from_plane`]).

pub mod bounds;
pub mod error;
pub mod volume;

pub use bounds::{Bounds3, Zyx};
pub use error::{Error, Result};
pub use volume::{Mask, Volume};

/// Label volume: 0 is background, each positive value one object
pub type LabelVolume = Volume<u32>;

/// Intensity image
pub type Image = Volume<f32>;
