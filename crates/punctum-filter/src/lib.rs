//! punctum-filter - Image filtering for spot analysis
//!
//! This crate provides the filters applied to image channels before spots
//! are measured:
//!
//! - Separable 3D Gaussian blur with replicated edges
//! - Per-plane min/max filters and hot-pixel removal
//! - Difference-of-Gaussians spot enhancement
//! - [`preprocess`], the configurable combination used on the raw channel
//!
//! Every filter can run plane-parallel on the rayon pool.

pub mod convolve;
pub mod dog;
mod error;
pub mod kernel;
pub mod preprocess;
pub mod rank;

pub use error::{FilterError, FilterResult};
pub use kernel::Kernel1d;

pub use convolve::{Axis, convolve_axis, gaussian_filter, gaussian_filter_parallel};
pub use dog::{dog_sharpen_spots, dog_sharpen_spots_parallel, dog_sigmas};
pub use preprocess::{PreprocessOptions, preprocess};
pub use rank::{max_filter_planes, min_filter_planes, remove_hot_pixels};
