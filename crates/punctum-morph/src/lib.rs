//! punctum-morph - Spot geometry for punctum
//!
//! This crate provides the geometric building blocks of spot measurement:
//!
//! - Spheroid masks sized from the expected spot radii
//! - The crop tolerance that keeps spheroids near object edges intact
//! - Euclidean distance transform of masks, raw and normalized
//! - Slice arithmetic for placing a small centered mask into a volume
//! - Spot/background split of an object crop

pub mod distance;
mod error;
pub mod masks;
pub mod slicing;
pub mod spheroid;

pub use error::{MorphError, MorphResult};

pub use distance::{distance_transform, normalized_distance_transform};
pub use masks::{SpotMasks, place_spheroids, spheroid_and_background_masks};
pub use slicing::slice_local_into_global;
pub use spheroid::{SpotRadii, expand_tolerance, local_spheroid_mask};
