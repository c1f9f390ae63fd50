//! punctum-region - Region processing for punctum
//!
//! This crate provides region processing functionality including:
//!
//! - **Region properties** - Bounding box, centroid and size per label
//! - **Connected component analysis** - 6/26-connected 3D labeling
//! - **Object cropping** - Dilated per-object crops and frame conversion
//! - **Shape normalization** - Promoting 2D inputs to 3D volumes
//!
//! # Examples
//!
//! ```
//! use punctum_core::{LabelVolume, Zyx};
//! use punctum_region::{expanded_object_slice, region_props};
//!
//! let labels = LabelVolume::from_fn(Zyx::new(4, 8, 8), |p| {
//!     (p.y >= 2 && p.y < 5 && p.x >= 2 && p.x < 5) as u32
//! })
//! .unwrap();
//!
//! let objects = region_props(&labels);
//! assert_eq!(objects.len(), 1);
//!
//! let crop = expanded_object_slice(&objects[0], Zyx::new(1, 1, 1), &labels).unwrap();
//! assert_eq!(crop.offset(), Zyx::new(0, 1, 1));
//! ```

pub mod conncomp;
pub mod crop;
pub mod error;
pub mod props;
pub mod reshape;

// Re-export core types
pub use punctum_core;

// Re-export error types
pub use error::{RegionError, RegionResult};

pub use conncomp::{Connectivity, filter_largest_sub_object, label_connected_components};
pub use crop::{ExpandedObjectSlice, expanded_object_slice, to_local_coords};
pub use props::{ObjectProps, object_mask_in, object_props, region_props};
pub use reshape::{RawArray, check_shapes, reshape_lab_image_to_3d, single_object_labels};
