//! punctum-test - Regression test framework for punctum
//!
//! This crate provides the regression harness used by every crate's
//! `tests/*_reg.rs` files, plus builders for synthetic label volumes and
//! spot images.
//!
//! # Usage
//!
//! ```ignore
//! use punctum_test::{RegParams, cube_labels};
//!
//! let mut rp = RegParams::new("crop");
//! rp.compare_values(1000.0, obj.voxel_count as f64, 0.0);
//! assert!(rp.cleanup());
//! ```
//!
//! # Environment Variables
//!
//! - `REGTEST_MODE`: Set to "compare" or "display"

mod error;
mod params;
pub mod synthetic;

pub use error::{TestError, TestResult};
pub use params::{RegParams, RegTestMode};
pub use synthetic::{SyntheticCube, add_gaussian_spot, cube_labels, noisy_image};
