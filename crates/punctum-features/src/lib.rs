//! punctum-features - Per-spot feature extraction
//!
//! Given a raw image, a label volume and candidate spot centers, this crate
//! measures every spot inside its object and returns a [`FeatureTable`]
//! keyed by (Cell_ID, spot_id):
//!
//! - intensity at the spot center and distribution metrics inside the spot
//!   spheroid for the preprocessed, sharp and raw channels
//! - distribution metrics of the object's background
//! - Welch t-test and effect sizes of the spot against the background on
//!   its z-plane
//!
//! # Example
//!
//! ```
//! use punctum_core::{Image, LabelVolume, Zyx};
//! use punctum_features::{SpotFeatureConfig, compute_spots_features};
//! use punctum_morph::SpotRadii;
//!
//! let shape = Zyx::new(5, 16, 16);
//! let labels = LabelVolume::new_with_value(shape, 1).unwrap();
//! let image = Image::new_with_value(shape, 100.0).unwrap();
//! let config = SpotFeatureConfig::new(SpotRadii::new(1.0, 2.0, 2.0));
//!
//! let table = compute_spots_features(&image, &[Zyx::new(2, 8, 8)], Some(&labels), None, &config).unwrap();
//! assert_eq!(table.len(), 1);
//! assert_eq!(table.value(1, 0, "spot_raw_intensity_at_center"), Some(100.0));
//! ```

pub mod config;
mod error;
pub mod extract;
pub mod normalize;
pub mod table;

pub use error::{FeatureError, FeatureResult};

pub use config::{DistanceWeighting, SpotFeatureConfig};
pub use extract::{compute_spots_features, compute_spots_features_with_progress};
pub use normalize::apply_distance_weighting;
pub use table::{FeatureRow, FeatureTable, feature_columns};
