//! Punctum - 3D fluorescent spot feature extraction
//!
//! # Overview
//!
//! Given a raw intensity volume, a label volume of segmented objects and a
//! list of candidate spot centers, punctum measures each spot against its
//! own object:
//!
//! - Object cropping and frame conversion (region)
//! - Spheroid spot masks and distance transforms (morph)
//! - Hot-pixel removal, Gaussian blur and difference-of-Gaussians
//!   sharpening (filter)
//! - Distribution metrics, Welch t-test and effect sizes (stats)
//! - The per-spot feature table (features)
//!
//! # Example
//!
//! ```
//! use punctum::{Image, LabelVolume, SpotFeatureConfig, SpotRadii, Zyx, compute_spots_features};
//!
//! let shape = Zyx::new(4, 12, 12);
//! let labels = LabelVolume::new_with_value(shape, 3).unwrap();
//! let image = Image::from_fn(shape, |p| (p.x + p.y) as f32).unwrap();
//!
//! let config = SpotFeatureConfig::new(SpotRadii::new(1.0, 1.0, 1.0));
//! let table = compute_spots_features(&image, &[Zyx::new(2, 6, 6)], Some(&labels), None, &config).unwrap();
//! assert_eq!(table.cell_ids(), vec![3]);
//! assert_eq!(table.value(3, 0, "spot_raw_intensity_at_center"), Some(12.0));
//! ```

// Re-export core types (primary data structures used everywhere)
pub use punctum_core::*;

// Re-export domain crates as modules to avoid name conflicts
pub use punctum_features as features;
pub use punctum_filter as filter;
pub use punctum_morph as morph;
pub use punctum_region as region;
pub use punctum_stats as stats;

pub use punctum_features::{
    DistanceWeighting, FeatureError, FeatureTable, SpotFeatureConfig, compute_spots_features,
    compute_spots_features_with_progress,
};
pub use punctum_filter::PreprocessOptions;
pub use punctum_morph::SpotRadii;
