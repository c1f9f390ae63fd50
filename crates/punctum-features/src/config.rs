//! Feature extraction configuration

use punctum_filter::PreprocessOptions;
use punctum_morph::SpotRadii;
use serde::{Deserialize, Serialize};

use crate::error::{FeatureError, FeatureResult};

/// How the sharp spot plane is reweighted by the spheroid's distance
/// transform before it is compared with the background
///
/// Weights `w` are the spheroid's normalized distance transform projected
/// over z, 1 at the spot center and falling to 0 at its rim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DistanceWeighting {
    /// `b + (v - b) * w`, with `b` the median of the spot-plane background
    /// (the slice minimum when there is no background on that plane)
    #[default]
    Range,
    /// `v * w`
    Simple,
    /// Values are used as they are
    None,
}

/// Feature extraction configuration
///
/// All fields have defaults, so a serialized configuration only needs the
/// fields it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpotFeatureConfig {
    /// Expected spot radii in voxels, (z, y, x)
    pub radii: SpotRadii,
    /// Distance-transform weighting of the sharp spot plane
    pub distance_weighting: DistanceWeighting,
    /// Filters applied to the raw channel to get the preprocessed channel
    pub preprocess: PreprocessOptions,
    /// Build the sharp channel with a difference of Gaussians when the
    /// caller supplies none
    pub sharpen_with_dog: bool,
    /// Process objects on the rayon pool
    pub parallel: bool,
}

impl Default for SpotFeatureConfig {
    fn default() -> Self {
        Self {
            radii: SpotRadii::default(),
            distance_weighting: DistanceWeighting::default(),
            preprocess: PreprocessOptions::default(),
            sharpen_with_dog: false,
            parallel: false,
        }
    }
}

impl SpotFeatureConfig {
    /// Create a configuration for the given spot radii
    pub fn new(radii: SpotRadii) -> Self {
        Self {
            radii,
            ..Self::default()
        }
    }

    /// Set the spot radii
    pub fn with_radii(mut self, radii: SpotRadii) -> Self {
        self.radii = radii;
        self
    }

    /// Set the distance weighting
    pub fn with_distance_weighting(mut self, weighting: DistanceWeighting) -> Self {
        self.distance_weighting = weighting;
        self
    }

    /// Set the preprocessing options
    pub fn with_preprocess(mut self, options: PreprocessOptions) -> Self {
        self.preprocess = options;
        self
    }

    /// Set difference-of-Gaussians sharpening
    pub fn with_sharpen_with_dog(mut self, enable: bool) -> Self {
        self.sharpen_with_dog = enable;
        self
    }

    /// Set parallel object processing
    pub fn with_parallel(mut self, enable: bool) -> Self {
        self.parallel = enable;
        self
    }

    /// Check the configuration
    ///
    /// # Errors
    ///
    /// Returns `FeatureError::InvalidRadii` for non-positive or non-finite
    /// radii, `FeatureError::Filter` for invalid preprocessing options.
    pub fn validate(&self) -> FeatureResult<()> {
        if self.radii.validate().is_err() {
            return Err(FeatureError::InvalidRadii {
                z: self.radii.z,
                y: self.radii.y,
                x: self.radii.x,
            });
        }
        self.preprocess.validate()?;
        Ok(())
    }
}
