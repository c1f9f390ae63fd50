//! Distance-transform weighting of sharp spot values

use punctum_stats::distribution::{median, min};

use crate::config::DistanceWeighting;

/// Reweight the sharp spot plane `values` by `weights` (same length).
///
/// `background` is the spot-plane background sample; only
/// [`DistanceWeighting::Range`] uses it, as the level that values are pulled
/// towards where the weight drops.
pub fn apply_distance_weighting(
    values: &[f64],
    weights: &[f64],
    background: &[f64],
    mode: DistanceWeighting,
) -> Vec<f64> {
    match mode {
        DistanceWeighting::None => values.to_vec(),
        DistanceWeighting::Simple => values.iter().zip(weights).map(|(v, w)| v * w).collect(),
        DistanceWeighting::Range => {
            let base = if background.is_empty() {
                min(values)
            } else {
                median(background)
            };
            values
                .iter()
                .zip(weights)
                .map(|(v, w)| base + (v - base) * w)
                .collect()
        }
    }
}
