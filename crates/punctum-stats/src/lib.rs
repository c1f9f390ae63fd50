//! punctum-stats - Statistics for spot measurements
//!
//! This crate provides the statistics computed for every spot:
//!
//! - A registry of distribution metrics (mean, sum, median, min, max, std
//!   and four percentiles) keyed by [`DistributionMetric`]
//! - Welch's two-sample t-test
//! - Effect sizes (Cohen, Hedges, Glass) keyed by [`EffectSizeMetric`]
//!
//! None of these fail on degenerate samples; they return NaN instead, so a
//! single odd spot never aborts a whole extraction.

pub mod distribution;
pub mod effect_size;
mod error;
pub mod ttest;

pub use error::{StatsError, StatsResult};

pub use distribution::{DistributionMetric, MetricFn, distribution_metrics, percentile};
pub use effect_size::{EffectSizeFn, EffectSizeMetric, cohen_d, glass_delta, hedges_g};
pub use ttest::{TTestResult, welch_ttest};
