//! Distribution summary metrics
//!
//! A fixed registry of named one-sample metrics. Each entry of
//! [`DistributionMetric`] maps to a plain function pointer, so the full set
//! can be evaluated in a loop and written out under stable column names.
//!
//! Empty samples yield NaN for every metric; `std` is the sample standard
//! deviation (n - 1 denominator) and is NaN below two values. Percentiles
//! interpolate linearly between order statistics.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{StatsError, StatsResult};

/// Signature shared by every one-sample metric
pub type MetricFn = fn(&[f64]) -> f64;

/// Named distribution metric
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DistributionMetric {
    Mean,
    Sum,
    Median,
    Min,
    Max,
    Std,
    Q05,
    Q25,
    Q75,
    Q95,
}

impl DistributionMetric {
    /// Every metric, in column order
    pub const ALL: [DistributionMetric; 10] = [
        DistributionMetric::Mean,
        DistributionMetric::Sum,
        DistributionMetric::Median,
        DistributionMetric::Min,
        DistributionMetric::Max,
        DistributionMetric::Std,
        DistributionMetric::Q05,
        DistributionMetric::Q25,
        DistributionMetric::Q75,
        DistributionMetric::Q95,
    ];

    /// Name used in column headers
    pub const fn name(self) -> &'static str {
        match self {
            Self::Mean => "mean",
            Self::Sum => "sum",
            Self::Median => "median",
            Self::Min => "min",
            Self::Max => "max",
            Self::Std => "std",
            Self::Q05 => "q05",
            Self::Q25 => "q25",
            Self::Q75 => "q75",
            Self::Q95 => "q95",
        }
    }

    /// Function computing this metric
    pub const fn func(self) -> MetricFn {
        match self {
            Self::Mean => mean,
            Self::Sum => sum,
            Self::Median => median,
            Self::Min => min,
            Self::Max => max,
            Self::Std => std,
            Self::Q05 => q05,
            Self::Q25 => q25,
            Self::Q75 => q75,
            Self::Q95 => q95,
        }
    }

    /// Evaluate the metric on `sample`
    #[inline]
    pub fn compute(self, sample: &[f64]) -> f64 {
        (self.func())(sample)
    }

    /// Column header `<prefix>_<name>` with an optional `_<suffix>`
    pub fn column_name(self, prefix: &str, suffix: Option<&str>) -> String {
        match suffix {
            Some(s) => format!("{}_{}_{}", prefix, self.name(), s),
            None => format!("{}_{}", prefix, self.name()),
        }
    }
}

impl fmt::Display for DistributionMetric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DistributionMetric {
    type Err = StatsError;

    fn from_str(s: &str) -> StatsResult<Self> {
        Self::ALL
            .into_iter()
            .find(|m| m.name() == s)
            .ok_or_else(|| StatsError::UnknownMetric(s.to_string()))
    }
}

/// Evaluate every metric on `sample` and name the results
/// `<prefix>_<metric>[_<suffix>]`, in [`DistributionMetric::ALL`] order.
pub fn distribution_metrics(sample: &[f64], prefix: &str, suffix: Option<&str>) -> Vec<(String, f64)> {
    DistributionMetric::ALL
        .into_iter()
        .map(|m| (m.column_name(prefix, suffix), m.compute(sample)))
        .collect()
}

/// Arithmetic mean
pub fn mean(sample: &[f64]) -> f64 {
    if sample.is_empty() {
        return f64::NAN;
    }
    sample.iter().sum::<f64>() / sample.len() as f64
}

/// Sum of all values
pub fn sum(sample: &[f64]) -> f64 {
    if sample.is_empty() {
        return f64::NAN;
    }
    sample.iter().sum()
}

/// Smallest value
pub fn min(sample: &[f64]) -> f64 {
    sample.iter().copied().reduce(f64::min).unwrap_or(f64::NAN)
}

/// Largest value
pub fn max(sample: &[f64]) -> f64 {
    sample.iter().copied().reduce(f64::max).unwrap_or(f64::NAN)
}

/// Sample variance with an n - 1 denominator
pub fn variance(sample: &[f64]) -> f64 {
    let n = sample.len();
    if n < 2 {
        return f64::NAN;
    }
    let m = mean(sample);
    sample.iter().map(|v| (v - m) * (v - m)).sum::<f64>() / (n - 1) as f64
}

/// Sample standard deviation
pub fn std(sample: &[f64]) -> f64 {
    variance(sample).sqrt()
}

/// Percentile `q` in `[0, 1]` with linear interpolation between order
/// statistics
pub fn percentile(sample: &[f64], q: f64) -> f64 {
    if sample.is_empty() || !(0.0..=1.0).contains(&q) {
        return f64::NAN;
    }
    let mut sorted = sample.to_vec();
    sorted.sort_by(f64::total_cmp);

    let pos = q * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    let frac = pos - lo as f64;
    sorted[lo] + (sorted[hi] - sorted[lo]) * frac
}

/// 50th percentile
pub fn median(sample: &[f64]) -> f64 {
    percentile(sample, 0.5)
}

fn q05(sample: &[f64]) -> f64 {
    percentile(sample, 0.05)
}

fn q25(sample: &[f64]) -> f64 {
    percentile(sample, 0.25)
}

fn q75(sample: &[f64]) -> f64 {
    percentile(sample, 0.75)
}

fn q95(sample: &[f64]) -> f64 {
    percentile(sample, 0.95)
}
