//! Standardized effect sizes of a sample against a reference
//!
//! All three measures need at least two values in each sample and a
//! non-zero spread; otherwise they are NaN.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::distribution::{mean, variance};
use crate::error::{StatsError, StatsResult};

/// Signature shared by every effect size: (sample, reference)
pub type EffectSizeFn = fn(&[f64], &[f64]) -> f64;

/// Named effect size
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EffectSizeMetric {
    /// Cohen's d, pooled standard deviation
    Cohen,
    /// Hedges' g, small-sample corrected Cohen's d
    Hedge,
    /// Glass's delta, reference standard deviation
    Glass,
}

impl EffectSizeMetric {
    /// Every effect size, in column order
    pub const ALL: [EffectSizeMetric; 3] = [Self::Cohen, Self::Hedge, Self::Glass];

    /// Name used in column headers
    pub const fn name(self) -> &'static str {
        match self {
            Self::Cohen => "cohen",
            Self::Hedge => "hedge",
            Self::Glass => "glass",
        }
    }

    /// Function computing this effect size
    pub const fn func(self) -> EffectSizeFn {
        match self {
            Self::Cohen => cohen_d,
            Self::Hedge => hedges_g,
            Self::Glass => glass_delta,
        }
    }

    /// Effect size of `sample` against `reference`
    #[inline]
    pub fn compute(self, sample: &[f64], reference: &[f64]) -> f64 {
        (self.func())(sample, reference)
    }
}

impl fmt::Display for EffectSizeMetric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for EffectSizeMetric {
    type Err = StatsError;

    fn from_str(s: &str) -> StatsResult<Self> {
        Self::ALL
            .into_iter()
            .find(|m| m.name() == s)
            .ok_or_else(|| StatsError::UnknownEffectSize(s.to_string()))
    }
}

fn ratio(num: f64, den: f64) -> f64 {
    if den > 0.0 && den.is_finite() { num / den } else { f64::NAN }
}

/// Cohen's d: mean difference over the pooled standard deviation
pub fn cohen_d(sample: &[f64], reference: &[f64]) -> f64 {
    let (n1, n2) = (sample.len(), reference.len());
    if n1 < 2 || n2 < 2 {
        return f64::NAN;
    }
    let pooled = (((n1 - 1) as f64 * variance(sample) + (n2 - 1) as f64 * variance(reference))
        / (n1 + n2 - 2) as f64)
        .sqrt();
    ratio(mean(sample) - mean(reference), pooled)
}

/// Hedges' g: Cohen's d times `1 - 3 / (4 (n1 + n2) - 9)`
pub fn hedges_g(sample: &[f64], reference: &[f64]) -> f64 {
    let n = (sample.len() + reference.len()) as f64;
    cohen_d(sample, reference) * (1.0 - 3.0 / (4.0 * n - 9.0))
}

/// Glass's delta: mean difference over the reference standard deviation
pub fn glass_delta(sample: &[f64], reference: &[f64]) -> f64 {
    if sample.len() < 2 || reference.len() < 2 {
        return f64::NAN;
    }
    ratio(mean(sample) - mean(reference), variance(reference).sqrt())
}
