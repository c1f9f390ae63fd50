//! Two-sample Welch t-test

use serde::{Deserialize, Serialize};
use statrs::distribution::{ContinuousCDF, StudentsT};

use crate::distribution::{mean, variance};

/// Outcome of a two-sample test
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TTestResult {
    /// t statistic, positive when the first sample has the larger mean
    pub statistic: f64,
    /// Two-sided p-value
    pub pvalue: f64,
}

impl TTestResult {
    /// Result of a test that could not be computed
    pub const NAN: TTestResult = TTestResult {
        statistic: f64::NAN,
        pvalue: f64::NAN,
    };
}

/// Welch's unequal-variance t-test of `a` against `b`.
///
/// Degrees of freedom follow Welch-Satterthwaite; the p-value is two-sided
/// from Student's t distribution.
///
/// # Returns
///
/// [`TTestResult::NAN`] when either sample has fewer than two values or the
/// standard error is zero.
pub fn welch_ttest(a: &[f64], b: &[f64]) -> TTestResult {
    if a.len() < 2 || b.len() < 2 {
        return TTestResult::NAN;
    }
    let (n1, n2) = (a.len() as f64, b.len() as f64);
    let va = variance(a) / n1;
    let vb = variance(b) / n2;
    let se2 = va + vb;
    if !(se2 > 0.0) || !se2.is_finite() {
        return TTestResult::NAN;
    }

    let statistic = (mean(a) - mean(b)) / se2.sqrt();
    let df = se2 * se2 / (va * va / (n1 - 1.0) + vb * vb / (n2 - 1.0));
    let pvalue = match StudentsT::new(0.0, 1.0, df) {
        Ok(dist) => (2.0 * dist.sf(statistic.abs())).min(1.0),
        Err(_) => f64::NAN,
    };
    TTestResult { statistic, pvalue }
}
