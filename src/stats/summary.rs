//! # Summary statistics
//!
//! NaN-aware moments and percentiles, robust location/scale estimators and outlier tests
//! for flux data.
//!
//! The `nan*` helpers ignore `NaN` samples and keep infinities; the robust estimators and
//! Dixon's test work on the finite samples. A statistic of an empty sample is `NaN`.
//!
//! ## Robust estimators
//!
//! - [`mad`] – median absolute deviation
//! - [`zscore`] – classical or Iglewicz–Hoaglin robust Z-score
//! - [`interquartile`] – interquartile range
//! - [`resist_mean`] / [`resist_std`] – mean and standard deviation inside Tukey's fences
//! - [`dixon_test`] – Dixon's Q test for one or two outliers
//!
//! ## References
//!
//! - Iglewicz, B. and Hoaglin, D. C. (1993). *How to Detect and Handle Outliers*. ASQC Quality
//!   Press, Milwaukee, WI.
//! - Tukey, J. W. (1977). *Exploratory Data Analysis*. Addison-Wesley.
//! - Dean, R. B. and Dixon, W. J. (1951). Simplified Statistics for Small Numbers of
//!   Observations. *Anal. Chem.*, 23(4), 636–638.
//! - Rorabacher, D. B. (1991). Statistical Treatment for Rejection of Deviant Values: Critical
//!   Values of Dixon Q Parameter and Related Subrange Ratios at the 95 percent Confidence
//!   Level. *Anal. Chem.*, 63(2), 139–146.
use std::str::FromStr;

use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::ecoflux_errors::EcofluxError;

// -------------------------------------------------------------------------------------------------
// NaN-aware primitives
// -------------------------------------------------------------------------------------------------

/// Finite samples of `x`, in their original order.
pub fn finite_values(x: &[f64]) -> Vec<f64> {
    x.iter().copied().filter(|v| v.is_finite()).collect()
}

/// Samples of `x` that are not `NaN`; infinities are kept.
fn non_nan_values(x: &[f64]) -> Vec<f64> {
    x.iter().copied().filter(|v| !v.is_nan()).collect()
}

/// Mean of the non-`NaN` samples.
pub fn nanmean(x: &[f64]) -> f64 {
    let values = non_nan_values(x);
    if values.is_empty() {
        return f64::NAN;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Standard deviation of the non-`NaN` samples with `ddof` delta degrees of freedom.
///
/// `NaN` if there are no more than `ddof` such samples.
pub fn nanstd(x: &[f64], ddof: usize) -> f64 {
    let values = non_nan_values(x);
    if values.len() <= ddof {
        return f64::NAN;
    }
    let mean = values.iter().sum::<f64>() / values.len() as f64;
    let sum_sq = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>();
    (sum_sq / (values.len() - ddof) as f64).sqrt()
}

/// Linear interpolation between `a` and `b`, evaluated from the nearest end point.
fn lerp(a: f64, b: f64, t: f64) -> f64 {
    let diff = b - a;
    if t >= 0.5 {
        b - diff * (1.0 - t)
    } else {
        a + diff * t
    }
}

/// Percentile of an already sorted sample (linear interpolation between ranks).
///
/// `NaN` for an empty sample or a `q` outside `[0, 100]`.
fn sorted_percentile(sorted: &[f64], q: f64) -> f64 {
    if sorted.is_empty() || !(0.0..=100.0).contains(&q) {
        return f64::NAN;
    }
    let rank = q / 100.0 * (sorted.len() - 1) as f64;
    let lo = rank.floor() as usize;
    let hi = (rank.ceil() as usize).min(sorted.len() - 1);
    lerp(sorted[lo], sorted[hi], rank - lo as f64)
}

fn sorted_finite(x: &[f64]) -> Vec<f64> {
    x.iter()
        .copied()
        .filter(|v| v.is_finite())
        .sorted_by(|a, b| a.total_cmp(b))
        .collect()
}

fn sorted_non_nan(x: &[f64]) -> Vec<f64> {
    non_nan_values(x)
        .into_iter()
        .sorted_by(|a, b| a.total_cmp(b))
        .collect()
}

/// `q`-th percentile of the non-`NaN` samples, linearly interpolated between the closest
/// ranks.
///
/// `q` must lie in `[0, 100]`; any other value (or an empty sample) gives `NaN`.
pub fn nanpercentile(x: &[f64], q: f64) -> f64 {
    sorted_percentile(&sorted_non_nan(x), q)
}

/// Several percentiles of the non-`NaN` samples, sorting them only once.
pub fn nanpercentiles(x: &[f64], qs: &[f64]) -> Vec<f64> {
    let sorted = sorted_non_nan(x);
    qs.iter().map(|&q| sorted_percentile(&sorted, q)).collect()
}

/// Median of the non-`NaN` samples.
pub fn nanmedian(x: &[f64]) -> f64 {
    nanpercentile(x, 50.0)
}

/// First and third quartiles of the non-`NaN` samples.
fn quartiles(x: &[f64]) -> (f64, f64) {
    let sorted = sorted_non_nan(x);
    (
        sorted_percentile(&sorted, 25.0),
        sorted_percentile(&sorted, 75.0),
    )
}

// -------------------------------------------------------------------------------------------------
// Robust statistics
// -------------------------------------------------------------------------------------------------

/// Median absolute deviation of the sample.
pub fn mad(x: &[f64]) -> f64 {
    let median = nanmedian(x);
    let deviations = x.iter().map(|v| (v - median).abs()).collect_vec();
    nanmedian(&deviations)
}

/// Z-score of every sample.
///
/// With `robust_zscore`, the Iglewicz–Hoaglin robust Z-score `0.6745·(x − median) / MAD` is
/// returned instead of `(x − mean) / std` (sample standard deviation). Non-finite samples map
/// to non-finite scores.
pub fn zscore(x: &[f64], robust_zscore: bool) -> Vec<f64> {
    if robust_zscore {
        let median = nanmedian(x);
        let mad = mad(x);
        x.iter().map(|v| 0.6745 * (v - median) / mad).collect()
    } else {
        let mean = nanmean(x);
        let std = nanstd(x, 1);
        x.iter().map(|v| (v - mean) / std).collect()
    }
}

/// Interquartile range of the sample; `NaN` if it has no finite value.
pub fn interquartile(x: &[f64]) -> f64 {
    if finite_values(x).is_empty() {
        return f64::NAN;
    }
    let (q1, q3) = quartiles(x);
    q3 - q1
}

/// Tukey's fences: samples inside `[Q1 − k·IQR, Q3 + k·IQR]` are inliers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TukeyFence {
    /// The factor `k` applied to the interquartile range
    pub inlier_range: f64,
}

impl Default for TukeyFence {
    fn default() -> Self {
        TukeyFence { inlier_range: 1.5 }
    }
}

impl TukeyFence {
    /// Inlier limits `(lower, upper)` of the sample.
    pub fn limits(&self, x: &[f64]) -> (f64, f64) {
        let (q1, q3) = quartiles(x);
        let iqr = q3 - q1;
        (q1 - self.inlier_range * iqr, q3 + self.inlier_range * iqr)
    }

    /// Samples of `x` lying within the fences.
    pub fn inliers(&self, x: &[f64]) -> Vec<f64> {
        let (lower, upper) = self.limits(x);
        x.iter()
            .copied()
            .filter(|&v| v >= lower && v <= upper)
            .collect()
    }
}

/// Outlier-resistant mean of the sample using Tukey's outlier test.
///
/// Falls back to the plain mean when there is at most one finite sample.
pub fn resist_mean(x: &[f64], fence: TukeyFence) -> f64 {
    if finite_values(x).len() <= 1 {
        return nanmean(x);
    }
    nanmean(&fence.inliers(x))
}

/// Outlier-resistant sample standard deviation (ddof = 1) using Tukey's outlier test.
pub fn resist_std(x: &[f64], fence: TukeyFence) -> f64 {
    if finite_values(x).len() <= 1 {
        return nanstd(x, 1);
    }
    nanstd(&fence.inliers(x), 1)
}

// -------------------------------------------------------------------------------------------------
// Dixon's Q test
// -------------------------------------------------------------------------------------------------

/// Smallest sample size accepted by Dixon's Q test
pub const DIXON_MIN_SIZE: usize = 3;

const Q90: [f64; 28] = [
    0.941, 0.765, 0.642, 0.560, 0.507, 0.468, 0.437, 0.412, 0.392, 0.376, 0.361, 0.349, 0.338,
    0.329, 0.320, 0.313, 0.306, 0.300, 0.295, 0.290, 0.285, 0.281, 0.277, 0.273, 0.269, 0.266,
    0.263, 0.260,
];

const Q95: [f64; 28] = [
    0.970, 0.829, 0.710, 0.625, 0.568, 0.526, 0.493, 0.466, 0.444, 0.426, 0.410, 0.396, 0.384,
    0.374, 0.365, 0.356, 0.349, 0.342, 0.337, 0.331, 0.326, 0.321, 0.317, 0.312, 0.308, 0.305,
    0.301, 0.290,
];

const Q99: [f64; 28] = [
    0.994, 0.926, 0.821, 0.740, 0.680, 0.634, 0.598, 0.568, 0.542, 0.522, 0.503, 0.488, 0.475,
    0.463, 0.452, 0.442, 0.433, 0.425, 0.418, 0.411, 0.404, 0.399, 0.393, 0.388, 0.384, 0.380,
    0.376, 0.372,
];

/// Confidence level of Dixon's Q test.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum QConfidence {
    Q90,
    #[default]
    Q95,
    Q99,
}

impl QConfidence {
    /// Critical Q values for sample sizes 3, 4, … 30.
    fn table(self) -> &'static [f64; 28] {
        match self {
            QConfidence::Q90 => &Q90,
            QConfidence::Q95 => &Q95,
            QConfidence::Q99 => &Q99,
        }
    }

    /// Largest sample size with a tabulated critical value.
    pub fn max_size(self) -> usize {
        self.table().len() + DIXON_MIN_SIZE - 1
    }

    /// Critical Q value for a sample of size `n`, if tabulated.
    pub fn critical_value(self, n: usize) -> Option<f64> {
        n.checked_sub(DIXON_MIN_SIZE)
            .and_then(|i| self.table().get(i).copied())
    }
}

impl FromStr for QConfidence {
    type Err = EcofluxError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "q90" => Ok(QConfidence::Q90),
            "q95" => Ok(QConfidence::Q95),
            "q99" => Ok(QConfidence::Q99),
            other => Err(EcofluxError::InvalidConfidenceLevel(other.to_string())),
        }
    }
}

/// Which extremes of the sample Dixon's Q test examines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DixonTails {
    /// Test the minimum value
    pub left: bool,
    /// Test the maximum value
    pub right: bool,
}

impl Default for DixonTails {
    fn default() -> Self {
        DixonTails {
            left: true,
            right: true,
        }
    }
}

/// Outliers detected by Dixon's Q test; `None` where the tested extreme is not an outlier.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct DixonOutliers {
    pub min: Option<f64>,
    pub max: Option<f64>,
}

/// Use Dixon's Q test to identify one or two outliers.
///
/// The test assumes normally distributed data and may only be applied once to a dataset.
/// Non-finite samples are discarded first. An extreme is an outlier when its gap ratio exceeds
/// the critical value and is not smaller than the ratio of the opposite extreme.
///
/// Arguments
/// ---------
/// * `x`: the sample, 3 to 30 finite values
/// * `tails`: extremes to test (at least one)
/// * `q_conf`: confidence level
///
/// Return
/// ------
/// * the [`DixonOutliers`], or
///   - [`EcofluxError::SampleTooSmall`] / [`EcofluxError::SampleTooLarge`] for unsupported sizes,
///   - [`EcofluxError::NoTailSelected`] if neither tail is tested.
pub fn dixon_test(
    x: &[f64],
    tails: DixonTails,
    q_conf: QConfidence,
) -> Result<DixonOutliers, EcofluxError> {
    let sorted = sorted_finite(x);
    let n = sorted.len();

    if n < DIXON_MIN_SIZE {
        return Err(EcofluxError::SampleTooSmall {
            min: DIXON_MIN_SIZE,
            got: n,
        });
    }
    let q_crit = q_conf
        .critical_value(n)
        .ok_or(EcofluxError::SampleTooLarge {
            max: q_conf.max_size(),
            got: n,
        })?;

    if !(tails.left || tails.right) {
        return Err(EcofluxError::NoTailSelected);
    }

    let range = sorted[n - 1] - sorted[0];
    if range == 0.0 {
        return Ok(DixonOutliers::default());
    }

    let q_min = ((sorted[1] - sorted[0]) / range).abs();
    let q_max = ((sorted[n - 1] - sorted[n - 2]) / range).abs();

    Ok(DixonOutliers {
        min: (tails.left && q_min > q_crit && q_min >= q_max).then_some(sorted[0]),
        max: (tails.right && q_max > q_crit && q_max >= q_min).then_some(sorted[n - 1]),
    })
}
