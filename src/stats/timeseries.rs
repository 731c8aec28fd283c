//! # Time series
//!
//! Moving-window statistics, hourly binning and gap-filling of evenly or unevenly sampled
//! series.
//!
//! Moving windows are centered: a window of size `w` spans `(w − 1) / 2` samples to the left
//! and the remainder to the right. At the series edges, the window is padded by repeating the
//! first (or last) index.
use itertools::{izip, Itertools};
use serde::{Deserialize, Serialize};

use crate::{
    ecoflux_errors::EcofluxError,
    stats::summary::{nanmean, nanmedian, nanpercentiles, nanstd, zscore},
};

/// Number of hour levels of a full day
const HOURS_PER_DAY: u32 = 24;

/// Left and right half widths of a centered window.
fn window_halves(window_size: usize) -> (usize, usize) {
    let left = window_size.saturating_sub(1) / 2;
    let right = window_size.saturating_sub(1) - left;
    (left, right)
}

fn check_window(len: usize, window_size: usize) -> Result<(), EcofluxError> {
    if len < window_size {
        return Err(EcofluxError::WindowLargerThanSeries {
            window: window_size,
            len,
        });
    }
    Ok(())
}

/// Indices of the window centered at `i` in a series of length `n`.
///
/// The window always holds `left_size + right_size + 1` indices; positions falling before the
/// start repeat index `0` and positions past the end repeat index `n − 1`.
///
/// ```rust
/// use ecoflux::stats::timeseries::extract_window;
///
/// assert_eq!(extract_window(5, 0, 2, 2), vec![0, 0, 0, 1, 2]);
/// assert_eq!(extract_window(5, 4, 2, 2), vec![2, 3, 4, 4, 4]);
/// ```
pub fn extract_window(n: usize, i: usize, left_size: usize, right_size: usize) -> Vec<usize> {
    let last = n.saturating_sub(1);
    let start = i as isize - left_size as isize;
    let end = i as isize + right_size as isize;
    (start..=end)
        .map(|j| (j.max(0) as usize).min(last))
        .collect()
}

fn window_values(series: &[f64], i: usize, left: usize, right: usize) -> Vec<f64> {
    extract_window(series.len(), i, left, right)
        .into_iter()
        .map(|j| series[j])
        .collect()
}

/// Running sample standard deviation (ddof = 1) over a centered window.
///
/// Return
/// ------
/// * a series of the same length as the input, or
///   [`EcofluxError::WindowLargerThanSeries`] if the window is larger than the series.
pub fn running_std(series: &[f64], window_size: usize) -> Result<Vec<f64>, EcofluxError> {
    check_window(series.len(), window_size)?;
    let (left, right) = window_halves(window_size);
    Ok((0..series.len())
        .map(|i| nanstd(&window_values(series, i, left, right), 1))
        .collect())
}

/// Running Z-score over a centered window.
///
/// Each sample is scored against its own window; with `robust_zscore` the Iglewicz–Hoaglin
/// robust Z-score is used (see [`zscore`]).
pub fn running_zscore(
    series: &[f64],
    window_size: usize,
    robust_zscore: bool,
) -> Result<Vec<f64>, EcofluxError> {
    check_window(series.len(), window_size)?;
    let (left, right) = window_halves(window_size);
    Ok((0..series.len())
        .map(|i| zscore(&window_values(series, i, left, right), robust_zscore)[left])
        .collect())
}

/// Hourly binned medians and quartiles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HourlyMedianResult {
    pub hour_level: Vec<u32>,
    pub median: Vec<f64>,
    pub q1: Vec<f64>,
    pub q3: Vec<f64>,
}

/// Hourly binned averages and standard deviations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HourlyAverageResult {
    pub hour_level: Vec<u32>,
    pub avg: Vec<f64>,
    pub std: Vec<f64>,
}

/// Hour levels `0..24`, or the distinct hours present in `hours` in ascending order.
fn hour_levels(hours: &[u32], all_hours: bool) -> Vec<u32> {
    if all_hours {
        (0..HOURS_PER_DAY).collect()
    } else {
        hours.iter().copied().sorted_unstable().dedup().collect()
    }
}

/// Samples of `series` recorded at `hour`.
fn hour_bin(hours: &[u32], series: &[f64], hour: u32) -> Vec<f64> {
    izip!(hours, series)
        .filter(|(h, _)| **h == hour)
        .map(|(_, &v)| v)
        .collect()
}

fn check_paired(hours: &[u32], series: &[f64]) -> Result<(), EcofluxError> {
    if hours.len() != series.len() {
        return Err(EcofluxError::LengthMismatch {
            left: hours.len(),
            right: series.len(),
        });
    }
    Ok(())
}

/// Hourly binned medians and quartiles of a time series.
///
/// Arguments
/// ---------
/// * `hours`: hour number of each sample, same length as `series`
/// * `series`: the data
/// * `all_hours`: consider all 24 hours; otherwise only the hours present in `hours`
///
/// Hours without finite data get `NaN` statistics.
pub fn hourly_median(
    hours: &[u32],
    series: &[f64],
    all_hours: bool,
) -> Result<HourlyMedianResult, EcofluxError> {
    check_paired(hours, series)?;
    let hour_level = hour_levels(hours, all_hours);

    let mut median = Vec::with_capacity(hour_level.len());
    let mut q1 = Vec::with_capacity(hour_level.len());
    let mut q3 = Vec::with_capacity(hour_level.len());
    for &hour in &hour_level {
        let bin = hour_bin(hours, series, hour);
        median.push(nanmedian(&bin));
        let quartiles = nanpercentiles(&bin, &[25.0, 75.0]);
        q1.push(quartiles[0]);
        q3.push(quartiles[1]);
    }

    Ok(HourlyMedianResult {
        hour_level,
        median,
        q1,
        q3,
    })
}

/// Hourly binned averages and standard deviations (with `ddof` delta degrees of freedom) of a
/// time series.
pub fn hourly_avg(
    hours: &[u32],
    series: &[f64],
    all_hours: bool,
    ddof: usize,
) -> Result<HourlyAverageResult, EcofluxError> {
    check_paired(hours, series)?;
    let hour_level = hour_levels(hours, all_hours);

    let (avg, std): (Vec<f64>, Vec<f64>) = hour_level
        .iter()
        .map(|&hour| {
            let bin = hour_bin(hours, series, hour);
            (nanmean(&bin), nanstd(&bin, ddof))
        })
        .unzip();

    Ok(HourlyAverageResult {
        hour_level,
        avg,
        std,
    })
}

/// Piecewise-linear interpolant through the points `(xp, fp)`, `xp` increasing.
///
/// Outside `[xp[0], xp[last]]` the `left` / `right` values are returned, defaulting to the
/// first / last `fp`.
fn interp(x: f64, xp: &[f64], fp: &[f64], left: f64, right: f64) -> f64 {
    let last = xp.len() - 1;
    if x.is_nan() {
        return x;
    }
    if x < xp[0] {
        return left;
    }
    if x > xp[last] {
        return right;
    }
    if x == xp[last] {
        return fp[last];
    }

    let j = xp.partition_point(|&v| v <= x).saturating_sub(1).min(last - 1);
    if x == xp[j] {
        return fp[j];
    }
    let slope = (fp[j + 1] - fp[j]) / (xp[j + 1] - xp[j]);
    let value = slope * (x - xp[j]) + fp[j];
    if !value.is_nan() {
        return value;
    }
    let value = slope * (x - xp[j + 1]) + fp[j + 1];
    if value.is_nan() && fp[j] == fp[j + 1] {
        fp[j]
    } else {
        value
    }
}

/// Linear gap-filling of a time series.
///
/// Non-finite `y` are replaced by the linear interpolation between the surrounding finite
/// samples; finite samples are kept as is.
///
/// Arguments
/// ---------
/// * `x`: the time variable, increasing
/// * `y`: the series to fill, same length as `x`
/// * `left`, `right`: values used before the first / after the last finite sample, defaulting
///   to that sample's value
///
/// Return
/// ------
/// * the gap-filled series, or
///   - [`EcofluxError::LengthMismatch`] if `x` and `y` differ in length,
///   - [`EcofluxError::NotEnoughFiniteSamples`] if `y` has no finite value.
pub fn simple_gapfill(
    x: &[f64],
    y: &[f64],
    left: Option<f64>,
    right: Option<f64>,
) -> Result<Vec<f64>, EcofluxError> {
    if x.len() != y.len() {
        return Err(EcofluxError::LengthMismatch {
            left: x.len(),
            right: y.len(),
        });
    }

    let (xp, fp): (Vec<f64>, Vec<f64>) = izip!(x, y)
        .filter(|(_, v)| v.is_finite())
        .map(|(t, v)| (*t, *v))
        .unzip();

    let (Some(&first), Some(&last)) = (fp.first(), fp.last()) else {
        return Err(EcofluxError::NotEnoughFiniteSamples { needed: 1, got: 0 });
    };
    let left = left.unwrap_or(first);
    let right = right.unwrap_or(last);

    Ok(x.iter()
        .map(|&t| interp(t, &xp, &fp, left, right))
        .collect())
}

#[cfg(test)]
mod timeseries_test {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_extract_window() {
        assert_eq!(extract_window(5, 0, 1, 1), vec![0, 0, 1]);
        assert_eq!(extract_window(5, 2, 1, 1), vec![1, 2, 3]);
        assert_eq!(extract_window(5, 4, 1, 2), vec![3, 4, 4, 4]);
        assert_eq!(extract_window(5, 1, 2, 1), vec![0, 0, 1, 2]);
    }

    #[test]
    fn test_running_std() {
        let series = [1.0, 2.0, 3.0, 4.0, 5.0];
        let std = running_std(&series, 3).unwrap();
        let edge = (1.0_f64 / 3.0).sqrt();
        assert_relative_eq!(std[0], edge, max_relative = 1e-14);
        assert_relative_eq!(std[1], 1.0, max_relative = 1e-14);
        assert_relative_eq!(std[3], 1.0, max_relative = 1e-14);
        assert_relative_eq!(std[4], edge, max_relative = 1e-14);

        assert_eq!(
            running_std(&[1.0, 2.0], 3),
            Err(EcofluxError::WindowLargerThanSeries { window: 3, len: 2 })
        );
    }

    #[test]
    fn test_running_zscore() {
        let series = [1.0, 2.0, 3.0, 4.0, 5.0];
        let z = running_zscore(&series, 3, false).unwrap();
        assert_relative_eq!(z[0], -(1.0_f64 / 3.0).sqrt(), max_relative = 1e-14);
        assert_eq!(z[2], 0.0);

        let rz = running_zscore(&series, 3, true).unwrap();
        assert_eq!(rz[2], 0.0);
        // zero MAD at the padded edge
        assert!(rz[0].is_nan());

        assert!(running_zscore(&series, 6, true).is_err());
    }

    #[test]
    fn test_hourly_median() {
        let hours = [0, 0, 1, 1, 1, 5];
        let series = [1.0, 3.0, 2.0, 4.0, f64::NAN, 7.0];

        let res = hourly_median(&hours, &series, false).unwrap();
        assert_eq!(res.hour_level, vec![0, 1, 5]);
        assert_eq!(res.median, vec![2.0, 3.0, 7.0]);
        assert_eq!(res.q1, vec![1.5, 2.5, 7.0]);
        assert_eq!(res.q3, vec![2.5, 3.5, 7.0]);

        let full = hourly_median(&hours, &series, true).unwrap();
        assert_eq!(full.hour_level.len(), 24);
        assert_eq!(full.median[5], 7.0);
        assert!(full.median[2].is_nan());
        assert!(full.q3[23].is_nan());
    }

    #[test]
    fn test_hourly_avg() {
        let hours = [0, 0, 1, 1, 1, 5];
        let series = [1.0, 3.0, 2.0, 4.0, f64::NAN, 7.0];

        let res = hourly_avg(&hours, &series, false, 1).unwrap();
        assert_eq!(res.avg, vec![2.0, 3.0, 7.0]);
        assert_relative_eq!(res.std[0], 2.0_f64.sqrt(), max_relative = 1e-14);
        assert_relative_eq!(res.std[1], 2.0_f64.sqrt(), max_relative = 1e-14);
        assert!(res.std[2].is_nan());

        let population = hourly_avg(&hours, &series, false, 0).unwrap();
        assert_eq!(population.std, vec![1.0, 1.0, 0.0]);

        assert_eq!(
            hourly_avg(&hours, &series[..3], true, 1),
            Err(EcofluxError::LengthMismatch { left: 6, right: 3 })
        );
    }

    #[test]
    fn test_simple_gapfill() {
        let x = [0.0, 1.0, 2.0, 3.0, 4.0];
        let y = [f64::NAN, 1.0, f64::NAN, 3.0, f64::NAN];
        assert_eq!(
            simple_gapfill(&x, &y, None, None).unwrap(),
            vec![1.0, 1.0, 2.0, 3.0, 3.0]
        );
        assert_eq!(
            simple_gapfill(&x, &y, Some(0.0), Some(-1.0)).unwrap(),
            vec![0.0, 1.0, 2.0, 3.0, -1.0]
        );

        let uneven = [0.0, 0.5, 2.0];
        assert_eq!(
            simple_gapfill(&uneven, &[0.0, f64::NAN, 4.0], None, None).unwrap(),
            vec![0.0, 1.0, 4.0]
        );

        assert_eq!(
            simple_gapfill(&x, &[f64::NAN; 5], None, None),
            Err(EcofluxError::NotEnoughFiniteSamples { needed: 1, got: 0 })
        );
    }
}
