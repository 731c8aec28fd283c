//! # Linear regressions
//!
//! NaN-ignoring ordinary least squares, with a free or a zero intercept.
//!
//! Pairs where either member is non-finite are dropped before fitting. The p-value tests the
//! null hypothesis that the slope is zero with a two-sided Student's *t* test on `n − 2`
//! degrees of freedom.
use itertools::izip;
use nalgebra::DVector;
use serde::{Deserialize, Serialize};
use statrs::distribution::{ContinuousCDF, StudentsT};

use crate::ecoflux_errors::EcofluxError;

/// Guards the *t* statistic against a division by zero for a perfect correlation.
const TINY: f64 = 1.0e-20;

/// Result of a linear regression.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinregressResult {
    /// Slope of the regression line
    pub slope: f64,
    /// Intercept of the regression line
    pub intercept: f64,
    /// Pearson correlation coefficient
    pub rvalue: f64,
    /// Two-sided p-value for the null hypothesis that the slope is zero
    pub pvalue: f64,
    /// Standard error of the estimated slope
    pub stderr: f64,
}

/// Finite `(x, y)` pairs as two vectors.
fn finite_pairs(x: &[f64], y: &[f64]) -> Result<(DVector<f64>, DVector<f64>), EcofluxError> {
    if x.len() != y.len() {
        return Err(EcofluxError::LengthMismatch {
            left: x.len(),
            right: y.len(),
        });
    }
    let (xs, ys): (Vec<f64>, Vec<f64>) = izip!(x, y)
        .filter(|(a, b)| a.is_finite() && b.is_finite())
        .map(|(a, b)| (*a, *b))
        .unzip();
    Ok((DVector::from_vec(xs), DVector::from_vec(ys)))
}

fn require_samples(n: usize, needed: usize) -> Result<(), EcofluxError> {
    if n < needed {
        return Err(EcofluxError::NotEnoughFiniteSamples { needed, got: n });
    }
    Ok(())
}

/// Two-sided p-value of a *t* statistic with `df` degrees of freedom.
fn two_sided_pvalue(t: f64, df: f64) -> f64 {
    StudentsT::new(0.0, 1.0, df)
        .map(|dist| 2.0 * dist.sf(t.abs()))
        .unwrap_or(f64::NAN)
}

/// NaN-ignoring linear regression.
///
/// Arguments
/// ---------
/// * `x`, `y`: two sets of measurements of the same length
///
/// Return
/// ------
/// * the fitted [`LinregressResult`], or
///   - [`EcofluxError::LengthMismatch`] if `x` and `y` differ in length,
///   - [`EcofluxError::NotEnoughFiniteSamples`] with fewer than two finite pairs,
///   - [`EcofluxError::ConstantRegressor`] if all finite `x` are identical.
///
/// With exactly two pairs the line is exact: the standard error is zero and the p-value is
/// `1` for a flat line and `0` otherwise.
pub fn nanlinregress(x: &[f64], y: &[f64]) -> Result<LinregressResult, EcofluxError> {
    let (x, y) = finite_pairs(x, y)?;
    let n = x.len();
    require_samples(n, 2)?;

    let x_mean = x.mean();
    let y_mean = y.mean();
    let dx = x.add_scalar(-x_mean);
    let dy = y.add_scalar(-y_mean);

    let nf = n as f64;
    let ssxm = dx.dot(&dx) / nf;
    let ssym = dy.dot(&dy) / nf;
    let ssxym = dx.dot(&dy) / nf;

    if ssxm == 0.0 {
        return Err(EcofluxError::ConstantRegressor);
    }

    let rvalue = if ssym == 0.0 {
        0.0
    } else {
        (ssxym / (ssxm * ssym).sqrt()).clamp(-1.0, 1.0)
    };

    let slope = ssxym / ssxm;
    let intercept = y_mean - slope * x_mean;

    let (pvalue, stderr) = if n == 2 {
        let pvalue = if y[0] == y[1] { 1.0 } else { 0.0 };
        (pvalue, 0.0)
    } else {
        let df = (n - 2) as f64;
        let t = rvalue * (df / ((1.0 - rvalue + TINY) * (1.0 + rvalue + TINY))).sqrt();
        let stderr = ((1.0 - rvalue * rvalue) * ssym / ssxm / df).sqrt();
        (two_sided_pvalue(t, df), stderr)
    };

    Ok(LinregressResult {
        slope,
        intercept,
        rvalue,
        pvalue,
        stderr,
    })
}

/// Pearson correlation coefficient of two equally long vectors.
fn pearson(a: &DVector<f64>, b: &DVector<f64>) -> f64 {
    let da = a.add_scalar(-a.mean());
    let db = b.add_scalar(-b.mean());
    let r = da.dot(&db) / (da.dot(&da) * db.dot(&db)).sqrt();
    r.clamp(-1.0, 1.0)
}

/// Linear regression with the intercept forced at zero.
///
/// The slope is `Σxy / Σx²`, `rvalue` is the Pearson correlation between the observed and the
/// predicted `y`, and the standard error of the slope is
/// `√(Σ(ŷ − y)² / (df · Σ(x − x̄)²))` with `df = n − 2`.
///
/// Return
/// ------
/// * the fitted [`LinregressResult`] (with `intercept == 0`), or
///   - [`EcofluxError::LengthMismatch`] if `x` and `y` differ in length,
///   - [`EcofluxError::NotEnoughFiniteSamples`] with fewer than three finite pairs,
///   - [`EcofluxError::ConstantRegressor`] if all finite `x` are identical.
pub fn linreg_zerointercept(x: &[f64], y: &[f64]) -> Result<LinregressResult, EcofluxError> {
    let (x, y) = finite_pairs(x, y)?;
    let n = x.len();
    require_samples(n, 3)?;

    let dx = x.add_scalar(-x.mean());
    let ssx = dx.dot(&dx);
    if ssx == 0.0 {
        return Err(EcofluxError::ConstantRegressor);
    }

    let df = (n - 2) as f64;
    let slope = y.dot(&x) / x.dot(&x);
    let y_pred = &x * slope;
    let rvalue = pearson(&y, &y_pred);

    let residuals = &y_pred - &y;
    let stderr = (residuals.dot(&residuals) / (df * ssx)).sqrt();
    let pvalue = two_sided_pvalue(slope / stderr, df);

    Ok(LinregressResult {
        slope,
        intercept: 0.0,
        rvalue,
        pvalue,
        stderr,
    })
}
