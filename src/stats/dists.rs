//! Statistical distributions.
use crate::stats::summary::{finite_values, interquartile};

/// Optimal histogram bin size following the Freedman–Diaconis rule, `2·IQR / n^(1/3)`.
///
/// Only finite samples are counted; an empty finite sample gives `NaN`.
///
/// References
/// ----------
/// * Freedman, D. and Diaconis, P. (1981). On the histogram as a density estimator: L2 theory.
///   *Zeitschrift für Wahrscheinlichkeitstheorie und verwandte Gebiete*, 57(4), 453–476.
pub fn binsize(x: &[f64]) -> f64 {
    let finite = finite_values(x);
    interquartile(&finite) * 2.0 / (finite.len() as f64).powf(1.0 / 3.0)
}
