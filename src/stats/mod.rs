//! # Statistics
//!
//! NaN-aware statistics for flux measurements.
//!
//! - [`summary`] – moments, percentiles, robust estimators and outlier tests.
//! - [`dists`] – histogram bin sizes.
//! - [`regressions`] – linear regressions with a free or zero intercept.
//! - [`timeseries`] – moving-window statistics, hourly binning and gap-filling.
pub mod dists;
pub mod regressions;
pub mod summary;
pub mod timeseries;
