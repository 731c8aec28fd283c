//! # Light response of leaf photosynthesis
//!
//! Forward models of net CO₂ assimilation against photosynthetically active radiation (PAR),
//! together with the residual functions used to fit them to gas-exchange measurements.
//!
//! Units: PAR in µmol photons m⁻² s⁻¹, assimilation and respiration in µmol m⁻² s⁻¹.
use itertools::izip;
use serde::{Deserialize, Serialize};

use crate::ecoflux_errors::EcofluxError;

/// Curvature below which the non-rectangular hyperbola degenerates to a rectangular one.
const THETA_ZERO_TOL: f64 = 1e-8;

/// Parameters of the Michaelis–Menten light response.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MichaelisMentenParams {
    /// *K*<sub>PAR</sub>, Michaelis constant
    pub k_par: f64,
    /// *P*<sub>m</sub>, maximum gross photosynthetic rate
    pub p_max: f64,
    /// *R*<sub>d</sub>, daytime respiration rate
    pub r_d: f64,
}

impl MichaelisMentenParams {
    pub fn new(k_par: f64, p_max: f64, r_d: f64) -> Self {
        MichaelisMentenParams { k_par, p_max, r_d }
    }
}

/// Parameters of the non-rectangular hyperbola light response.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HyperbolicParams {
    /// *θ*, curvature parameter
    pub theta: f64,
    /// *α*, apparent quantum yield
    pub alpha: f64,
    /// *P*<sub>m</sub>, maximum gross photosynthetic rate
    pub p_max: f64,
    /// *R*<sub>d</sub>, daytime respiration rate
    pub r_d: f64,
}

impl HyperbolicParams {
    pub fn new(theta: f64, alpha: f64, p_max: f64, r_d: f64) -> Self {
        HyperbolicParams {
            theta,
            alpha,
            p_max,
            r_d,
        }
    }
}

/// Michaelis–Menten light response: `A = Pm·PAR / (K + PAR) − Rd`.
///
/// ```rust
/// use ecoflux::leaf::light_response::{michaelis_menten, MichaelisMentenParams};
///
/// let p = MichaelisMentenParams::new(500.0, 20.0, 2.0);
/// assert_eq!(michaelis_menten(&p, 1500.0), 13.0);
/// ```
pub fn michaelis_menten(p: &MichaelisMentenParams, par: f64) -> f64 {
    p.p_max * par / (p.k_par + par) - p.r_d
}

/// Residual of the Michaelis–Menten light response against a measured assimilation rate.
pub fn residual_michaelis_menten(p: &MichaelisMentenParams, par: f64, a_n: f64) -> f64 {
    michaelis_menten(p, par) - a_n
}

/// Non-rectangular hyperbola light response (Ögren & Evans, 1993).
///
/// ```text
/// A = (α·PAR + Pm − √((α·PAR + Pm)² − 4θ·α·PAR·Pm)) / (2θ) − Rd
/// ```
///
/// For `θ → 0` the rectangular hyperbola `α·Pm·PAR / (α·PAR + Pm) − Rd` is used.
///
/// References
/// ----------
/// * Ögren, E. and Evans, J. R. (1993). Photosynthetic light-response curves: I. The influence
///   of CO2 partial pressure and leaf inversion. *Planta*, 189, 182–190.
pub fn hyperbolic(p: &HyperbolicParams, par: f64) -> f64 {
    let light_limited = p.alpha * par;
    if p.theta.abs() <= THETA_ZERO_TOL {
        light_limited * p.p_max / (light_limited + p.p_max) - p.r_d
    } else {
        (light_limited + p.p_max
            - ((light_limited + p.p_max).powi(2) - 4.0 * p.theta * light_limited * p.p_max).sqrt())
            * 0.5
            / p.theta
            - p.r_d
    }
}

/// Residual of the non-rectangular hyperbola light response against a measured assimilation
/// rate.
pub fn residual_hyperbolic(p: &HyperbolicParams, par: f64, a_n: f64) -> f64 {
    hyperbolic(p, par) - a_n
}

/// Michaelis–Menten response evaluated over a PAR series.
pub fn michaelis_menten_curve(p: &MichaelisMentenParams, par: &[f64]) -> Vec<f64> {
    par.iter().map(|&q| michaelis_menten(p, q)).collect()
}

/// Non-rectangular hyperbola response evaluated over a PAR series.
pub fn hyperbolic_curve(p: &HyperbolicParams, par: &[f64]) -> Vec<f64> {
    par.iter().map(|&q| hyperbolic(p, q)).collect()
}

/// Michaelis–Menten residuals over paired PAR and assimilation series.
pub fn residuals_michaelis_menten(
    p: &MichaelisMentenParams,
    par: &[f64],
    a_n: &[f64],
) -> Result<Vec<f64>, EcofluxError> {
    check_paired(par, a_n)?;
    Ok(izip!(par, a_n)
        .map(|(&q, &a)| residual_michaelis_menten(p, q, a))
        .collect())
}

/// Non-rectangular hyperbola residuals over paired PAR and assimilation series.
pub fn residuals_hyperbolic(
    p: &HyperbolicParams,
    par: &[f64],
    a_n: &[f64],
) -> Result<Vec<f64>, EcofluxError> {
    check_paired(par, a_n)?;
    Ok(izip!(par, a_n)
        .map(|(&q, &a)| residual_hyperbolic(p, q, a))
        .collect())
}

fn check_paired(left: &[f64], right: &[f64]) -> Result<(), EcofluxError> {
    if left.len() != right.len() {
        return Err(EcofluxError::LengthMismatch {
            left: left.len(),
            right: right.len(),
        });
    }
    Ok(())
}
