//! # Saturation vapor pressure of water
//!
//! Saturation vapor pressure over liquid water or ice, and its inversion into a dew
//! temperature.
//!
//! ## Methods
//!
//! - [`SatVapMethod::GoffGratch`] (`"gg"`, default) – Goff & Gratch (1946)
//! - [`SatVapMethod::Buck`] (`"buck"`) – Buck Research Instruments L.L.C. (1996)
//! - [`SatVapMethod::Cimo`] (`"cimo"`) – WMO CIMO Guide (2008), Appendix 4B
//!
//! ```rust
//! use ecoflux::physchem::sat_vap::{p_sat_h2o, SatVapMethod};
//!
//! let method: SatVapMethod = "buck".parse().unwrap();
//! let e_sat = p_sat_h2o(25.0, false, false, method).unwrap();
//! assert!((e_sat - 3168.53).abs() < 0.01);
//! ```
//!
//! ## References
//!
//! - Goff, J. A., and Gratch, S. (1946). Low-pressure properties of water from −160 to 212 F,
//!   in *Transactions of the American Society of Heating and Ventilating Engineers*, pp 95–122.
//! - Buck Research Instruments L.L.C. (1996). *Buck Research CR-1A User's Manual*, Appendix 1.
//! - World Meteorological Organization (2008). *Guide to Meteorological Instruments and Methods
//!   of Observation*, Appendix 4B, WMO-No. 8 (CIMO Guide), Geneva.
use std::str::FromStr;

use roots::{find_root_newton_raphson, SimpleConvergency};
use serde::{Deserialize, Serialize};

use crate::{
    constants::{Kelvin, Pascal, T_TRIPLE, ZERO_CELSIUS},
    ecoflux_errors::EcofluxError,
};

/// Empirical formula used to evaluate the saturation vapor pressure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SatVapMethod {
    #[default]
    GoffGratch,
    Buck,
    Cimo,
}

impl FromStr for SatVapMethod {
    type Err = EcofluxError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "gg" | "goff-gratch" => Ok(SatVapMethod::GoffGratch),
            "buck" => Ok(SatVapMethod::Buck),
            "cimo" => Ok(SatVapMethod::Cimo),
            other => Err(EcofluxError::InvalidSatVapMethod(other.to_string())),
        }
    }
}

fn to_kelvin(temp: f64, kelvin: bool) -> Kelvin {
    if kelvin {
        temp
    } else {
        temp + ZERO_CELSIUS
    }
}

/// Saturation vapor pressure over liquid water \[Pa\] at `t_k` Kelvin.
pub(crate) fn e_sat_over_water(t_k: Kelvin, method: SatVapMethod) -> Pascal {
    match method {
        SatVapMethod::Buck => {
            let t_c = t_k - ZERO_CELSIUS;
            6.1121 * ((18.678 - t_c / 234.5) * t_c / (257.14 + t_c)).exp() * 100.0
        }
        SatVapMethod::Cimo => {
            let t_c = t_k - ZERO_CELSIUS;
            6.112 * (17.62 * t_c / (243.12 + t_c)).exp() * 100.0
        }
        SatVapMethod::GoffGratch => {
            let u_t = 373.16 / t_k;
            let v_t = t_k / 373.16;
            let log_e = -7.90298 * (u_t - 1.0) + 5.02808 * u_t.log10()
                - 1.3816e-7 * (10f64.powf(11.344 * (1.0 - v_t)) - 1.0)
                + 8.1328e-3 * (10f64.powf(-3.49149 * (u_t - 1.0)) - 1.0)
                + 1013.246f64.log10();
            10f64.powf(log_e) * 100.0
        }
    }
}

/// Saturation vapor pressure over ice \[Pa\] at `t_k` Kelvin.
fn e_sat_over_ice(t_k: Kelvin, method: SatVapMethod) -> Pascal {
    match method {
        SatVapMethod::Buck => {
            let t_c = t_k - ZERO_CELSIUS;
            6.1115 * ((23.036 - t_c / 333.7) * t_c / (279.82 + t_c)).exp() * 100.0
        }
        SatVapMethod::Cimo => {
            let t_c = t_k - ZERO_CELSIUS;
            6.112 * (22.46 * t_c / (272.62 + t_c)).exp() * 100.0
        }
        SatVapMethod::GoffGratch => {
            let u_t = T_TRIPLE / t_k;
            let v_t = t_k / T_TRIPLE;
            let log_e = -9.09718 * (u_t - 1.0) - 3.56654 * u_t.log10()
                + 0.876793 * (1.0 - v_t)
                + 6.1071f64.log10();
            10f64.powf(log_e) * 100.0
        }
    }
}

/// Calculate the saturation vapor pressure over water or ice at a temperature.
///
/// Arguments
/// ---------
/// * `temp`: temperature, in Celsius unless `kelvin` is set
/// * `ice`: evaluate the saturation vapor pressure over ice
/// * `kelvin`: `temp` is in Kelvin
/// * `method`: empirical formula, see [`SatVapMethod`]
///
/// Return
/// ------
/// * the saturation vapor pressure in Pascal, or [`EcofluxError::NoIceAboveTriplePoint`] if `ice`
///   is requested above the triple point of water (273.16 K).
pub fn p_sat_h2o(
    temp: f64,
    ice: bool,
    kelvin: bool,
    method: SatVapMethod,
) -> Result<Pascal, EcofluxError> {
    let t_k = to_kelvin(temp, kelvin);

    if ice {
        if t_k > T_TRIPLE {
            return Err(EcofluxError::NoIceAboveTriplePoint(t_k));
        }
        Ok(e_sat_over_ice(t_k, method))
    } else {
        Ok(e_sat_over_water(t_k, method))
    }
}

/// Element-wise [`p_sat_h2o`] over a slice of temperatures.
///
/// With `ice` set, the whole call fails if any temperature lies above the triple point.
pub fn p_sat_h2o_slice(
    temps: &[f64],
    ice: bool,
    kelvin: bool,
    method: SatVapMethod,
) -> Result<Vec<Pascal>, EcofluxError> {
    temps
        .iter()
        .map(|&t| p_sat_h2o(t, ice, kelvin, method))
        .collect()
}

/// Calculate the dew temperature from the water vapor pressure.
///
/// The saturation vapor pressure curve over liquid water is inverted with a Newton–Raphson
/// iteration started at `guess`.
///
/// Arguments
/// ---------
/// * `e_sat`: saturation vapor pressure in Pascal
/// * `guess`: initial guess of the dew temperature, in Celsius (shifted by 273.15 when `kelvin`)
/// * `kelvin`: return the dew temperature in Kelvin
/// * `method`: empirical formula, see [`SatVapMethod`]
///
/// Return
/// ------
/// * the dew temperature, or `NaN` if the iteration does not converge
pub fn dew_temp(e_sat: Pascal, guess: f64, kelvin: bool, method: SatVapMethod) -> f64 {
    let start = if kelvin { guess + ZERO_CELSIUS } else { guess };

    match solve_dew_temp(e_sat, start, kelvin, method) {
        Ok(t_dew) => t_dew,
        Err(err) => {
            log::warn!("dew temperature did not converge for e_sat={e_sat} Pa: {err}");
            f64::NAN
        }
    }
}

fn solve_dew_temp(
    e_sat: Pascal,
    start: f64,
    kelvin: bool,
    method: SatVapMethod,
) -> Result<f64, EcofluxError> {
    const STEP: f64 = 1e-4;

    let residual = |t: f64| -> f64 { e_sat_over_water(to_kelvin(t, kelvin), method) - e_sat };
    let derivative = |t: f64| -> f64 { (residual(t + STEP) - residual(t - STEP)) / (2.0 * STEP) };

    let mut convergency = SimpleConvergency {
        eps: 1.48e-8,
        max_iter: 50,
    };

    Ok(find_root_newton_raphson(
        start,
        &residual,
        &derivative,
        &mut convergency,
    )?)
}

#[cfg(test)]
mod sat_vap_test {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_p_sat_h2o_goff_gratch() {
        let e = p_sat_h2o(25.0, false, false, SatVapMethod::GoffGratch).unwrap();
        assert_relative_eq!(e, 3165.195633383682, max_relative = 1e-12);

        let e = p_sat_h2o(273.15, false, true, SatVapMethod::default()).unwrap();
        assert_relative_eq!(e, 610.3360999334138, max_relative = 1e-12);

        let e = p_sat_h2o(-15.0, true, false, SatVapMethod::GoffGratch).unwrap();
        assert_relative_eq!(e, 165.01477392358936, max_relative = 1e-12);
    }

    #[test]
    fn test_p_sat_h2o_buck_cimo() {
        let e = p_sat_h2o(25.0, false, false, SatVapMethod::Buck).unwrap();
        assert_relative_eq!(e, 3168.5314122754344, max_relative = 1e-12);

        let e = p_sat_h2o(258.15, true, true, SatVapMethod::Cimo).unwrap();
        assert_relative_eq!(e, 165.28713201714956, max_relative = 1e-12);

        let e = p_sat_h2o(-15.0, true, false, SatVapMethod::Buck).unwrap();
        assert_relative_eq!(e, 165.3369500136649, max_relative = 1e-12);

        let e = p_sat_h2o(20.0, false, false, SatVapMethod::Cimo).unwrap();
        assert_relative_eq!(e, 2332.5960220978072, max_relative = 1e-12);
    }

    #[test]
    fn test_no_ice_above_triple_point() {
        assert_eq!(
            p_sat_h2o(5.0, true, false, SatVapMethod::GoffGratch),
            Err(EcofluxError::NoIceAboveTriplePoint(278.15))
        );
        assert!(p_sat_h2o(T_TRIPLE, true, true, SatVapMethod::GoffGratch).is_ok());

        let res = p_sat_h2o_slice(&[-20.0, -10.0, 1.0], true, false, SatVapMethod::Buck);
        assert!(matches!(res, Err(EcofluxError::NoIceAboveTriplePoint(_))));
    }

    #[test]
    fn test_p_sat_h2o_slice() {
        let res = p_sat_h2o_slice(&[0.0, 25.0], false, false, SatVapMethod::GoffGratch).unwrap();
        assert_relative_eq!(res[0], 610.3360999334138, max_relative = 1e-12);
        assert_relative_eq!(res[1], 3165.195633383682, max_relative = 1e-12);
    }

    #[test]
    fn test_method_from_str() {
        assert_eq!("gg".parse::<SatVapMethod>().unwrap(), SatVapMethod::GoffGratch);
        assert_eq!("BUCK".parse::<SatVapMethod>().unwrap(), SatVapMethod::Buck);
        assert_eq!("cimo".parse::<SatVapMethod>().unwrap(), SatVapMethod::Cimo);
        assert_eq!(
            "magnus".parse::<SatVapMethod>(),
            Err(EcofluxError::InvalidSatVapMethod("magnus".to_string()))
        );
    }

    #[test]
    fn test_dew_temp() {
        let t = dew_temp(3165.0, 25.0, false, SatVapMethod::GoffGratch);
        assert_relative_eq!(t, 24.998963153421204, max_relative = 1e-8);

        let t = dew_temp(610.0, 25.0, false, SatVapMethod::GoffGratch);
        assert_relative_eq!(t, -0.007579829533741882, max_relative = 1e-5);

        let t = dew_temp(3165.0, 25.0, true, SatVapMethod::GoffGratch);
        assert_relative_eq!(t, 298.14896315342116, max_relative = 1e-10);
    }

    #[test]
    fn test_dew_temp_other_methods() {
        let t = dew_temp(2000.0, 20.0, false, SatVapMethod::Buck);
        assert_relative_eq!(t, 17.500934975102776, max_relative = 1e-8);

        let t = dew_temp(2000.0, 20.0, false, SatVapMethod::Cimo);
        assert_relative_eq!(t, 17.537076475057063, max_relative = 1e-8);
    }

    #[test]
    fn test_dew_temp_inverts_p_sat() {
        for t in [-5.0, 5.0, 15.0, 35.0] {
            let e = p_sat_h2o(t, false, false, SatVapMethod::GoffGratch).unwrap();
            let t_dew = dew_temp(e, 25.0, false, SatVapMethod::GoffGratch);
            assert_relative_eq!(t_dew, t, epsilon = 1e-7);
        }
    }

    #[test]
    fn test_dew_temp_diverges_to_nan() {
        assert!(dew_temp(-100.0, 25.0, false, SatVapMethod::GoffGratch).is_nan());
    }
}
