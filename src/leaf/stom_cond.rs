//! Stomatal conductance.
use serde::{Deserialize, Serialize};

use crate::{
    constants::ZERO_CELSIUS,
    physchem::sat_vap::{e_sat_over_water, SatVapMethod},
};

/// Ratio of the boundary layer conductance to water vapor over that to CO₂
const BL_COND_RATIO_H2O_CO2: f64 = 1.37;

/// One leaf-level gas-exchange record.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LeafGasExchange {
    /// CO₂ assimilation rate \[µmol m^-2 s^-1\]
    pub a_n: f64,
    /// Transpiration rate \[mol m^-2 s^-1\]
    pub transpiration: f64,
    /// Ambient pressure \[Pa\]
    pub pressure: f64,
    /// Leaf temperature \[°C\]
    pub t_leaf: f64,
    /// Stomatal conductance to water vapor \[mol m^-2 s^-1\]
    pub stom_cond: f64,
    /// Boundary layer conductance to water vapor \[mol m^-2 s^-1\]
    pub bl_cond: f64,
    /// Ambient CO₂ concentration \[µmol mol^-1\]
    pub co2: f64,
}

impl LeafGasExchange {
    /// Relative humidity at the leaf surface, `h_s = 1 − E·P / (e_sat(T_leaf)·g_s)`.
    pub fn surface_humidity(&self) -> f64 {
        let e_sat = e_sat_over_water(self.t_leaf + ZERO_CELSIUS, SatVapMethod::GoffGratch);
        1.0 - (self.transpiration * self.pressure) / (e_sat * self.stom_cond)
    }

    /// CO₂ concentration at the leaf surface, `c_s = c_a − 1.37·A / g_b` \[µmol mol^-1\].
    pub fn surface_co2(&self) -> f64 {
        self.co2 - self.a_n * BL_COND_RATIO_H2O_CO2 / self.bl_cond
    }

    /// Ball–Berry predictor `A·h_s / c_s` \[mol m^-2 s^-1\].
    ///
    /// This is the regressor used to determine the Ball–Berry slope from leaf gas-exchange
    /// data, not a forward model of stomatal conductance. The algorithm roughly follows the
    /// LI-6400XT manual (page 15-37) with the Goff–Gratch saturation vapor pressure.
    pub fn ball_berry_predictor(&self) -> f64 {
        self.a_n * self.surface_humidity() / self.surface_co2()
    }
}

/// Ball–Berry predictor of each record of a gas-exchange series.
pub fn ball_berry_predictors(records: &[LeafGasExchange]) -> Vec<f64> {
    records
        .iter()
        .map(LeafGasExchange::ball_berry_predictor)
        .collect()
}

#[cfg(test)]
mod stom_cond_test {
    use super::*;
    use approx::assert_relative_eq;

    fn record() -> LeafGasExchange {
        LeafGasExchange {
            a_n: 10.0,
            transpiration: 0.003,
            pressure: 101_325.0,
            t_leaf: 25.0,
            stom_cond: 0.2,
            bl_cond: 2.0,
            co2: 400.0,
        }
    }

    #[test]
    fn test_surface_conditions() {
        let rec = record();
        assert_relative_eq!(rec.surface_humidity(), 0.519816410723652, max_relative = 1e-12);
        assert_relative_eq!(rec.surface_co2(), 393.15, max_relative = 1e-14);
    }

    #[test]
    fn test_ball_berry_predictor() {
        assert_relative_eq!(
            record().ball_berry_predictor(),
            0.01322183417839634,
            max_relative = 1e-12
        );

        let dark = LeafGasExchange {
            a_n: 0.0,
            ..record()
        };
        assert_eq!(ball_berry_predictors(&[dark, record()])[0], 0.0);
    }
}
