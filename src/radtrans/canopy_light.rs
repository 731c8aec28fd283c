//! Canopy radiative transfer.
use crate::constants::Radian;

/// Calculate the fraction of diffuse radiation.
///
/// Spitters, Toussaint & Goudriaan (1986) separation of global radiation into its
/// diffuse and direct components, from the atmospheric transmissivity.
///
/// Arguments
/// ---------
/// * `trans`: atmospheric transmissivity (0 to 1)
/// * `theta`: solar zenith angle in radians, within `[0, π/2)`
///
/// Return
/// ------
/// * the fraction of diffuse radiation
///
/// References
/// ----------
/// * Spitters, C. J. T., Toussaint, H. A. J. M., & Goudriaan, J. (1986). Separating the diffuse
///   and direct component of global radiation and its implications for modeling canopy
///   photosynthesis Part I. Components of incoming radiation. *Agricultural and Forest
///   Meteorology*, 38(1–3), 217–229. <https://doi.org/10.1016/0168-1923(86)90060-2>
pub fn diffuse_fraction(trans: f64, theta: Radian) -> f64 {
    if trans <= 0.22 {
        1.0
    } else if trans <= 0.35 {
        1.0 - 6.4 * (trans - 0.22).powi(2)
    } else {
        let cos_theta = theta.cos();
        let r = 0.847 - 1.61 * cos_theta + 1.04 * cos_theta.powi(2);
        let k = (1.47 - r) / 1.66;
        if trans <= k {
            1.47 - 1.66 * trans
        } else {
            r
        }
    }
}

/// Calculate the light extinction coefficient of the plant canopy \[m^2 m^-2\].
///
/// Arguments
/// ---------
/// * `theta`: solar zenith angle in radians, within `[0, π/2)`
/// * `chi`: leaf shape parameter for light extinction (1 for a spherical leaf angle distribution)
pub fn extinction_coefficient(theta: Radian, chi: f64) -> f64 {
    (chi * chi + theta.tan().powi(2)).sqrt() / (chi + 1.774 * (chi + 1.182).powf(-0.733))
}
