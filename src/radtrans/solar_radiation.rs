//! # Solar position and radiation
//!
//! Solar angles and sunrise/sunset times after the NOAA Global Radiation Group solar
//! calculator (<http://www.esrl.noaa.gov/gmd/grad/solcalc/calcdetails.html>), and the
//! spectral radiance of a grey body from Planck's law.
//!
//! ## Pipeline
//!
//! [`solar_angle`] evaluates, in order:
//!
//! 1. **Time normalization** – civil timestamp and timezone → Julian Date and Julian Century
//!    ([`JulianTime`]).
//! 2. **Mean solar geometry** – geometric mean longitude and anomaly of the sun.
//! 3. **True/apparent position** – equation of center, apparent longitude, declination.
//! 4. **Obliquity** – mean and nutation-corrected obliquity of the ecliptic.
//! 5. **Equation of time** – in minutes.
//! 6. **Sunrise/sunset** – sunrise hour angle with the standard −0.833° depression, local solar
//!    noon, sunrise and sunset as fractions of a day.
//! 7. **Instantaneous angles** – hour angle, zenith, elevation and azimuth at the clock time.
//! 8. **Atmospheric refraction** – piecewise empirical correction ([`atmospheric_refraction`]).
//!
//! Steps 2–5 depend only on the Julian Century and are exposed as [`SolarGeometry`].
//!
//! ## Numeric domain
//!
//! At polar day/night the `acos` argument of the sunrise hour angle leaves `[−1, 1]`, and when the
//! sun is exactly at the zenith or nadir the azimuth ratio is `0/0`. [`AcosDomain::Strict`]
//! (the default) lets these cases surface as `NaN` in the [`SolarAngleResult`];
//! [`AcosDomain::Clamped`] clamps the `acos` argument into `[−1, 1]` and reports an azimuth of
//! 180° for the undefined `0/0` case.
//!
//! ## Example
//!
//! ```rust
//! use ecoflux::radtrans::solar_radiation::solar_angle_from_str;
//!
//! // Los Angeles, Pacific Standard Time
//! let res = solar_angle_from_str("2015-11-23T12:00:00", 34.0, -118.0, -8.0).unwrap();
//! assert!(res.sunrise < res.solar_noon && res.solar_noon < res.sunset);
//! assert!((res.solar_elevation_angle - 35.36).abs() < 0.01);
//! ```
use std::str::FromStr;

use hifitime::Epoch;
use serde::{Deserialize, Serialize};

use crate::{
    constants::{
        DayFraction, Degree, BOLTZMANN_K, ECCENTRICITY, MINUTES_PER_DAY, PLANCK_H,
        SPEED_OF_LIGHT, ZERO_CELSIUS,
    },
    ecoflux_errors::EcofluxError,
    time::{fractional_day, parse_civil_timestamp, JulianTime},
};

/// Zenith angle of the sun at sunrise/sunset, including refraction and the solar disk radius
const SUNRISE_ZENITH: Degree = 90.833;

/// Handling of `acos` arguments that fall outside `[−1, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AcosDomain {
    /// Evaluate as is: out-of-range arguments yield `NaN`.
    #[default]
    Strict,
    /// Clamp the argument into `[−1, 1]` before evaluating.
    Clamped,
}

impl AcosDomain {
    /// `acos` of `arg`, in degrees, under this domain policy.
    fn acos_deg(self, arg: f64) -> Degree {
        match self {
            AcosDomain::Strict => arg.acos().to_degrees(),
            AcosDomain::Clamped => arg.clamp(-1.0, 1.0).acos().to_degrees(),
        }
    }
}

impl FromStr for AcosDomain {
    type Err = EcofluxError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "strict" => Ok(AcosDomain::Strict),
            "clamped" | "clamp" => Ok(AcosDomain::Clamped),
            other => Err(EcofluxError::InvalidAcosDomain(other.to_string())),
        }
    }
}

/// Options of the solar angle computation.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SolarAngleOptions {
    pub acos_domain: AcosDomain,
}

/// Solar geometry depending only on the Julian Century. All angles in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SolarGeometry {
    /// Geometric mean longitude of the sun, in `[0, 360)`
    pub geom_mean_lon: Degree,
    /// Geometric mean anomaly of the sun
    pub geom_mean_anom: Degree,
    /// Equation of center
    pub eq_of_center: Degree,
    pub true_lon: Degree,
    /// True longitude corrected for nutation and aberration
    pub apparent_lon: Degree,
    pub mean_obliquity: Degree,
    /// Obliquity of the ecliptic corrected for nutation
    pub corrected_obliquity: Degree,
    pub declination: Degree,
    /// Equation of time, in minutes
    pub equation_of_time: f64,
}

impl SolarGeometry {
    /// Evaluate the solar geometry at a Julian Century since J2000.0.
    ///
    /// Every formula works in degrees and converts at each trigonometric call site.
    pub fn at(julian_century: f64) -> Self {
        let jc = julian_century;

        let geom_mean_lon = (280.46646 + jc * (36000.76983 + jc * 0.0003032)).rem_euclid(360.0);
        let geom_mean_anom = 357.52911 + jc * (35999.05029 - 0.0001537 * jc);

        let anom_rad = geom_mean_anom.to_radians();
        let eq_of_center = anom_rad.sin() * (1.914602 - jc * (0.004817 + 1.4e-5 * jc))
            + (anom_rad * 2.0).sin() * (0.019993 - 0.000101 * jc)
            + (anom_rad * 3.0).sin() * 0.000289;

        let true_lon = geom_mean_lon + eq_of_center;

        // longitude of the moon's ascending node
        let omega = (125.04 - 1934.136 * jc).to_radians();
        let apparent_lon = true_lon - 0.00569 - 0.00478 * omega.sin();

        let mean_obliquity = 23.0
            + (26.0 + (21.448 - jc * (46.815 + jc * (0.00059 - jc * 0.001813))) / 60.0) / 60.0;
        let corrected_obliquity = mean_obliquity + 0.00256 * omega.cos();

        let declination = (corrected_obliquity.to_radians().sin()
            * apparent_lon.to_radians().sin())
        .asin()
        .to_degrees();

        let equation_of_time =
            equation_of_time(corrected_obliquity, geom_mean_lon, geom_mean_anom);

        SolarGeometry {
            geom_mean_lon,
            geom_mean_anom,
            eq_of_center,
            true_lon,
            apparent_lon,
            mean_obliquity,
            corrected_obliquity,
            declination,
            equation_of_time,
        }
    }
}

/// Equation of time, in minutes (5-term NOAA approximation).
///
/// Arguments
/// ---------
/// * `obliquity`: obliquity of the ecliptic corrected for nutation, in degrees
/// * `mean_lon`: geometric mean longitude of the sun, in degrees
/// * `mean_anom`: geometric mean anomaly of the sun, in degrees
pub fn equation_of_time(obliquity: Degree, mean_lon: Degree, mean_anom: Degree) -> f64 {
    let ecc = ECCENTRICITY;
    let var_y = (obliquity / 2.0).to_radians().tan().powi(2);
    let lon_rad = mean_lon.to_radians();
    let anom_rad = mean_anom.to_radians();

    4.0 * (var_y * (2.0 * lon_rad).sin() - 2.0 * ecc * anom_rad.sin()
        + 4.0 * ecc * var_y * anom_rad.sin() * (2.0 * lon_rad).cos()
        - 0.5 * var_y.powi(2) * (4.0 * lon_rad).sin()
        - 1.25 * ecc.powi(2) * (2.0 * anom_rad).sin())
    .to_degrees()
}

// -------------------------------------------------------------------------------------------------
// Atmospheric refraction
// -------------------------------------------------------------------------------------------------

/// One elevation regime of the refraction correction: `lower < e <= upper`.
///
/// A missing bound is unbounded on that side.
struct RefractionBand {
    lower: Option<Degree>,
    upper: Option<Degree>,
    formula: fn(Degree) -> Degree,
}

impl RefractionBand {
    fn contains(&self, elevation: Degree) -> bool {
        self.lower.map_or(true, |lo| elevation > lo) && self.upper.map_or(true, |up| elevation <= up)
    }
}

fn refraction_none(_elevation: Degree) -> Degree {
    0.0
}

fn refraction_high(elevation: Degree) -> Degree {
    let tan_e = elevation.to_radians().tan();
    (58.1 / tan_e - 0.07 / tan_e.powi(3) + 0.000086 / tan_e.powi(5)) / 3600.0
}

fn refraction_near_horizon(e: Degree) -> Degree {
    (1735.0 - 518.2 * e + 103.4 * e.powi(2) - 12.79 * e.powi(3) + 0.711 * e.powi(4)) / 3600.0
}

fn refraction_below_horizon(elevation: Degree) -> Degree {
    -20.774 / 3600.0 / elevation.to_radians().tan()
}

/// Ordered, mutually exclusive and exhaustive elevation regimes.
const REFRACTION_TABLE: [RefractionBand; 4] = [
    RefractionBand {
        lower: Some(85.0),
        upper: None,
        formula: refraction_none,
    },
    RefractionBand {
        lower: Some(5.0),
        upper: Some(85.0),
        formula: refraction_high,
    },
    RefractionBand {
        lower: Some(-0.575),
        upper: Some(5.0),
        formula: refraction_near_horizon,
    },
    RefractionBand {
        lower: None,
        upper: Some(-0.575),
        formula: refraction_below_horizon,
    },
];

/// Approximate atmospheric refraction, in degrees, at an uncorrected solar elevation angle.
///
/// The regimes are evaluated top to bottom:
///
/// | elevation `e` (°)      | refraction (°)                                               |
/// |------------------------|--------------------------------------------------------------|
/// | `e > 85`               | `0`                                                          |
/// | `5 < e <= 85`          | `(58.1/tan e − 0.07/tan³ e + 0.000086/tan⁵ e) / 3600`        |
/// | `−0.575 < e <= 5`      | `(1735 − 518.2e + 103.4e² − 12.79e³ + 0.711e⁴) / 3600`       |
/// | `e <= −0.575`          | `−20.774 / 3600 / tan e`                                     |
///
/// A `NaN` elevation yields a `NaN` refraction.
pub fn atmospheric_refraction(elevation: Degree) -> Degree {
    REFRACTION_TABLE
        .iter()
        .find(|band| band.contains(elevation))
        .map_or(f64::NAN, |band| (band.formula)(elevation))
}

// -------------------------------------------------------------------------------------------------
// Solar angles
// -------------------------------------------------------------------------------------------------

/// Solar noon, sunrise/sunset times and solar angles at an observation instant.
///
/// Times are fractions of the local civil day (0 = midnight, 1 = next midnight);
/// angles are in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SolarAngleResult {
    pub solar_noon: DayFraction,
    pub sunrise: DayFraction,
    pub sunset: DayFraction,
    pub hour_angle: Degree,
    pub solar_zenith_angle: Degree,
    pub solar_elevation_angle: Degree,
    pub solar_azimuth_angle: Degree,
    pub atmospheric_refraction: Degree,
    /// Solar zenith angle corrected for atmospheric refraction
    pub solar_zenith_angle_corrected: Degree,
    /// Solar elevation angle corrected for atmospheric refraction
    pub solar_elevation_angle_corrected: Degree,
}

/// An observation instant: civil timestamp, location and timezone.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ObservationInstant {
    pub epoch: Epoch,
    /// Latitude, −90 to 90 degrees
    pub latitude: Degree,
    /// Longitude, −180 to 180 degrees
    pub longitude: Degree,
    /// Timezone with respect to UTC, −12 to 12 hours
    pub timezone: f64,
}

impl ObservationInstant {
    pub fn new(epoch: Epoch, latitude: Degree, longitude: Degree, timezone: f64) -> Self {
        ObservationInstant {
            epoch,
            latitude,
            longitude,
            timezone,
        }
    }

    /// Solar angles at this instant.
    pub fn solar_angle(&self, options: &SolarAngleOptions) -> SolarAngleResult {
        solar_angle_with(
            &self.epoch,
            self.latitude,
            self.longitude,
            self.timezone,
            options,
        )
    }
}

/// Calculate the solar angles and sunrise/sunset times, with the default ([`AcosDomain::Strict`])
/// options.
///
/// Arguments
/// ---------
/// * `epoch`: civil timestamp (calendar date and time of day) on the local clock
/// * `lat`: latitude (−90 to 90)
/// * `lon`: longitude (−180 to 180)
/// * `timezone`: time zone with respect to UTC (−12 to 12), in hours
///
/// Return
/// ------
/// * a [`SolarAngleResult`]; non-finite fields report polar day/night or a degenerate azimuth
///
/// See also
/// --------
/// * [`solar_angle_with`] – same computation with explicit [`SolarAngleOptions`]
/// * [`solar_angle_from_str`] – parse the timestamp first
pub fn solar_angle(epoch: &Epoch, lat: Degree, lon: Degree, timezone: f64) -> SolarAngleResult {
    solar_angle_with(epoch, lat, lon, timezone, &SolarAngleOptions::default())
}

/// Calculate the solar angles from a civil timestamp string (`YYYY-MM-DDTHH:MM:SS[.FFF]`).
///
/// Return
/// ------
/// * the [`SolarAngleResult`], or [`EcofluxError::MissingTimeOfDay`] if the timestamp is a bare
///   date, before any computation takes place.
pub fn solar_angle_from_str(
    timestamp: &str,
    lat: Degree,
    lon: Degree,
    timezone: f64,
) -> Result<SolarAngleResult, EcofluxError> {
    let epoch = parse_civil_timestamp(timestamp)?;
    Ok(solar_angle(&epoch, lat, lon, timezone))
}

/// Calculate the solar angles and sunrise/sunset times.
///
/// See [`solar_angle`] for the arguments; `options` selects how out-of-range `acos` arguments
/// are handled.
pub fn solar_angle_with(
    epoch: &Epoch,
    lat: Degree,
    lon: Degree,
    timezone: f64,
    options: &SolarAngleOptions,
) -> SolarAngleResult {
    let acos_domain = options.acos_domain;
    let julian = JulianTime::from_civil(epoch, timezone);
    let geom = SolarGeometry::at(julian.julian_century);

    let lat_rad = lat.to_radians();
    let decl_rad = geom.declination.to_radians();

    // sunrise / sunset
    let ha_sunrise = acos_domain.acos_deg(
        SUNRISE_ZENITH.to_radians().cos() / (lat_rad.cos() * decl_rad.cos())
            - lat_rad.tan() * decl_rad.tan(),
    );

    let solar_noon =
        (720.0 - 4.0 * lon - geom.equation_of_time + timezone * 60.0) / MINUTES_PER_DAY;
    let sunrise = solar_noon - ha_sunrise * 4.0 / MINUTES_PER_DAY;
    let sunset = solar_noon + ha_sunrise * 4.0 / MINUTES_PER_DAY;

    // true solar time in minutes
    let true_solar_time = (fractional_day(epoch) * MINUTES_PER_DAY + geom.equation_of_time
        + 4.0 * lon
        - 60.0 * timezone)
        .rem_euclid(MINUTES_PER_DAY);

    let hour_angle = if true_solar_time / 4.0 < 0.0 {
        true_solar_time / 4.0 + 180.0
    } else {
        true_solar_time / 4.0 - 180.0
    };

    let solar_zenith_angle = acos_domain.acos_deg(
        lat_rad.sin() * decl_rad.sin()
            + lat_rad.cos() * decl_rad.cos() * hour_angle.to_radians().cos(),
    );
    let solar_elevation_angle = 90.0 - solar_zenith_angle;

    let solar_azimuth_angle = solar_azimuth(
        lat_rad,
        decl_rad,
        hour_angle,
        solar_zenith_angle,
        acos_domain,
    );

    let refraction = atmospheric_refraction(solar_elevation_angle);

    if !(ha_sunrise.is_finite() && solar_azimuth_angle.is_finite()) {
        log::debug!(
            "non-finite solar geometry at lat={lat}, jd={}: ha_sunrise={ha_sunrise}, azimuth={solar_azimuth_angle}",
            julian.julian_date
        );
    }

    SolarAngleResult {
        solar_noon,
        sunrise,
        sunset,
        hour_angle,
        solar_zenith_angle,
        solar_elevation_angle,
        solar_azimuth_angle,
        atmospheric_refraction: refraction,
        solar_zenith_angle_corrected: solar_zenith_angle - refraction,
        solar_elevation_angle_corrected: solar_elevation_angle + refraction,
    }
}

/// Solar azimuth angle in `[0, 360)`, clockwise from north.
fn solar_azimuth(
    lat_rad: f64,
    decl_rad: f64,
    hour_angle: Degree,
    zenith: Degree,
    acos_domain: AcosDomain,
) -> Degree {
    let zenith_rad = zenith.to_radians();
    let ratio =
        (lat_rad.sin() * zenith_rad.cos() - decl_rad.sin()) / (lat_rad.cos() * zenith_rad.sin());

    // 0/0: sun exactly at the zenith or nadir of the observer
    let acos_ratio = if ratio.is_nan() && zenith.is_finite() && acos_domain == AcosDomain::Clamped
    {
        0.0
    } else {
        acos_domain.acos_deg(ratio)
    };

    if hour_angle > 0.0 {
        (acos_ratio + 180.0).rem_euclid(360.0)
    } else {
        (540.0 - acos_ratio).rem_euclid(360.0)
    }
}

/// Evaluate [`solar_angle_with`] element-wise over a batch of observation instants.
pub fn solar_angle_batch(
    instants: &[ObservationInstant],
    options: &SolarAngleOptions,
) -> Vec<SolarAngleResult> {
    instants
        .iter()
        .map(|instant| instant.solar_angle(options))
        .collect()
}

// -------------------------------------------------------------------------------------------------
// Planck's law
// -------------------------------------------------------------------------------------------------

/// Calculate spectral radiance from Planck's law.
///
/// Arguments
/// ---------
/// * `wavelength`: wavelength of the photon \[m\]
/// * `temp`: temperature of the radiating body, in Celsius unless `kelvin` is set
/// * `emissivity`: emissivity of the radiating body \[0 to 1\], 1 for a blackbody
/// * `kelvin`: if true, `temp` is in Kelvin
///
/// Return
/// ------
/// * spectral radiance \[W sr^-1 m^-3\]; zero at 0 K
pub fn planck_law(wavelength: f64, temp: f64, emissivity: f64, kelvin: bool) -> f64 {
    let t_k = if kelvin { temp } else { temp + ZERO_CELSIUS };
    if t_k == 0.0 {
        return 0.0;
    }

    let c1 = 2.0 * PLANCK_H * SPEED_OF_LIGHT.powi(2);
    let c2 = PLANCK_H * SPEED_OF_LIGHT / BOLTZMANN_K;

    emissivity * c1 * wavelength.powf(-5.0) / ((c2 / wavelength / t_k).exp() - 1.0)
}
