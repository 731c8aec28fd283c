//! # Constants and type definitions for ecoflux
//!
//! This module centralizes the **physical, chemical, and environmental constants** and the
//! **unit type aliases** used throughout the `ecoflux` library.
//!
//! ## Overview
//!
//! - Fundamental constants (CODATA 2018 exact values)
//! - Properties of dry air and water vapor
//! - Properties of the Earth and of the atmosphere
//! - Soil texture names (USDA classification)
//! - Unit aliases used in function signatures
//!
//! ## References
//!
//! - Or, D. and Wraith, J. M. (2002). Soil Water Content and Water Potential Relationships,
//!   in Warrick, A. W. (eds.) *Soil Physics Companion*, pp 81–82., CRC Press.
//! - Rumble, J. (eds.) (2017). *CRC Handbook of Chemistry and Physics* (98th ed.). CRC Press.
//! - Trenberth, K. E. and Smith, L. (2005). The mass of the atmosphere: a constraint on global
//!   analyses. *Journal of Climate*, 18, 864–875.

// -------------------------------------------------------------------------------------------------
// Fundamental constants
// -------------------------------------------------------------------------------------------------

/// Molar gas constant \[J mol^-1 K^-1\]
pub const R: f64 = 8.314_462_618;

/// Planck constant \[J s\]
pub const PLANCK_H: f64 = 6.626_070_15e-34;

/// Speed of light in vacuum \[m s^-1\]
pub const SPEED_OF_LIGHT: f64 = 299_792_458.0;

/// Boltzmann constant \[J K^-1\]
pub const BOLTZMANN_K: f64 = 1.380_649e-23;

/// Standard acceleration of gravity \[m s^-2\]
pub const G: f64 = 9.806_65;

/// Zero of the Celsius scale \[K\]
pub const ZERO_CELSIUS: f64 = 273.15;

/// Triple point of water \[K\]
pub const T_TRIPLE: f64 = 273.16;

/// Number of seconds in a day
pub const SECONDS_PER_DAY: f64 = 86_400.0;

/// Number of minutes in a day
pub const MINUTES_PER_DAY: f64 = 1_440.0;

// -------------------------------------------------------------------------------------------------
// Chemical constants
// -------------------------------------------------------------------------------------------------

/// Dry air molar mass \[kg mol^-1\]
pub const M_D: f64 = 28.964_5e-3;

/// Water vapor molar mass \[kg mol^-1\]
pub const M_W: f64 = 18.015_28e-3;

/// Specific gas constant of dry air \[J kg^-1 K^-1\]
pub const R_D: f64 = R / M_D;

/// Specific gas constant of water vapor \[J kg^-1 K^-1\]
pub const R_W: f64 = R / M_W;

/// Isobaric specific heat capacity of dry air \[J kg^-1 K^-1\]
///
/// Its variation with temperature is negligible in the atmosphere.
pub const CP_D: f64 = 1.004e3;

/// Isobaric molar heat capacity of dry air \[J mol^-1 K^-1\]
pub const CPM_D: f64 = CP_D * M_D;

/// Soil texture names, USDA classification
pub const SOIL_TEXTURES: [&str; 12] = [
    "sand",
    "loamy sand",
    "sandy loam",
    "loam",
    "silt",
    "silt loam",
    "sandy clay loam",
    "clay loam",
    "silty clay loam",
    "sandy clay",
    "silty clay",
    "clay",
];

// -------------------------------------------------------------------------------------------------
// Earth and atmosphere
// -------------------------------------------------------------------------------------------------

/// Present-day eccentricity of the Earth's orbit
pub const ECCENTRICITY: f64 = 0.016_704_232;

/// Total mass of the atmosphere \[kg\]
pub const M_ATM: f64 = 5.1480e18;

/// Dry mass of the atmosphere \[kg\]
pub const M_ATM_D: f64 = 5.1352e18;

/// Dry adiabatic lapse rate \[K m^-1\]
pub const GAMMA_D: f64 = G / CP_D;

/// Mean environmental lapse rate \[K m^-1\]
pub const GAMMA_MEAN: f64 = 6.5e-3;

/// von Kármán constant \[-\]
pub const KAPPA: f64 = 0.40;

// -------------------------------------------------------------------------------------------------
// Type aliases
// -------------------------------------------------------------------------------------------------

/// Angle in degrees
pub type Degree = f64;
/// Angle in radians
pub type Radian = f64;
/// Temperature in Kelvin
pub type Kelvin = f64;
/// Temperature in degrees Celsius
pub type Celsius = f64;
/// Pressure in Pascal
pub type Pascal = f64;
/// Fraction of a day (0 = midnight, 1 = next midnight)
pub type DayFraction = f64;
