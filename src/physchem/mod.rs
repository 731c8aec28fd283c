//! # Physical chemistry
//!
//! - [`sat_vap`] – saturation vapor pressure of water and dew temperature.
pub mod sat_vap;
