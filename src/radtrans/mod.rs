//! # Radiative transfer
//!
//! - [`solar_radiation`] – solar position, sunrise/sunset times, atmospheric refraction and
//!   Planck's law.
//! - [`canopy_light`] – diffuse fraction of global radiation and canopy light extinction.
pub mod canopy_light;
pub mod solar_radiation;
