//! # Leaf-scale processes
//!
//! Leaf-scale exchange of mass and energy.
//!
//! - [`light_response`] – photosynthesis light-response curves and their fitting residuals.
//! - [`stom_cond`] – stomatal conductance diagnostics (Ball–Berry predictor).
pub mod light_response;
pub mod stom_cond;
