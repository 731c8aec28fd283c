pub mod constants;
pub mod ecoflux_errors;
pub mod leaf;
pub mod physchem;
pub mod radtrans;
pub mod stats;
pub mod time;
