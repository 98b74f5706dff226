//! Water-quality limits used to explain a classification.
//!
//! These mirror what the external classifier is assumed to use; they never
//! decide the label themselves.

pub const PH_MIN: f64 = 6.5;
pub const PH_MAX: f64 = 8.5;

/// NTU
pub const TURBIDITY_MAX: f64 = 5.0;

/// ppm
pub const TDS_MAX: f64 = 1000.0;
pub const TDS_MIN: f64 = 10.0;

/// °C
pub const TEMPERATURE_MIN: f64 = 10.0;
pub const TEMPERATURE_MAX: f64 = 25.0;
