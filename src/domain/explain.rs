// src/domain/explain.rs

use crate::domain::thresholds::*;
use crate::feed::Reading;

pub const ALL_IN_RANGE: &str = "All values are within acceptable ranges.";
pub const UNKNOWN_CLASSIFICATION: &str = "Classification is unknown or missing.";
pub const PH_OUT_OF_RANGE: &str = "pH is outside the safe range (6.5–8.5).";
pub const TURBIDITY_TOO_HIGH: &str = "Turbidity is too high (> 5 NTU).";
pub const TDS_TOO_HIGH: &str = "TDS exceeds the recommended maximum (1000 ppm).";
pub const TDS_TOO_LOW: &str = "TDS is too low.";
pub const TEMPERATURE_OUT_OF_RANGE: &str = "Temperature is outside the optimal range (10°C–25°C).";

/// The externally computed verdict carried by a reading's label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Suitable,
    Unsuitable,
    Unknown,
}

impl Verdict {
    pub fn from_label(label: &str) -> Self {
        match label {
            "1" => Verdict::Suitable,
            "0" => Verdict::Unsuitable,
            _ => Verdict::Unknown,
        }
    }
}

/// Reasons behind a reading's label, in rule order.
///
/// A suitable label is never second-guessed. An unsuitable label whose values
/// all pass the local limits yields no reasons at all: the classifier and
/// these limits can disagree.
pub fn justify(reading: &Reading) -> Vec<&'static str> {
    match Verdict::from_label(&reading.classification_label) {
        Verdict::Suitable => vec![ALL_IN_RANGE],
        Verdict::Unknown => vec![UNKNOWN_CLASSIFICATION],
        Verdict::Unsuitable => unsuitable_reasons(reading),
    }
}

fn unsuitable_reasons(reading: &Reading) -> Vec<&'static str> {
    let mut reasons = Vec::new();

    if outside(reading.acidity, PH_MIN, PH_MAX) {
        reasons.push(PH_OUT_OF_RANGE);
    }

    if above(reading.turbidity, TURBIDITY_MAX) {
        reasons.push(TURBIDITY_TOO_HIGH);
    }

    // At most one TDS reason: a missing value lands in the first branch only.
    if above(reading.total_dissolved_solids, TDS_MAX) {
        reasons.push(TDS_TOO_HIGH);
    } else if below(reading.total_dissolved_solids, TDS_MIN) {
        reasons.push(TDS_TOO_LOW);
    }

    if outside(reading.temperature, TEMPERATURE_MIN, TEMPERATURE_MAX) {
        reasons.push(TEMPERATURE_OUT_OF_RANGE);
    }

    reasons
}

// A missing value fails every check.
fn above(value: Option<f64>, max: f64) -> bool {
    value.map_or(true, |v| v > max)
}

fn below(value: Option<f64>, min: f64) -> bool {
    value.map_or(true, |v| v < min)
}

fn outside(value: Option<f64>, min: f64, max: f64) -> bool {
    value.map_or(true, |v| v < min || v > max)
}
