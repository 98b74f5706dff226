// src/domain/timestamp.rs

use chrono::{DateTime, Local, TimeZone};
use serde_json::Value;
use std::fmt::Display;

pub const NOT_AVAILABLE: &str = "N/A";
pub const INVALID_DATE: &str = "Invalid Date";

// e.g. "11/14/2023, 10:13:20 PM"
const LOCALE_FORMAT: &str = "%-m/%-d/%Y, %-I:%M:%S %p";

/// Largest epoch-millisecond magnitude a date may have.
const MAX_EPOCH_MILLIS: f64 = 8.64e15;

/// Render a reading's timestamp in the server's local time zone.
pub fn format_timestamp(timestamp: Option<&Value>) -> String {
    format_timestamp_in(timestamp, &Local)
}

/// "N/A" when there is no usable timestamp, "Invalid Date" when it cannot be
/// turned into a date.
pub fn format_timestamp_in<Tz>(timestamp: Option<&Value>, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let Some(value) = timestamp.filter(|v| !is_blank(v)) else {
        return NOT_AVAILABLE.to_string();
    };

    match to_datetime(value) {
        Some(dt) => dt.with_timezone(tz).format(LOCALE_FORMAT).to_string(),
        None => INVALID_DATE.to_string(),
    }
}

fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(_) | Value::Object(_) => false,
    }
}

fn to_datetime(value: &Value) -> Option<DateTime<chrono::Utc>> {
    match value {
        Value::Number(n) => {
            let millis = n.as_f64()?;
            if !millis.is_finite() || millis.abs() > MAX_EPOCH_MILLIS {
                return None;
            }
            DateTime::from_timestamp_millis(millis.trunc() as i64)
        }
        Value::String(s) => DateTime::parse_from_rfc3339(s.trim())
            .ok()
            .map(|dt| dt.with_timezone(&chrono::Utc)),
        _ => None,
    }
}
