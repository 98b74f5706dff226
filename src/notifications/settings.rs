use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

pub const DEFAULT_COOLDOWN_MINUTES: u32 = 10;

pub const WEEKDAYS: [&str; 7] = [
    "monday",
    "tuesday",
    "wednesday",
    "thursday",
    "friday",
    "saturday",
    "sunday",
];

/// Email alert preferences as stored by the scheduling service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotificationSettings {
    #[serde(default, deserialize_with = "null_as_default")]
    pub email: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub enabled: bool,
    #[serde(default = "default_cooldown", deserialize_with = "cooldown_or_default")]
    pub cooldown_minutes: u32,
    /// Serialized as `null` when quiet hours are off.
    #[serde(default)]
    pub no_notify: Option<QuietHours>,
}

/// "Don't disturb" window.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QuietHours {
    /// "HH:MM"
    #[serde(default, deserialize_with = "null_as_default")]
    pub start: String,
    /// "HH:MM"
    #[serde(default, deserialize_with = "null_as_default")]
    pub end: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub days: BTreeMap<String, bool>,
}

impl Default for NotificationSettings {
    fn default() -> Self {
        Self {
            email: String::new(),
            enabled: false,
            cooldown_minutes: DEFAULT_COOLDOWN_MINUTES,
            no_notify: None,
        }
    }
}

impl QuietHours {
    /// Days in week order, then any unrecognised names alphabetically.
    pub fn ordered_days(&self) -> Vec<(&str, bool)> {
        let mut days: Vec<(&str, bool)> = self
            .days
            .iter()
            .map(|(day, muted)| (day.as_str(), *muted))
            .collect();
        days.sort_by_key(|(day, _)| {
            WEEKDAYS
                .iter()
                .position(|w| w.eq_ignore_ascii_case(day))
                .unwrap_or(WEEKDAYS.len())
        });
        days
    }

    /// A full week with nothing muted.
    pub fn week() -> BTreeMap<String, bool> {
        WEEKDAYS.iter().map(|d| (d.to_string(), false)).collect()
    }
}

fn default_cooldown() -> u32 {
    DEFAULT_COOLDOWN_MINUTES
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn cooldown_or_default<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<u32>::deserialize(deserializer)?.unwrap_or(DEFAULT_COOLDOWN_MINUTES))
}
