// src/notifications/form.rs

use crate::errors::ServerError;
use crate::notifications::{NotificationSettings, QuietHours};
use std::collections::BTreeMap;

/// Decode the settings form (`application/x-www-form-urlencoded`).
///
/// Checkboxes only appear when ticked. Every day offered on the form is
/// echoed back in `days_shown` so unticked days are stored as `false`.
pub fn parse_settings_form(body: &str) -> Result<NotificationSettings, ServerError> {
    let mut email = String::new();
    let mut enabled = false;
    let mut cooldown = None;
    let mut quiet_enabled = false;
    let mut start = String::new();
    let mut end = String::new();
    let mut days: BTreeMap<String, bool> = BTreeMap::new();
    let mut muted = Vec::new();

    for (key, value) in url::form_urlencoded::parse(body.as_bytes()) {
        match key.as_ref() {
            "email" => email = value.trim().to_string(),
            "enabled" => enabled = true,
            "cooldown_minutes" => cooldown = Some(value.trim().to_string()),
            "quiet_enabled" => quiet_enabled = true,
            "quiet_start" => start = value.trim().to_string(),
            "quiet_end" => end = value.trim().to_string(),
            "days_shown" => {
                days.insert(value.into_owned(), false);
            }
            "day" => muted.push(value.into_owned()),
            _ => {}
        }
    }

    let cooldown_minutes = match cooldown.as_deref() {
        None | Some("") => {
            return Err(ServerError::BadRequest(
                "cooldown minutes is required".into(),
            ))
        }
        Some(raw) => match raw.parse::<u32>() {
            Ok(n) if n >= 1 => n,
            _ => {
                return Err(ServerError::BadRequest(format!(
                    "cooldown minutes must be a whole number of at least 1, got {raw:?}"
                )))
            }
        },
    };

    for day in muted {
        days.insert(day, true);
    }

    let no_notify = quiet_enabled.then(|| QuietHours { start, end, days });

    Ok(NotificationSettings {
        email,
        enabled,
        cooldown_minutes,
        no_notify,
    })
}
