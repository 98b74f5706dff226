mod client;
mod form;
mod settings;

pub use client::{HttpSettingsApi, SettingsApi, SettingsError};
pub use form::parse_settings_form;
pub use settings::{NotificationSettings, QuietHours};
