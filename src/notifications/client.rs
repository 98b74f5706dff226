// src/notifications/client.rs

use crate::notifications::NotificationSettings;
use log::{debug, warn};
use reqwest::blocking::Client;
use std::error::Error;
use std::fmt;
use std::time::Duration;

#[derive(Debug)]
pub enum SettingsError {
    RequestFailed(String),
    ApiError(String),
    Decode(String),
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingsError::RequestFailed(msg) => write!(f, "Request failed: {}", msg),
            SettingsError::ApiError(msg) => write!(f, "API error: {}", msg),
            SettingsError::Decode(msg) => write!(f, "Unreadable settings: {}", msg),
        }
    }
}

impl Error for SettingsError {}

/// The notification scheduling service.
pub trait SettingsApi: Send + Sync {
    fn fetch(&self) -> Result<NotificationSettings, SettingsError>;
    fn save(&self, settings: &NotificationSettings) -> Result<(), SettingsError>;
}

pub struct HttpSettingsApi {
    base_url: String,
    client: Client,
}

impl HttpSettingsApi {
    pub fn new(base_url: impl Into<String>) -> Result<Self, SettingsError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| SettingsError::RequestFailed(e.to_string()))?;

        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client,
        })
    }

    fn endpoint(&self, name: &str) -> String {
        format!("{}/{}", self.base_url, name)
    }
}

impl SettingsApi for HttpSettingsApi {
    fn fetch(&self) -> Result<NotificationSettings, SettingsError> {
        let url = self.endpoint("get-settings");
        debug!("fetching notification settings from {url}");

        let resp = self
            .client
            .get(&url)
            .send()
            .map_err(|e| SettingsError::RequestFailed(e.to_string()))?;

        if !resp.status().is_success() {
            let status = resp.status();
            let text = resp.text().unwrap_or_else(|_| "(no body)".to_string());
            return Err(SettingsError::ApiError(format!("{} - {}", status, text)));
        }

        resp.json::<NotificationSettings>()
            .map_err(|e| SettingsError::Decode(e.to_string()))
    }

    fn save(&self, settings: &NotificationSettings) -> Result<(), SettingsError> {
        let url = self.endpoint("update-settings");

        let resp = self
            .client
            .post(&url)
            .json(settings)
            .send()
            .map_err(|e| SettingsError::RequestFailed(e.to_string()))?;

        if !resp.status().is_success() {
            let status = resp.status();
            let text = resp.text().unwrap_or_else(|_| "(no body)".to_string());
            warn!("settings service rejected update: {status}");
            return Err(SettingsError::ApiError(format!("{} - {}", status, text)));
        }

        Ok(())
    }
}
