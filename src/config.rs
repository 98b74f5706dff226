// src/config.rs
use crate::errors::ConfigError;
use crate::feed::ReconnectPolicy;
use std::collections::HashMap;
use std::net::SocketAddr;
use std::time::Duration;

pub const DEFAULT_FEED_NAME: &str = "sensor_data_classified";
pub const DEFAULT_SETTINGS_URL: &str = "https://flask-classifier.onrender.com";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    pub max_workers: usize,
    /// Root of the realtime database, e.g. "https://<project>.firebaseio.com".
    pub database_url: String,
    /// Database secret or ID token appended as `auth=`.
    pub database_auth: Option<String>,
    pub feed_name: String,
    /// Base URL of the notification scheduling service.
    pub settings_url: String,
    pub reconnect: ReconnectPolicy,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 3000)),
            max_workers: 8,
            database_url: String::new(),
            database_auth: None,
            feed_name: DEFAULT_FEED_NAME.to_string(),
            settings_url: DEFAULT_SETTINGS_URL.to_string(),
            reconnect: ReconnectPolicy::Never,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(&std::env::vars().collect())
    }

    /// Build the config from an explicit variable map.
    pub fn from_vars(vars: &HashMap<String, String>) -> Result<Self, ConfigError> {
        let get = |key: &str| {
            vars.get(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let mut cfg = AppConfig::default();

        if let Some(addr) = get("CLEARDROPS_BIND_ADDR") {
            cfg.bind_addr = addr
                .parse()
                .map_err(|e| ConfigError::Invalid("CLEARDROPS_BIND_ADDR", format!("{e}")))?;
        }

        if let Some(workers) = get("CLEARDROPS_MAX_WORKERS") {
            cfg.max_workers = match workers.parse::<usize>() {
                Ok(n) if n > 0 => n,
                _ => {
                    return Err(ConfigError::Invalid(
                        "CLEARDROPS_MAX_WORKERS",
                        format!("expected a positive integer, got {workers:?}"),
                    ))
                }
            };
        }

        cfg.database_url = get("CLEARDROPS_DATABASE_URL")
            .ok_or(ConfigError::Missing("CLEARDROPS_DATABASE_URL"))?
            .trim_end_matches('/')
            .to_string();
        url::Url::parse(&cfg.database_url)
            .map_err(|e| ConfigError::Invalid("CLEARDROPS_DATABASE_URL", e.to_string()))?;

        cfg.database_auth = get("CLEARDROPS_DATABASE_AUTH");

        if let Some(feed) = get("CLEARDROPS_FEED_NAME") {
            cfg.feed_name = feed.trim_matches('/').to_string();
        }

        if let Some(settings) = get("CLEARDROPS_SETTINGS_URL") {
            cfg.settings_url = settings.trim_end_matches('/').to_string();
        }

        if let Some(secs) = get("CLEARDROPS_RECONNECT_SECS") {
            let secs = secs.parse::<u64>().map_err(|e| {
                ConfigError::Invalid("CLEARDROPS_RECONNECT_SECS", e.to_string())
            })?;
            cfg.reconnect = ReconnectPolicy::FixedDelay(Duration::from_secs(secs));
        }

        Ok(cfg)
    }
}
