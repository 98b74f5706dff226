// src/feed/client.rs
use crate::config::AppConfig;
use crate::feed::{FeedError, FeedSource, FirebaseFeed};
use log::info;
use std::sync::{Arc, OnceLock};

static DATABASE: OnceLock<Arc<dyn FeedSource>> = OnceLock::new();

/// Open the process-wide database handle, or return the one already open.
pub fn init(cfg: &AppConfig) -> Result<Arc<dyn FeedSource>, FeedError> {
    if let Some(existing) = DATABASE.get() {
        return Ok(Arc::clone(existing));
    }

    let feed = FirebaseFeed::new(
        cfg.database_url.clone(),
        cfg.database_auth.clone(),
        cfg.reconnect,
    )?;
    info!("realtime database client ready for {}", cfg.database_url);

    let handle: Arc<dyn FeedSource> = Arc::new(feed);
    Ok(Arc::clone(DATABASE.get_or_init(|| handle)))
}
