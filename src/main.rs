use crate::config::AppConfig;
use crate::feed::{FeedQuery, LiveSubscriber};
use crate::live::LiveView;
use crate::notifications::HttpSettingsApi;
use crate::router::{respond, App};
use astra::Server;
use log::{error, info};

mod config;
mod domain;
mod errors;
mod feed;
mod live;
mod notifications;
mod responses;
mod router;
mod templates;

#[cfg(test)]
mod tests;

fn main() {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    // 1️⃣ Configuration
    let cfg = match AppConfig::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            error!("❌ Configuration error: {e}");
            std::process::exit(1);
        }
    };

    // 2️⃣ Database handle + live subscription
    let database = match feed::client::init(&cfg) {
        Ok(db) => db,
        Err(e) => {
            error!("❌ Database client failed to start: {e}");
            std::process::exit(1);
        }
    };

    let live = LiveView::new();
    let subscriber = LiveSubscriber::new(database, FeedQuery::latest(cfg.feed_name.clone()));
    let subscription = live.attach(&subscriber);

    // 3️⃣ Settings service
    let settings = match HttpSettingsApi::new(cfg.settings_url.clone()) {
        Ok(api) => api,
        Err(e) => {
            error!("❌ Settings client failed to start: {e}");
            std::process::exit(1);
        }
    };

    let app = App {
        live,
        settings: Box::new(settings),
    };

    // 4️⃣ Start the server
    info!("Starting server at http://{}", cfg.bind_addr);

    let server = Server::bind(&cfg.bind_addr).max_workers(cfg.max_workers);

    let result = server.serve(move |req, _info| respond(req, &app));

    subscription.unsubscribe();

    if let Err(e) = result {
        error!("Server ended with error: {e}");
    }

    info!("Server shut down cleanly.");
}
