use crate::errors::ServerError;
use crate::live::LiveView;
use crate::notifications::{parse_settings_form, NotificationSettings, SettingsApi};
use crate::responses::{html_response, stylesheet_response, ResultResp};
use crate::templates::{self, Notice};
use astra::{Request, Response};
use log::{debug, warn};
use std::io::Read;

/// Largest form body accepted.
const MAX_FORM_BYTES: u64 = 16 * 1024;

/// Everything request handlers need.
pub struct App {
    pub live: LiveView,
    pub settings: Box<dyn SettingsApi>,
}

/// Serve one request, turning handler errors into error pages.
pub fn respond(req: Request, app: &App) -> Response {
    debug!("{} {}", req.method(), req.uri().path());
    match handle(req, app) {
        Ok(resp) => resp,
        Err(err) => templates::html_error_response(err),
    }
}

pub fn handle(req: Request, app: &App) -> ResultResp {
    let method = req.method().as_str().to_string();
    let path = req.uri().path().to_string();

    match (method.as_str(), path.as_str()) {
        ("GET", "/") => html_response(templates::pages::home_page()),
        ("GET", "/monitor") => html_response(templates::pages::monitor_page(&app.live.current())),
        ("GET", "/monitor/live") => html_response(templates::pages::live_panel(&app.live.current())),
        ("GET", "/educational") => html_response(templates::pages::educational_page()),
        ("GET", "/notifications") => show_settings(app),
        ("POST", "/notifications") => save_settings(req, app),
        ("GET", "/static/main.css") => stylesheet_response(),
        _ => Err(ServerError::NotFound),
    }
}

fn show_settings(app: &App) -> ResultResp {
    match app.settings.fetch() {
        Ok(settings) => html_response(templates::pages::notifications_page(&settings, None)),
        Err(e) => {
            warn!("failed to load notification settings: {e}");
            let banner = Notice::error(
                "Failed to load settings",
                "Unable to fetch notification settings.",
            );
            html_response(templates::pages::notifications_page(
                &NotificationSettings::default(),
                Some(&banner),
            ))
        }
    }
}

fn save_settings(req: Request, app: &App) -> ResultResp {
    let body = read_form(req)?;
    let settings = parse_settings_form(&body)?;

    let banner = match app.settings.save(&settings) {
        Ok(()) => Notice::success(
            "Settings Saved",
            "Notification settings have been saved successfully.",
        ),
        Err(e) => {
            warn!("failed to save notification settings: {e}");
            Notice::error(
                "Failed to save settings",
                "Please check your connection or try again later.",
            )
        }
    };

    html_response(templates::pages::notifications_page(&settings, Some(&banner)))
}

fn read_form(req: Request) -> Result<String, ServerError> {
    let mut raw = String::new();
    req.into_body()
        .reader()
        .take(MAX_FORM_BYTES)
        .read_to_string(&mut raw)
        .map_err(|e| ServerError::BadRequest(format!("Unreadable form body: {e}")))?;
    Ok(raw)
}
