use maud::{html, Markup};

pub mod error;
pub mod notice;

pub use error::html_error_response;
pub use notice::{notice, Notice};

pub fn card(title: &str, body: Markup) -> Markup {
    html! {
        div class="card" {
            h2 { (title) }
            div class="card-body" {
                (body)
            }
        }
    }
}

/// Card with a coloured title, used for the sensor tiles.
pub fn metric_card(title: &str, color: &str, value: Option<f64>, unit: &str) -> Markup {
    html! {
        div class="card metric" {
            h2 style=(format!("color: {color}")) { (title) }
            div class="card-body" {
                p {
                    @if let Some(v) = value { (v.to_string()) }
                    @if !unit.is_empty() { " " (unit) }
                }
            }
        }
    }
}
