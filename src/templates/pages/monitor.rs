use crate::domain::{format_timestamp, justify, Verdict};
use crate::feed::{FeedState, Reading};
use crate::templates::{card, desktop_layout, metric_card, notice, Notice};
use maud::{html, Markup};

/// Seconds between re-renders of the live panel.
const REFRESH_SECS: u32 = 3;

pub fn monitor_page(state: &FeedState) -> Markup {
    desktop_layout(
        "Monitor",
        "/monitor",
        html! {
            main class="container" {
                h1 class="center" { "Dashboard" }
                (live_panel(state))
            }
        },
    )
}

/// The part of the monitor page that follows the feed.
pub fn live_panel(state: &FeedState) -> Markup {
    html! {
        div
            id="live-panel"
            hx-get="/monitor/live"
            hx-trigger=(format!("every {REFRESH_SECS}s"))
            hx-swap="outerHTML"
        {
            @match state {
                FeedState::Loading => {
                    p class="center" { "Loading latest sensor data..." }
                }
                FeedState::Empty => {
                    (notice(&Notice::info("No Data", "No sensor data found in the database.")))
                    (no_data_card())
                }
                FeedState::Errored(msg) => {
                    (notice(&Notice::error("Firebase Error", format!("Failed to fetch data: {msg}"))))
                    (no_data_card())
                }
                FeedState::HasData(reading) => (reading_view(reading)),
            }
        }
    }
}

fn no_data_card() -> Markup {
    card(
        "No Data Available",
        html! {
            p {
                "Could not retrieve sensor data from the database. "
                "Please ensure the system is running and check back later."
            }
        },
    )
}

fn reading_view(reading: &Reading) -> Markup {
    let verdict = Verdict::from_label(&reading.classification_label);
    let reasons = justify(reading);
    let tone = if verdict == Verdict::Suitable { "good" } else { "bad" };

    html! {
        p class="center muted" {
            "Last updated: " (format_timestamp(reading.timestamp.as_ref()))
        }
        div class="grid" {
            (metric_card("Temperature", "#d190a8", reading.temperature, "°C"))
            (metric_card("TDS", "#9787a1", reading.total_dissolved_solids, "ppm"))
            (metric_card("pH", "#9bbd82", reading.acidity, ""))
            (metric_card("Turbidity", "#72bab2", reading.turbidity, "NTU"))

            div class="card wide" id="classification" {
                h2 { "Classification" }
                div class="card-body" {
                    p class=(format!("badge {tone}")) {
                        @if verdict == Verdict::Suitable { "✅ Suitable" } @else { "❌ Unsuitable" }
                    }
                    h4 class=(tone) {
                        "Reason" @if reasons.len() > 1 { "s" } ":"
                    }
                    ul class="reasons" {
                        @for reason in &reasons {
                            li { (reason) }
                        }
                    }
                }
            }
        }
    }
}
