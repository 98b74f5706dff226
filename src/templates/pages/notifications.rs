// templates/pages/notifications.rs

use crate::notifications::{NotificationSettings, QuietHours};
use crate::templates::{desktop_layout, notice, Notice};
use maud::{html, Markup};

pub fn notifications_page(settings: &NotificationSettings, banner: Option<&Notice>) -> Markup {
    let quiet = settings.no_notify.clone().unwrap_or_default();
    // Offer a full week when nothing is stored yet.
    let mut offered = quiet.clone();
    if offered.days.is_empty() {
        offered.days = QuietHours::week();
    }

    desktop_layout(
        "Notifications",
        "/notifications",
        html! {
            main class="container narrow" {
                h1 { "Notifications" }

                @if let Some(n) = banner {
                    (notice(n))
                }

                section class="card" {
                    h2 { "Notification Settings" }
                    p class="muted" { "Manage your notification preferences." }

                    form method="post" action="/notifications" class="settings-form" {
                        label for="email" { "Email Address" }
                        input type="email" id="email" name="email" value=(settings.email) autocomplete="email";

                        label class="check" {
                            input type="checkbox" id="enabled" name="enabled" checked[settings.enabled];
                            " Enable Notifications"
                        }

                        label for="cooldown_minutes" { "Email Cooldown (minutes)" }
                        input
                            type="number"
                            id="cooldown_minutes"
                            name="cooldown_minutes"
                            min="1"
                            required
                            value=(settings.cooldown_minutes);

                        fieldset {
                            label class="check" {
                                input type="checkbox" id="quiet_enabled" name="quiet_enabled" checked[settings.no_notify.is_some()];
                                " Don't Disturb Mode"
                            }

                            label for="quiet_start" { "Do not notify after" }
                            input type="time" id="quiet_start" name="quiet_start" value=(quiet.start);

                            label for="quiet_end" { "Resume notifications at" }
                            input type="time" id="quiet_end" name="quiet_end" value=(quiet.end);

                            p { "Do not notify on these days:" }
                            div class="days" {
                                @for (day, muted) in offered.ordered_days() {
                                    input type="hidden" name="days_shown" value=(day);
                                    label class="check" {
                                        input type="checkbox" name="day" value=(day) checked[muted];
                                        " " (capitalize(day))
                                    }
                                }
                            }
                        }

                        button type="submit" class="btn" { "Save Settings" }
                    }
                }
            }
        },
    )
}

fn capitalize(day: &str) -> String {
    let mut chars = day.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
