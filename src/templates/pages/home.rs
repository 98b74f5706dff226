// templates/pages/home.rs

use crate::templates::desktop_layout;
use maud::{html, Markup};

pub fn home_page() -> Markup {
    desktop_layout(
        "Home",
        "/",
        html! {
            section class="hero" {
                h1 { "ClearDrops: Real-time Water Quality Monitoring" }
                p { "Ensuring clean and safe water for a sustainable future." }
                a href="/monitor" class="btn" { "Monitor Water Quality" }
            }
        },
    )
}
