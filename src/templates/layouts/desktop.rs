use maud::{html, Markup, DOCTYPE};

const NAV_LINKS: [(&str, &str); 4] = [
    ("/", "Home"),
    ("/monitor", "Monitor Water Quality"),
    ("/educational", "Educational Content"),
    ("/notifications", "Notifications"),
];

pub fn desktop_layout(title: &str, current_path: &str, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) " | ClearDrops" }
                link rel="stylesheet" href="/static/main.css";
                script src="https://unpkg.com/htmx.org@1.9.12" defer {};
            }
            body {
                header class="navbar" {
                    a href="/" class="brand" { "ClearDrops" }
                    nav {
                        ul {
                            @for (href, label) in NAV_LINKS {
                                li {
                                    a href=(href) class=[(href == current_path).then_some("active")] { (label) }
                                }
                            }
                        }
                    }
                }
                (content)
            }
        }
    }
}
