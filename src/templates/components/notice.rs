use maud::{html, Markup};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Info,
    Success,
    Error,
}

/// Transient banner shown above page content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub title: String,
    pub description: String,
}

impl Notice {
    pub fn info(title: &str, description: &str) -> Self {
        Self::new(NoticeKind::Info, title, description)
    }

    pub fn success(title: &str, description: &str) -> Self {
        Self::new(NoticeKind::Success, title, description)
    }

    pub fn error(title: &str, description: impl Into<String>) -> Self {
        Self::new(NoticeKind::Error, title, description)
    }

    fn new(kind: NoticeKind, title: &str, description: impl Into<String>) -> Self {
        Self {
            kind,
            title: title.to_string(),
            description: description.into(),
        }
    }
}

pub fn notice(n: &Notice) -> Markup {
    let class = match n.kind {
        NoticeKind::Info => "notice",
        NoticeKind::Success => "notice notice-success",
        NoticeKind::Error => "notice notice-error",
    };
    let role = match n.kind {
        NoticeKind::Error => "alert",
        _ => "status",
    };

    html! {
        div class=(class) role=(role) {
            strong { (n.title) }
            p { (n.description) }
        }
    }
}
