// src/feed/sse.rs
use crate::feed::FeedError;
use serde::Deserialize;
use serde_json::{Map, Value};

/// One dispatched Server-Sent Events message.
#[derive(Debug, Clone, PartialEq)]
pub struct SseMessage {
    pub event: String,
    pub data: String,
}

/// Line-at-a-time `text/event-stream` decoder.
#[derive(Debug, Default)]
pub struct SseParser {
    event: Option<String>,
    data: Vec<String>,
}

impl SseParser {
    /// Feed one line (without its terminator). Returns a message when a blank
    /// line completes one.
    pub fn push_line(&mut self, line: &str) -> Option<SseMessage> {
        if line.is_empty() {
            let event = self.event.take();
            let data = std::mem::take(&mut self.data);
            if event.is_none() && data.is_empty() {
                return None;
            }
            return Some(SseMessage {
                event: event.unwrap_or_else(|| "message".to_string()),
                data: data.join("\n"),
            });
        }

        if line.starts_with(':') {
            return None;
        }

        let (field, value) = match line.split_once(':') {
            Some((field, value)) => (field, value.strip_prefix(' ').unwrap_or(value)),
            None => (line, ""),
        };

        match field {
            "event" => self.event = Some(value.to_string()),
            "data" => self.data.push(value.to_string()),
            _ => {}
        }

        None
    }
}

/// Realtime database stream events.
#[derive(Debug, Clone, PartialEq)]
pub enum StreamEvent {
    Put { path: String, data: Value },
    Patch { path: String, data: Value },
    KeepAlive,
    Cancel(String),
    AuthRevoked,
    Unknown(String),
}

#[derive(Deserialize)]
struct PathData {
    path: String,
    #[serde(default)]
    data: Value,
}

impl StreamEvent {
    pub fn parse(msg: &SseMessage) -> Result<Self, FeedError> {
        let path_data = |data: &str| {
            serde_json::from_str::<PathData>(data)
                .map_err(|e| FeedError::Malformed(format!("{} payload: {e}", msg.event)))
        };

        Ok(match msg.event.as_str() {
            "put" => {
                let p = path_data(&msg.data)?;
                StreamEvent::Put {
                    path: p.path,
                    data: p.data,
                }
            }
            "patch" => {
                let p = path_data(&msg.data)?;
                StreamEvent::Patch {
                    path: p.path,
                    data: p.data,
                }
            }
            "keep-alive" => StreamEvent::KeepAlive,
            "cancel" => {
                let reason = serde_json::from_str::<Value>(&msg.data)
                    .ok()
                    .and_then(|v| v.as_str().map(str::to_string))
                    .unwrap_or_else(|| "permission denied".to_string());
                StreamEvent::Cancel(reason)
            }
            "auth_revoked" => StreamEvent::AuthRevoked,
            other => StreamEvent::Unknown(other.to_string()),
        })
    }
}

/// Replace the value at `path`; a null `data` deletes it.
pub fn apply_put(root: &mut Value, path: &str, data: Value) {
    let segments: Vec<&str> = split_path(path).collect();
    set_at(root, &segments, data);
}

/// Merge each child of `data` in under `path`.
pub fn apply_patch(root: &mut Value, path: &str, data: Value) {
    let base: Vec<&str> = split_path(path).collect();
    let children = match data {
        Value::Object(children) => children,
        other => {
            set_at(root, &base, other);
            return;
        }
    };

    for (key, value) in children {
        let mut segments = base.clone();
        segments.extend(split_path(&key));
        set_at(root, &segments, value);
    }
}

fn split_path(path: &str) -> impl Iterator<Item = &str> {
    path.split('/').filter(|s| !s.is_empty())
}

fn set_at(node: &mut Value, segments: &[&str], data: Value) {
    let Some((head, rest)) = segments.split_first() else {
        *node = data;
        return;
    };

    if let Value::Array(items) = node {
        let converted: Map<String, Value> = std::mem::take(items)
            .into_iter()
            .enumerate()
            .filter(|(_, v)| !v.is_null())
            .map(|(i, v)| (i.to_string(), v))
            .collect();
        *node = Value::Object(converted);
    }

    if !node.is_object() {
        if data.is_null() {
            return;
        }
        *node = Value::Object(Map::new());
    }

    let Value::Object(map) = node else {
        return;
    };

    if rest.is_empty() && data.is_null() {
        map.remove(*head);
    } else {
        let child = map.entry(head.to_string()).or_insert(Value::Null);
        set_at(child, rest, data);
        if child.is_null() {
            map.remove(*head);
        }
    }

    if map.is_empty() {
        *node = Value::Null;
    }
}
