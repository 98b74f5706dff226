use crate::feed::{EventSink, FeedError, FeedQuery, FeedSource, ListenGuard, SourceEvent};
use crate::live::LiveView;
use crate::notifications::{NotificationSettings, SettingsApi, SettingsError};
use crate::router::App;
use astra::{Body, Response};
use std::io::{BufRead, BufReader, Read, Write};
use std::net::TcpListener;
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;
use std::time::Duration;

/// In-process feed the tests push events into.
#[derive(Clone, Default)]
pub struct MemoryFeed {
    inner: Arc<Mutex<MemoryInner>>,
}

#[derive(Default)]
struct MemoryInner {
    next_id: u64,
    listeners: Vec<(u64, EventSink)>,
    queries: Vec<FeedQuery>,
    releases: usize,
    /// Keep delivering to released listeners, like a source slow to detach.
    leaky: bool,
    refuse: Option<String>,
}

impl MemoryFeed {
    pub fn new() -> Self {
        Self::default()
    }

    /// A feed whose guards never detach their listeners.
    pub fn leaky() -> Self {
        let feed = Self::default();
        feed.inner.lock().unwrap().leaky = true;
        feed
    }

    /// A feed that refuses every subscription.
    pub fn refusing(msg: &str) -> Self {
        let feed = Self::default();
        feed.inner.lock().unwrap().refuse = Some(msg.to_string());
        feed
    }

    pub fn push(&self, event: SourceEvent) {
        let mut inner = self.inner.lock().unwrap();
        for (_, sink) in inner.listeners.iter_mut() {
            sink(event.clone());
        }
    }

    pub fn listener_count(&self) -> usize {
        self.inner.lock().unwrap().listeners.len()
    }

    pub fn release_count(&self) -> usize {
        self.inner.lock().unwrap().releases
    }

    pub fn queries(&self) -> Vec<FeedQuery> {
        self.inner.lock().unwrap().queries.clone()
    }
}

impl FeedSource for MemoryFeed {
    fn listen(
        &self,
        query: &FeedQuery,
        sink: EventSink,
    ) -> Result<Box<dyn ListenGuard>, FeedError> {
        let mut inner = self.inner.lock().unwrap();
        if let Some(msg) = &inner.refuse {
            return Err(FeedError::Network(msg.clone()));
        }

        inner.next_id += 1;
        let id = inner.next_id;
        inner.queries.push(query.clone());
        inner.listeners.push((id, sink));

        Ok(Box::new(MemoryGuard {
            id,
            inner: Arc::clone(&self.inner),
        }))
    }
}

struct MemoryGuard {
    id: u64,
    inner: Arc<Mutex<MemoryInner>>,
}

impl ListenGuard for MemoryGuard {
    fn release(&mut self) {
        let mut inner = self.inner.lock().unwrap();
        inner.releases += 1;
        if !inner.leaky {
            let id = self.id;
            inner.listeners.retain(|(listener, _)| *listener != id);
        }
    }
}

/// Settings service double that records what was saved.
#[derive(Default)]
pub struct FakeSettings {
    pub stored: Option<NotificationSettings>,
    pub fail_fetch: bool,
    pub fail_save: bool,
    pub saved: Mutex<Vec<NotificationSettings>>,
}

impl SettingsApi for Arc<FakeSettings> {
    fn fetch(&self) -> Result<NotificationSettings, SettingsError> {
        if self.fail_fetch {
            return Err(SettingsError::RequestFailed("connection refused".into()));
        }
        Ok(self.stored.clone().unwrap_or_default())
    }

    fn save(&self, settings: &NotificationSettings) -> Result<(), SettingsError> {
        if self.fail_save {
            return Err(SettingsError::ApiError("500 Internal Server Error - boom".into()));
        }
        self.saved.lock().unwrap().push(settings.clone());
        Ok(())
    }
}

/// An `App` over a fresh live view and the given settings double.
pub fn test_app(settings: Arc<FakeSettings>) -> App {
    App {
        live: LiveView::new(),
        settings: Box::new(settings),
    }
}

pub fn body_string(resp: Response) -> String {
    let mut body = String::new();
    resp.into_body().reader().read_to_string(&mut body).unwrap();
    body
}

pub fn form_body(body: &str) -> Body {
    Body::from(body.to_string())
}

/// Answer exactly one HTTP request on a local port with `status` and `body`.
/// Returns the base URL and a handle yielding the raw request text.
pub fn serve_once(status: u16, body: &str) -> (String, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let base = format!("http://{}", listener.local_addr().unwrap());
    let body = body.to_string();

    let handle = std::thread::spawn(move || {
        let (stream, _) = listener.accept().unwrap();
        let mut reader = BufReader::new(stream.try_clone().unwrap());

        let mut request = String::new();
        let mut content_length = 0usize;
        loop {
            let mut line = String::new();
            reader.read_line(&mut line).unwrap();
            if let Some(value) = line.to_ascii_lowercase().strip_prefix("content-length:") {
                content_length = value.trim().parse().unwrap();
            }
            request.push_str(&line);
            if line == "\r\n" || line.is_empty() {
                break;
            }
        }

        let mut payload = vec![0u8; content_length];
        reader.read_exact(&mut payload).unwrap();
        request.push_str(&String::from_utf8_lossy(&payload));

        let mut stream = stream;
        write!(
            stream,
            "HTTP/1.1 {status} Test\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        )
        .unwrap();
        stream.flush().unwrap();

        request
    });

    (base, handle)
}

/// One scripted event-stream connection: each chunk is written after its
/// delay, then the connection is closed.
pub type ScriptedStream = Vec<(Duration, String)>;

/// Serve `streams` as `text/event-stream` responses, one connection each, in
/// order. Returns the base URL and the request heads received so far.
pub fn serve_event_streams(streams: Vec<ScriptedStream>) -> (String, Arc<Mutex<Vec<String>>>) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let base = format!("http://{}", listener.local_addr().unwrap());
    let requests = Arc::new(Mutex::new(Vec::new()));
    let seen = Arc::clone(&requests);

    std::thread::spawn(move || {
        for script in streams {
            let Ok((stream, _)) = listener.accept() else {
                return;
            };
            let mut reader = BufReader::new(stream.try_clone().unwrap());

            let mut head = String::new();
            loop {
                let mut line = String::new();
                if reader.read_line(&mut line).unwrap_or(0) == 0 || line == "\r\n" {
                    break;
                }
                head.push_str(&line);
            }
            seen.lock().unwrap().push(head);

            let mut stream = stream;
            let _ = write!(
                stream,
                "HTTP/1.1 200 OK\r\nContent-Type: text/event-stream\r\nConnection: close\r\n\r\n"
            );
            let _ = stream.flush();

            for (delay, chunk) in script {
                std::thread::sleep(delay);
                if stream.write_all(chunk.as_bytes()).is_err() || stream.flush().is_err() {
                    break;
                }
            }
        }
    });

    (base, requests)
}

/// An SSE frame as the realtime database sends it.
pub fn sse_frame(event: &str, data: &str) -> String {
    format!("event: {event}\ndata: {data}\n\n")
}
