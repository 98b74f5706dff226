// src/feed/firebase.rs
use crate::feed::sse::{apply_patch, apply_put, SseParser, StreamEvent};
use crate::feed::{EventSink, FeedError, FeedQuery, FeedSource, ListenGuard, SourceEvent};
use log::{debug, info, warn};
use reqwest::blocking::{Client, Response};
use reqwest::header::ACCEPT;
use serde_json::Value;
use std::io::{self, BufRead, BufReader};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::sync::Arc;
use std::time::Duration;
use url::Url;

const USER_AGENT: &str = concat!("cleardrops/", env!("CARGO_PKG_VERSION"));

/// How often a quiet stream checks for teardown.
const STOP_POLL: Duration = Duration::from_millis(200);

/// What to do after the stream fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReconnectPolicy {
    /// Report the failure and stop.
    Never,
    /// Report the failure, wait, open a fresh stream.
    FixedDelay(Duration),
}

/// Realtime Database REST streaming client.
pub struct FirebaseFeed {
    client: Client,
    database_url: String,
    auth: Option<String>,
    reconnect: ReconnectPolicy,
}

impl FirebaseFeed {
    pub fn new(
        database_url: impl Into<String>,
        auth: Option<String>,
        reconnect: ReconnectPolicy,
    ) -> Result<Self, FeedError> {
        // No overall timeout: the stream stays open indefinitely.
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .connect_timeout(Duration::from_secs(10))
            .timeout(None::<Duration>)
            .build()
            .map_err(|e| FeedError::Network(e.to_string()))?;

        Ok(Self {
            client,
            database_url: database_url.into().trim_end_matches('/').to_string(),
            auth,
            reconnect,
        })
    }

    /// `{database}/{feed}.json?orderBy="time"&limitToLast=1`
    pub fn stream_url(&self, query: &FeedQuery) -> Result<Url, FeedError> {
        let raw = format!("{}/{}.json", self.database_url, query.feed.trim_matches('/'));
        let mut url = Url::parse(&raw).map_err(|e| FeedError::Network(format!("{raw}: {e}")))?;

        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("orderBy", &format!("\"{}\"", query.order_by));
            pairs.append_pair("limitToLast", &query.limit_to_last.to_string());
            if let Some(auth) = &self.auth {
                pairs.append_pair("auth", auth);
            }
        }

        Ok(url)
    }
}

impl FeedSource for FirebaseFeed {
    fn listen(
        &self,
        query: &FeedQuery,
        sink: EventSink,
    ) -> Result<Box<dyn ListenGuard>, FeedError> {
        let stop = Arc::new(AtomicBool::new(false));

        let worker = StreamWorker {
            client: self.client.clone(),
            url: self.stream_url(query)?,
            reconnect: self.reconnect,
            stop: Arc::clone(&stop),
        };

        std::thread::Builder::new()
            .name(format!("feed-{}", query.feed))
            .spawn(move || worker.run(sink))
            .map_err(|e| FeedError::Stream(format!("could not start stream thread: {e}")))?;

        Ok(Box::new(StreamGuard { stop }))
    }
}

struct StreamGuard {
    stop: Arc<AtomicBool>,
}

impl ListenGuard for StreamGuard {
    fn release(&mut self) {
        self.stop.store(true, Ordering::SeqCst);
    }
}

struct StreamWorker {
    client: Client,
    url: Url,
    reconnect: ReconnectPolicy,
    stop: Arc<AtomicBool>,
}

impl StreamWorker {
    fn stopped(&self) -> bool {
        self.stop.load(Ordering::SeqCst)
    }

    fn run(self, mut sink: EventSink) {
        loop {
            if self.stopped() {
                return;
            }

            match self.stream_once(&mut sink) {
                Ok(()) => return,
                Err(e) => {
                    if self.stopped() {
                        return;
                    }
                    warn!("feed stream failed: {e}");
                    sink(SourceEvent::Failed(e.to_string()));
                }
            }

            match self.reconnect {
                ReconnectPolicy::Never => return,
                ReconnectPolicy::FixedDelay(delay) => {
                    info!("reconnecting feed stream in {}s", delay.as_secs());
                    if !self.sleep_unless_stopped(delay) {
                        return;
                    }
                }
            }
        }
    }

    /// Returns false if teardown happened while waiting.
    fn sleep_unless_stopped(&self, delay: Duration) -> bool {
        let step = STOP_POLL;
        let mut waited = Duration::ZERO;
        while waited < delay {
            if self.stopped() {
                return false;
            }
            std::thread::sleep(step.min(delay - waited));
            waited += step;
        }
        !self.stopped()
    }

    /// Read one connection until it ends. `Ok` only when torn down.
    fn stream_once(&self, sink: &mut EventSink) -> Result<(), FeedError> {
        debug!("opening feed stream {}", redact(&self.url));

        let resp = self
            .client
            .get(self.url.clone())
            .header(ACCEPT, "text/event-stream")
            .send()
            .map_err(|e| FeedError::Network(e.without_url().to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().unwrap_or_default();
            return Err(FeedError::Status(status.as_u16(), error_message(&body)));
        }

        let lines = spawn_line_reader(resp)?;
        let mut parser = SseParser::default();
        let mut snapshot = Value::Null;

        loop {
            if self.stopped() {
                return Ok(());
            }

            let line = match lines.recv_timeout(STOP_POLL) {
                Ok(Ok(line)) => line,
                Ok(Err(e)) => return Err(FeedError::Network(e.to_string())),
                Err(RecvTimeoutError::Timeout) => continue,
                Err(RecvTimeoutError::Disconnected) => {
                    if self.stopped() {
                        return Ok(());
                    }
                    return Err(FeedError::Stream("stream closed by server".to_string()));
                }
            };

            if self.stopped() {
                return Ok(());
            }

            let Some(msg) = parser.push_line(line.trim_end_matches(['\r', '\n'])) else {
                continue;
            };

            match StreamEvent::parse(&msg) {
                Ok(StreamEvent::Put { path, data }) => {
                    apply_put(&mut snapshot, &path, data);
                    sink(SourceEvent::Snapshot(snapshot.clone()));
                }
                Ok(StreamEvent::Patch { path, data }) => {
                    apply_patch(&mut snapshot, &path, data);
                    sink(SourceEvent::Snapshot(snapshot.clone()));
                }
                Ok(StreamEvent::KeepAlive) => {}
                Ok(StreamEvent::Cancel(reason)) => return Err(FeedError::Cancelled(reason)),
                Ok(StreamEvent::AuthRevoked) => return Err(FeedError::AuthRevoked),
                Ok(StreamEvent::Unknown(event)) => debug!("ignoring stream event {event:?}"),
                Err(e) => warn!("skipping stream event: {e}"),
            }
        }
    }
}

/// Read the response body line by line on its own thread.
///
/// The reader blocks until the server sends something; the worker only waits
/// on the channel, so teardown never depends on the next keep-alive.
fn spawn_line_reader(resp: Response) -> Result<Receiver<io::Result<String>>, FeedError> {
    let (tx, rx) = mpsc::channel();

    std::thread::Builder::new()
        .name("feed-reader".to_string())
        .spawn(move || {
            let mut reader = BufReader::new(resp);
            loop {
                let mut line = String::new();
                match reader.read_line(&mut line) {
                    Ok(0) => return,
                    Ok(_) => {
                        if tx.send(Ok(line)).is_err() {
                            return;
                        }
                    }
                    Err(e) => {
                        let _ = tx.send(Err(e));
                        return;
                    }
                }
            }
        })
        .map_err(|e| FeedError::Stream(format!("could not start reader thread: {e}")))?;

    Ok(rx)
}

/// Firebase error bodies look like `{"error": "Permission denied"}`.
fn error_message(body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| v.get("error").and_then(Value::as_str).map(str::to_string))
        .unwrap_or_else(|| {
            let trimmed = body.trim();
            if trimmed.is_empty() {
                "no response body".to_string()
            } else {
                trimmed.to_string()
            }
        })
}

// Keep the auth token out of logs.
fn redact(url: &Url) -> String {
    let mut shown = url.clone();
    let pairs: Vec<(String, String)> = url
        .query_pairs()
        .map(|(k, v)| {
            let v = if k == "auth" { "***".into() } else { v.into_owned() };
            (k.into_owned(), v)
        })
        .collect();
    shown.query_pairs_mut().clear().extend_pairs(pairs);
    shown.to_string()
}
