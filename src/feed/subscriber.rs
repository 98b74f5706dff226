// src/feed/subscriber.rs
use crate::feed::{FeedError, Reading};
use log::{debug, info, warn};
use serde_json::Value;
use std::sync::{Arc, Mutex, PoisonError};

/// "The single most recent record of `feed`, ordered by `order_by`."
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedQuery {
    pub feed: String,
    pub order_by: String,
    pub limit_to_last: u32,
}

impl FeedQuery {
    pub fn latest(feed: impl Into<String>) -> Self {
        Self {
            feed: feed.into(),
            order_by: "time".to_string(),
            limit_to_last: 1,
        }
    }
}

/// What a feed source pushes: the whole current result of the query, or a
/// transport failure.
#[derive(Debug, Clone, PartialEq)]
pub enum SourceEvent {
    Snapshot(Value),
    Failed(String),
}

pub type EventSink = Box<dyn FnMut(SourceEvent) + Send>;

/// A push-based data source the subscriber listens on.
pub trait FeedSource: Send + Sync {
    /// Start delivering events for `query` into `sink` until the returned
    /// guard is released.
    fn listen(&self, query: &FeedQuery, sink: EventSink)
        -> Result<Box<dyn ListenGuard>, FeedError>;
}

pub trait ListenGuard: Send {
    fn release(&mut self);
}

/// Display state of the live feed.
///
/// `Loading` only ever appears before the first event.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum FeedState {
    #[default]
    Loading,
    HasData(Reading),
    Empty,
    Errored(String),
}

impl FeedState {
    pub fn from_event(event: SourceEvent) -> Self {
        match event {
            SourceEvent::Snapshot(snapshot) => match latest_record(&snapshot) {
                Some(record) => FeedState::HasData(Reading::from_record(record)),
                None => FeedState::Empty,
            },
            SourceEvent::Failed(msg) => FeedState::Errored(msg),
        }
    }
}

/// Pull the record out of a "latest one" snapshot.
///
/// The snapshot is normally a mapping with a single opaque key. Arrays show
/// up when the keys happen to be small integers. If more than one record is
/// present the one with the greatest `time` wins, later entries on ties.
pub fn latest_record(snapshot: &Value) -> Option<&Value> {
    let candidates: Box<dyn Iterator<Item = &Value> + '_> = match snapshot {
        Value::Null => return None,
        Value::Object(map) => Box::new(map.values()),
        Value::Array(items) => Box::new(items.iter()),
        scalar => return Some(scalar),
    };

    candidates.filter(|v| !v.is_null()).max_by(|a, b| {
        let time = |v: &Value| v.get("time").and_then(Value::as_f64).unwrap_or(f64::MIN);
        time(a).total_cmp(&time(b))
    })
}

type StateCallback = Box<dyn FnMut(FeedState) + Send>;
type CallbackSlot = Arc<Mutex<Option<StateCallback>>>;

/// Keeps one standing subscription per consumer on a feed source.
pub struct LiveSubscriber {
    source: Arc<dyn FeedSource>,
    query: FeedQuery,
}

impl LiveSubscriber {
    pub fn new(source: Arc<dyn FeedSource>, query: FeedQuery) -> Self {
        Self { source, query }
    }

    /// Start listening; every event is normalized and handed to `on_state`.
    ///
    /// `on_state` must not tear down its own subscription.
    pub fn subscribe<F>(&self, on_state: F) -> Subscription
    where
        F: FnMut(FeedState) + Send + 'static,
    {
        let callback: StateCallback = Box::new(on_state);
        let slot: CallbackSlot = Arc::new(Mutex::new(Some(callback)));

        let sink_slot = Arc::clone(&slot);
        let sink: EventSink = Box::new(move |event| {
            let state = FeedState::from_event(event);
            let mut callback = sink_slot.lock().unwrap_or_else(PoisonError::into_inner);
            match callback.as_mut() {
                Some(cb) => cb(state),
                None => debug!("dropping feed event after teardown"),
            }
        });

        info!(
            "subscribing to {} (orderBy={}, limitToLast={})",
            self.query.feed, self.query.order_by, self.query.limit_to_last
        );

        match self.source.listen(&self.query, sink) {
            Ok(guard) => Subscription {
                slot,
                guard: Some(guard),
            },
            Err(e) => {
                warn!("subscription to {} failed: {e}", self.query.feed);
                if let Some(cb) = slot
                    .lock()
                    .unwrap_or_else(PoisonError::into_inner)
                    .as_mut()
                {
                    cb(FeedState::Errored(e.to_string()));
                }
                Subscription { slot, guard: None }
            }
        }
    }
}

/// Handle to a running subscription. Dropping it tears the subscription down.
pub struct Subscription {
    slot: CallbackSlot,
    guard: Option<Box<dyn ListenGuard>>,
}

impl Subscription {
    /// Release the subscription. Once this returns the consumer callback is
    /// never invoked again.
    pub fn unsubscribe(mut self) {
        self.release();
    }

    fn release(&mut self) {
        let was_active = self
            .slot
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
            .is_some();

        if let Some(mut guard) = self.guard.take() {
            guard.release();
        }

        if was_active {
            debug!("feed subscription released");
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.release();
    }
}
