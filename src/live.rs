// src/live.rs
use crate::feed::{FeedState, LiveSubscriber, Subscription};
use log::{debug, info, warn};
use std::sync::{Arc, Mutex, PoisonError};

/// Holder of the one "current" feed state the monitor page renders.
///
/// Cheap to clone; every clone sees the same state. Each update replaces the
/// state wholesale.
#[derive(Clone, Default)]
pub struct LiveView {
    state: Arc<Mutex<FeedState>>,
}

impl LiveView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> FeedState {
        self.state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn replace(&self, next: FeedState) {
        match &next {
            FeedState::Loading => {}
            FeedState::HasData(r) => debug!(
                "new reading: label={:?} time={:?}",
                r.classification_label, r.timestamp
            ),
            FeedState::Empty => info!("feed reports no records"),
            FeedState::Errored(msg) => warn!("feed error: {msg}"),
        }

        *self.state.lock().unwrap_or_else(PoisonError::into_inner) = next;
    }

    /// Route every update from `subscriber` into this view.
    pub fn attach(&self, subscriber: &LiveSubscriber) -> Subscription {
        let view = self.clone();
        subscriber.subscribe(move |state| view.replace(state))
    }
}
