pub mod client;
mod feed_error;
mod firebase;
mod reading;
mod sse;
mod subscriber;

pub use feed_error::FeedError;
pub use firebase::{FirebaseFeed, ReconnectPolicy};
pub use reading::Reading;
pub use subscriber::{
    EventSink, FeedQuery, FeedSource, FeedState, ListenGuard, LiveSubscriber, SourceEvent,
    Subscription,
};
