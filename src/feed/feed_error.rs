use std::error::Error;
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum FeedError {
    Network(String),
    Status(u16, String),
    Cancelled(String),
    AuthRevoked,
    Stream(String),
    Malformed(String),
}

impl fmt::Display for FeedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeedError::Network(msg) => write!(f, "Network error: {msg}"),
            FeedError::Status(code, msg) => write!(f, "HTTP {code}: {msg}"),
            FeedError::Cancelled(msg) => write!(f, "Subscription cancelled: {msg}"),
            FeedError::AuthRevoked => write!(f, "Database credentials were revoked"),
            FeedError::Stream(msg) => write!(f, "Stream error: {msg}"),
            FeedError::Malformed(msg) => write!(f, "Malformed stream event: {msg}"),
        }
    }
}

impl Error for FeedError {}
