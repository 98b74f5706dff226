pub mod explain;
pub mod thresholds;
pub mod timestamp;

pub use explain::{justify, Verdict};
pub use timestamp::format_timestamp;
