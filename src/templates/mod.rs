pub mod components;
pub mod layouts;
pub mod pages;

// Re-exports for convenience
pub use components::{card, html_error_response, metric_card, notice, Notice};
pub use layouts::desktop::desktop_layout;
