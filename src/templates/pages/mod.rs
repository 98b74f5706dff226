pub mod educational;
pub mod home;
pub mod monitor;
pub mod notifications;

pub use educational::educational_page;
pub use home::home_page;
pub use monitor::{live_panel, monitor_page};
pub use notifications::notifications_page;
