pub mod assets;
pub mod html;

pub use crate::errors::ResultResp;

// Normal HTML response
pub use assets::stylesheet_response;
pub use html::html_response;
