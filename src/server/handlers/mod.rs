//! HTTP request handlers for the web server.

mod analyze;
mod api;

pub use analyze::analyze_upload;
pub use api::health;
