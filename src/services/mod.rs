//! Service layer shared by the HTTP server and the CLI.

pub mod analyze;

pub use analyze::{AnalyzeError, AnalyzeService, ErrorKind};
