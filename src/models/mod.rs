//! Data models for postcraft.
//!
//! Everything here is request scoped: nothing outlives the upload it was
//! built from.

mod report;
mod upload;

pub use report::{AnalysisReport, AnalysisResult};
pub use upload::{ExtractedText, FileKind, ImageKind, UploadedFile};
