//! Analysis output shapes.

use serde::{Deserialize, Serialize};

/// Normalized model feedback. Every field is always populated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub analysis: String,
    pub recommendations: String,
    pub rewrite: String,
}

/// Success body of the analyze endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub extracted_text: String,
    pub analysis: String,
    pub recommendations: String,
    pub rewrite: String,
}

impl AnalysisReport {
    pub fn new(extracted_text: String, result: AnalysisResult) -> Self {
        Self {
            extracted_text,
            analysis: result.analysis,
            recommendations: result.recommendations,
            rewrite: result.rewrite,
        }
    }
}
