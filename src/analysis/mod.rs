//! Post analysis through a generative model.
//!
//! Linear flow: build prompt, call the model, strip code fences, parse JSON,
//! normalize the three fields. Any failure ends the request; nothing is
//! retried and no partial result is ever returned.

mod normalize;
mod prompt;

use std::sync::Arc;

use serde_json::Value;
use thiserror::Error;
use tracing::{debug, error, info};

pub use normalize::{clean_model_output, format_value, normalize_field};
pub use prompt::{build_prompt, ANALYSIS_PROMPT};

use crate::llm::{LanguageModel, LlmError};
use crate::models::AnalysisResult;

/// Errors from the analysis stage.
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("No text provided for analysis.")]
    EmptyInput,

    #[error("AI invocation failed: {0}")]
    Invocation(#[from] LlmError),

    #[error("AI returned invalid JSON: {source}")]
    InvalidOutput {
        #[source]
        source: serde_json::Error,
        raw: String,
    },

    #[error("AI returned JSON that is not an object")]
    NotAnObject { raw: String },
}

/// Turns extracted text into structured feedback.
#[derive(Clone)]
pub struct Analyzer {
    model: Arc<dyn LanguageModel>,
}

impl Analyzer {
    pub fn new(model: Arc<dyn LanguageModel>) -> Self {
        Self { model }
    }

    pub fn model_name(&self) -> &str {
        self.model.model_name()
    }

    /// Analyze a post and return the three normalized fields.
    pub async fn analyze(&self, text: &str) -> Result<AnalysisResult, AnalysisError> {
        if text.trim().is_empty() {
            return Err(AnalysisError::EmptyInput);
        }

        let prompt = build_prompt(text);
        debug!(
            model = self.model.model_name(),
            prompt_chars = prompt.len(),
            "requesting analysis"
        );

        let raw = self.model.complete(&prompt).await?;
        let result = parse_model_response(&raw)?;

        info!(
            model = self.model.model_name(),
            response_chars = raw.len(),
            "analysis complete"
        );
        Ok(result)
    }
}

/// Clean, parse and normalize a raw model reply.
pub fn parse_model_response(raw: &str) -> Result<AnalysisResult, AnalysisError> {
    let cleaned = clean_model_output(raw);

    let parsed: Value = match serde_json::from_str(&cleaned) {
        Ok(value) => value,
        Err(e) => {
            error!(error = %e, raw_output = %raw, "JSON parsing failed");
            return Err(AnalysisError::InvalidOutput {
                source: e,
                raw: raw.to_string(),
            });
        }
    };

    let Value::Object(map) = parsed else {
        error!(raw_output = %raw, "JSON parsing failed: expected an object");
        return Err(AnalysisError::NotAnObject {
            raw: raw.to_string(),
        });
    };

    Ok(AnalysisResult {
        analysis: normalize_field(&map, "analysis"),
        recommendations: normalize_field(&map, "recommendations"),
        rewrite: normalize_field(&map, "rewrite"),
    })
}
