//! Upload analysis service.
//!
//! Runs extraction and analysis back to back for one upload. Analysis never
//! starts before extraction has produced usable text.

use std::sync::Arc;

use thiserror::Error;
use tracing::{info, warn};

use crate::analysis::{AnalysisError, Analyzer};
use crate::config::Settings;
use crate::llm::{LlmClient, LlmError};
use crate::models::{AnalysisReport, UploadedFile};
use crate::ocr::{ExtractionError, TextExtractor};

/// Failure categories surfaced to callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Filename suffix outside the allow-list.
    UnsupportedType,
    /// Extraction ran but produced only whitespace.
    NoTextExtracted,
    /// Analyzer called with empty text.
    EmptyInput,
    /// The model call itself failed (network, auth, quota).
    AiInvocation,
    /// The model replied with something that is not a JSON object.
    InvalidAiOutput,
    /// Anything else (corrupt files, missing OCR engine, task failures).
    Internal,
}

/// Errors from the analyze pipeline.
#[derive(Debug, Error)]
pub enum AnalyzeError {
    #[error(transparent)]
    Extraction(#[from] ExtractionError),

    #[error(transparent)]
    Analysis(#[from] AnalysisError),
}

impl AnalyzeError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            AnalyzeError::Extraction(ExtractionError::UnsupportedType(_)) => {
                ErrorKind::UnsupportedType
            }
            AnalyzeError::Extraction(ExtractionError::NoTextExtracted) => ErrorKind::NoTextExtracted,
            AnalyzeError::Extraction(_) => ErrorKind::Internal,
            AnalyzeError::Analysis(AnalysisError::EmptyInput) => ErrorKind::EmptyInput,
            AnalyzeError::Analysis(AnalysisError::Invocation(_)) => ErrorKind::AiInvocation,
            AnalyzeError::Analysis(AnalysisError::InvalidOutput { .. })
            | AnalyzeError::Analysis(AnalysisError::NotAnObject { .. }) => {
                ErrorKind::InvalidAiOutput
            }
        }
    }
}

/// Extract-then-analyze service shared by the HTTP handler and the CLI.
#[derive(Clone)]
pub struct AnalyzeService {
    extractor: TextExtractor,
    analyzer: Analyzer,
}

impl AnalyzeService {
    pub fn new(extractor: TextExtractor, analyzer: Analyzer) -> Self {
        Self {
            extractor,
            analyzer,
        }
    }

    /// Production wiring: Tesseract-backed extractor and the configured LLM.
    pub fn from_settings(settings: &Settings) -> Result<Self, LlmError> {
        let extractor = TextExtractor::with_config(settings.ocr.clone());
        let client = LlmClient::new(settings.llm.clone())?;
        Ok(Self::new(extractor, Analyzer::new(Arc::new(client))))
    }

    pub fn analyzer(&self) -> &Analyzer {
        &self.analyzer
    }

    /// Extract text from an upload and analyze it.
    pub async fn process(&self, file: UploadedFile) -> Result<AnalysisReport, AnalyzeError> {
        let text = match self.extractor.extract(&file).await {
            Ok(text) => text,
            Err(e) => {
                warn!(filename = %file.filename, error = %e, "extraction failed");
                return Err(e.into());
            }
        };

        let result = self.analyzer.analyze(text.as_str()).await?;
        info!(
            filename = %file.filename,
            chars = text.as_str().len(),
            model = self.analyzer.model_name(),
            "upload analyzed"
        );

        Ok(AnalysisReport::new(text.into_inner(), result))
    }
}
