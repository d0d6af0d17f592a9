//! Generative model access.
//!
//! The analyzer only sees `LanguageModel`; `LlmClient` is the production
//! implementation and tests substitute canned responders.

mod client;

use async_trait::async_trait;
use thiserror::Error;

pub use client::{LlmClient, LlmConfig, LlmProvider};

/// A text-completion model: one prompt in, one completion out.
#[async_trait]
pub trait LanguageModel: Send + Sync {
    /// Send a prompt and return the raw completion text.
    async fn complete(&self, prompt: &str) -> Result<String, LlmError>;

    /// Model identifier, for logging.
    fn model_name(&self) -> &str;
}

/// Errors that can occur during LLM operations.
#[derive(Debug, Error)]
pub enum LlmError {
    /// Missing credentials or other unusable configuration
    #[error("LLM not configured: {0}")]
    NotConfigured(String),
    /// Failed to reach the LLM service
    #[error("Connection error: {0}")]
    Connection(String),
    /// API returned an error
    #[error("API error (HTTP {status}): {body}")]
    Api { status: u16, body: String },
    /// Failed to decode the API envelope
    #[error("Parse error: {0}")]
    Parse(String),
    /// The model answered with nothing
    #[error("LLM returned an empty response")]
    EmptyResponse,
}
