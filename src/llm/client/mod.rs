//! LLM client for hosted and local text-completion APIs.
//!
//! Supports Google Gemini, OpenAI-compatible chat completions and Ollama.
//! Every call is a single non-streaming request; nothing is retried.

mod config;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

pub use config::{LlmConfig, LlmProvider};

use super::{LanguageModel, LlmError};

/// LLM client for document analysis.
pub struct LlmClient {
    config: LlmConfig,
    client: Client,
}

/// Gemini generateContent request format.
#[derive(Debug, Serialize)]
struct GeminiRequest<'a> {
    contents: Vec<GeminiContent<'a>>,
    #[serde(rename = "generationConfig", skip_serializing_if = "Option::is_none")]
    generation_config: Option<GeminiGenerationConfig>,
}

#[derive(Debug, Serialize)]
struct GeminiContent<'a> {
    parts: Vec<GeminiPart<'a>>,
}

#[derive(Debug, Serialize)]
struct GeminiPart<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
struct GeminiGenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(rename = "maxOutputTokens", skip_serializing_if = "Option::is_none")]
    max_output_tokens: Option<u32>,
}

/// Gemini generateContent response format.
#[derive(Debug, Deserialize)]
struct GeminiResponse {
    candidates: Option<Vec<GeminiCandidate>>,
    error: Option<ApiErrorBody>,
}

#[derive(Debug, Deserialize)]
struct GeminiCandidate {
    content: Option<GeminiResponseContent>,
}

#[derive(Debug, Deserialize)]
struct GeminiResponseContent {
    #[serde(default)]
    parts: Vec<GeminiResponsePart>,
}

#[derive(Debug, Deserialize)]
struct GeminiResponsePart {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
}

/// OpenAI-compatible chat completion request format.
#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Option<Vec<ChatChoice>>,
    error: Option<ApiErrorBody>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ChatResponseMessage {
    content: Option<String>,
}

/// Ollama API request format.
#[derive(Debug, Serialize)]
struct OllamaRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    options: Option<OllamaOptions>,
}

#[derive(Debug, Serialize)]
struct OllamaOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    num_predict: Option<u32>,
}

/// Ollama API response format.
#[derive(Debug, Deserialize)]
struct OllamaResponse {
    response: String,
}

impl LlmClient {
    /// Create a new LLM client with the given configuration.
    pub fn new(config: LlmConfig) -> Result<Self, LlmError> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| LlmError::Connection(format!("failed to create HTTP client: {}", e)))?;

        Ok(Self { config, client })
    }

    /// Get the config.
    pub fn config(&self) -> &LlmConfig {
        &self.config
    }

    /// Whether the client has what it needs to make a call.
    pub fn is_configured(&self) -> bool {
        !self.config.provider.requires_api_key() || self.config.api_key.is_some()
    }

    fn api_key(&self) -> Result<&str, LlmError> {
        self.config.api_key.as_deref().ok_or_else(|| {
            let var = self.config.provider.api_key_var().unwrap_or("LLM_API_KEY");
            LlmError::NotConfigured(format!(
                "no API key for {} (set {} or LLM_API_KEY)",
                self.config.provider, var
            ))
        })
    }

    /// Call the Gemini generateContent API.
    async fn call_gemini(&self, prompt: &str) -> Result<String, LlmError> {
        let api_key = self.api_key()?;
        let generation_config =
            if self.config.temperature.is_some() || self.config.max_tokens.is_some() {
                Some(GeminiGenerationConfig {
                    temperature: self.config.temperature,
                    max_output_tokens: self.config.max_tokens,
                })
            } else {
                None
            };
        let request = GeminiRequest {
            contents: vec![GeminiContent {
                parts: vec![GeminiPart { text: prompt }],
            }],
            generation_config,
        };

        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.config.endpoint, self.config.model
        );
        let resp = self
            .client
            .post(&url)
            .header("x-goog-api-key", api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| LlmError::Connection(e.without_url().to_string()))?;

        let body: GeminiResponse = Self::read_json(resp).await?;
        if let Some(error) = body.error {
            return Err(LlmError::Api {
                status: 200,
                body: error.message,
            });
        }

        let text: String = body
            .candidates
            .and_then(|c| c.into_iter().next())
            .and_then(|c| c.content)
            .map(|content| {
                content
                    .parts
                    .into_iter()
                    .filter_map(|p| p.text)
                    .collect::<Vec<_>>()
                    .join("")
            })
            .unwrap_or_default();

        Ok(text)
    }

    /// Call an OpenAI-compatible chat completions API.
    async fn call_openai(&self, prompt: &str) -> Result<String, LlmError> {
        let api_key = self.api_key()?;
        let request = ChatRequest {
            model: &self.config.model,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
            max_tokens: self.config.max_tokens,
            temperature: self.config.temperature,
        };

        let url = format!("{}/v1/chat/completions", self.config.endpoint);
        let resp = self
            .client
            .post(&url)
            .bearer_auth(api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| LlmError::Connection(e.without_url().to_string()))?;

        let body: ChatResponse = Self::read_json(resp).await?;
        if let Some(error) = body.error {
            return Err(LlmError::Api {
                status: 200,
                body: error.message,
            });
        }

        Ok(body
            .choices
            .and_then(|c| c.into_iter().next())
            .and_then(|c| c.message.content)
            .unwrap_or_default())
    }

    /// Call Ollama API with a prompt.
    async fn call_ollama(&self, prompt: &str) -> Result<String, LlmError> {
        let options = if self.config.temperature.is_some() || self.config.max_tokens.is_some() {
            Some(OllamaOptions {
                temperature: self.config.temperature,
                num_predict: self.config.max_tokens,
            })
        } else {
            None
        };
        let request = OllamaRequest {
            model: &self.config.model,
            prompt,
            stream: false,
            options,
        };

        let url = format!("{}/api/generate", self.config.endpoint);
        let resp = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| LlmError::Connection(e.without_url().to_string()))?;

        let body: OllamaResponse = Self::read_json(resp).await?;
        Ok(body.response)
    }

    /// Check the status and decode a JSON body.
    async fn read_json<T: serde::de::DeserializeOwned>(
        resp: reqwest::Response,
    ) -> Result<T, LlmError> {
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(LlmError::Api {
                status: status.as_u16(),
                body,
            });
        }

        resp.json()
            .await
            .map_err(|e| LlmError::Parse(e.without_url().to_string()))
    }
}

#[async_trait]
impl LanguageModel for LlmClient {
    async fn complete(&self, prompt: &str) -> Result<String, LlmError> {
        debug!(
            provider = %self.config.provider,
            model = %self.config.model,
            prompt_chars = prompt.len(),
            "calling LLM"
        );

        let text = match self.config.provider {
            LlmProvider::Gemini => self.call_gemini(prompt).await?,
            LlmProvider::OpenAI => self.call_openai(prompt).await?,
            LlmProvider::Ollama => self.call_ollama(prompt).await?,
        };

        if text.trim().is_empty() {
            return Err(LlmError::EmptyResponse);
        }
        Ok(text)
    }

    fn model_name(&self) -> &str {
        &self.config.model
    }
}
