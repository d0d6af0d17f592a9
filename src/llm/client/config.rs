//! LLM client configuration.

use std::time::Duration;

/// LLM provider type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LlmProvider {
    /// Google Gemini generateContent API (default)
    #[default]
    Gemini,
    /// OpenAI-compatible chat completions API (OpenAI, Groq, Together.ai, etc.)
    OpenAI,
    /// Ollama API (local, no key)
    Ollama,
}

impl LlmProvider {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "gemini" | "google" => Some(Self::Gemini),
            "openai" | "groq" | "together" => Some(Self::OpenAI),
            "ollama" => Some(Self::Ollama),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Gemini => "gemini",
            Self::OpenAI => "openai",
            Self::Ollama => "ollama",
        }
    }

    pub fn default_endpoint(&self) -> &'static str {
        match self {
            Self::Gemini => "https://generativelanguage.googleapis.com",
            Self::OpenAI => "https://api.openai.com",
            Self::Ollama => "http://localhost:11434",
        }
    }

    pub fn default_model(&self) -> &'static str {
        match self {
            Self::Gemini => "gemini-2.5-pro",
            Self::OpenAI => "gpt-4o-mini",
            Self::Ollama => "llama3.1:8b",
        }
    }

    /// Provider-specific variable holding the API key, if the provider needs one.
    pub fn api_key_var(&self) -> Option<&'static str> {
        match self {
            Self::Gemini => Some("GEMINI_API_KEY"),
            Self::OpenAI => Some("OPENAI_API_KEY"),
            Self::Ollama => None,
        }
    }

    pub fn requires_api_key(&self) -> bool {
        self.api_key_var().is_some()
    }
}

impl std::fmt::Display for LlmProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Configuration for LLM client.
#[derive(Clone, PartialEq)]
pub struct LlmConfig {
    /// LLM provider
    pub provider: LlmProvider,
    /// API base URL (provider-specific defaults apply)
    pub endpoint: String,
    /// API key for hosted providers
    pub api_key: Option<String>,
    /// Model name
    pub model: String,
    /// Maximum tokens in response (provider default when unset)
    pub max_tokens: Option<u32>,
    /// Sampling temperature (provider default when unset)
    pub temperature: Option<f32>,
    /// Whole-request timeout in seconds; no timeout when unset
    pub timeout_secs: Option<u64>,
}

// Hand-written so the key never ends up in logs.
impl std::fmt::Debug for LlmConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LlmConfig")
            .field("provider", &self.provider)
            .field("endpoint", &self.endpoint)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("model", &self.model)
            .field("max_tokens", &self.max_tokens)
            .field("temperature", &self.temperature)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self::for_provider(LlmProvider::default())
    }
}

impl LlmConfig {
    /// Defaults for a given provider, without looking at the environment.
    pub fn for_provider(provider: LlmProvider) -> Self {
        Self {
            provider,
            endpoint: provider.default_endpoint().to_string(),
            api_key: None,
            model: provider.default_model().to_string(),
            max_tokens: None,
            temperature: None,
            timeout_secs: None,
        }
    }

    /// Defaults with process environment overrides applied.
    pub fn from_env() -> Self {
        Self::default().with_env_overrides()
    }

    /// Apply environment variable overrides.
    ///
    /// Supported env vars:
    /// - `LLM_PROVIDER`: "gemini" (default), "openai", "groq", "together" or "ollama"
    /// - `LLM_ENDPOINT`: API base URL (defaults based on provider)
    /// - `LLM_API_KEY`: API key; falls back to `GEMINI_API_KEY` / `OPENAI_API_KEY`
    /// - `LLM_MODEL`: Model name (defaults based on provider)
    /// - `LLM_MAX_TOKENS`: Maximum tokens in response
    /// - `LLM_TEMPERATURE`: Generation temperature
    /// - `LLM_TIMEOUT_SECS`: Request timeout; unset means no timeout
    ///
    /// For Groq, you can use:
    /// ```sh
    /// LLM_PROVIDER=groq LLM_ENDPOINT=https://api.groq.com/openai LLM_API_KEY=gsk_...
    /// ```
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary lookup (the environment in production).
    pub fn with_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        // Switching provider resets provider-specific defaults
        if let Some(provider) = get("LLM_PROVIDER").and_then(|v| LlmProvider::from_str(&v)) {
            if provider != self.provider {
                let api_key = self.api_key.take();
                self = Self {
                    api_key,
                    max_tokens: self.max_tokens,
                    temperature: self.temperature,
                    timeout_secs: self.timeout_secs,
                    ..Self::for_provider(provider)
                };
            }
        }

        if let Some(endpoint) = get("LLM_ENDPOINT") {
            self.endpoint = endpoint.trim_end_matches('/').to_string();
        }
        if let Some(model) = get("LLM_MODEL") {
            self.model = model;
        }

        // Explicit API key always wins
        if let Some(key) = get("LLM_API_KEY") {
            self.api_key = Some(key);
        } else if self.api_key.is_none() {
            self.api_key = self.provider.api_key_var().and_then(|var| get(var));
        }

        if let Some(n) = get("LLM_MAX_TOKENS").and_then(|v| v.parse().ok()) {
            self.max_tokens = Some(n);
        }
        if let Some(t) = get("LLM_TEMPERATURE").and_then(|v| v.parse().ok()) {
            self.temperature = Some(t);
        }
        if let Some(secs) = get("LLM_TIMEOUT_SECS").and_then(|v| v.parse().ok()) {
            self.timeout_secs = Some(secs);
        }
        self
    }

    pub fn with_endpoint(mut self, endpoint: &str) -> Self {
        self.endpoint = endpoint.trim_end_matches('/').to_string();
        self
    }

    pub fn with_model(mut self, model: &str) -> Self {
        self.model = model.to_string();
        self
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}
