//! Runtime configuration.
//!
//! Everything comes from the process environment (optionally seeded from a
//! `.env` file by `main`). Unset or blank variables fall back to defaults.

use crate::llm::LlmConfig;
use crate::ocr::OcrConfig;

/// Default listen address for `serve`.
pub const DEFAULT_BIND: &str = "127.0.0.1:8000";

/// Origins allowed by CORS when none are configured: the deployed frontend
/// and the local dev server.
pub const DEFAULT_CORS_ORIGINS: &[&str] = &[
    "https://post-craft-sigma.vercel.app",
    "http://localhost:3000",
];

/// Default upload size limit (20 MiB).
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 20 * 1024 * 1024;

/// HTTP layer settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Allowed CORS origins. A single `*` allows any origin.
    pub cors_origins: Vec<String>,
    /// Maximum accepted request body size in bytes.
    pub max_upload_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            cors_origins: DEFAULT_CORS_ORIGINS.iter().map(|o| o.to_string()).collect(),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        }
    }
}

impl ServerConfig {
    pub fn allows_any_origin(&self) -> bool {
        self.cors_origins.iter().any(|o| o == "*")
    }
}

/// Application settings.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Listen address for the HTTP server.
    pub bind: String,
    pub server: ServerConfig,
    pub llm: LlmConfig,
    pub ocr: OcrConfig,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            bind: DEFAULT_BIND.to_string(),
            server: ServerConfig::default(),
            llm: LlmConfig::default(),
            ocr: OcrConfig::default(),
        }
    }
}

impl Settings {
    /// Load settings from the process environment.
    ///
    /// Supported env vars (in addition to the `LLM_*` and `OCR_*` families):
    /// - `POSTCRAFT_BIND`: listen address, e.g. "0.0.0.0:8000" or "8080"
    /// - `CORS_ALLOWED_ORIGINS`: comma-separated origins, or `*`
    /// - `MAX_UPLOAD_BYTES`: request body limit
    pub fn from_env() -> Self {
        let mut settings = Self::from_lookup(|key| std::env::var(key).ok());
        settings.ocr = settings.ocr.with_env_overrides();
        settings
    }

    /// Build settings from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let mut settings = Self::default();

        if let Some(bind) = get("POSTCRAFT_BIND") {
            settings.bind = bind.trim().to_string();
        }

        if let Some(origins) = get("CORS_ALLOWED_ORIGINS") {
            let origins: Vec<String> = origins
                .split(',')
                .map(|o| o.trim().trim_end_matches('/').to_string())
                .filter(|o| !o.is_empty())
                .collect();
            if !origins.is_empty() {
                settings.server.cors_origins = origins;
            }
        }

        match get("MAX_UPLOAD_BYTES").map(|v| v.trim().parse::<usize>()) {
            Some(Ok(n)) if n > 0 => settings.server.max_upload_bytes = n,
            Some(_) => tracing::warn!("Ignoring invalid MAX_UPLOAD_BYTES value"),
            None => {}
        }

        settings.llm = settings.llm.with_overrides(&lookup);
        settings
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::LlmProvider;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let settings = Settings::from_lookup(lookup(&[]));
        assert_eq!(settings.bind, "127.0.0.1:8000");
        assert_eq!(
            settings.server.cors_origins,
            vec!["https://post-craft-sigma.vercel.app", "http://localhost:3000"]
        );
        assert_eq!(settings.server.max_upload_bytes, 20 * 1024 * 1024);
        assert!(!settings.server.allows_any_origin());
        assert_eq!(settings.llm.provider, LlmProvider::Gemini);
    }

    #[test]
    fn test_cors_origins_parsed() {
        let settings = Settings::from_lookup(lookup(&[(
            "CORS_ALLOWED_ORIGINS",
            "https://app.example.com/, http://localhost:3000 ,,",
        )]));
        assert_eq!(
            settings.server.cors_origins,
            vec!["https://app.example.com", "http://localhost:3000"]
        );

        let any = Settings::from_lookup(lookup(&[("CORS_ALLOWED_ORIGINS", "*")]));
        assert!(any.server.allows_any_origin());
    }

    #[test]
    fn test_upload_limit_and_bind() {
        let settings = Settings::from_lookup(lookup(&[
            ("MAX_UPLOAD_BYTES", "1024"),
            ("POSTCRAFT_BIND", "0.0.0.0:9000"),
        ]));
        assert_eq!(settings.server.max_upload_bytes, 1024);
        assert_eq!(settings.bind, "0.0.0.0:9000");

        let bad = Settings::from_lookup(lookup(&[("MAX_UPLOAD_BYTES", "lots")]));
        assert_eq!(bad.server.max_upload_bytes, DEFAULT_MAX_UPLOAD_BYTES);
    }

    #[test]
    fn test_llm_overrides_flow_through() {
        let settings = Settings::from_lookup(lookup(&[
            ("LLM_PROVIDER", "ollama"),
            ("LLM_MODEL", "mistral"),
        ]));
        assert_eq!(settings.llm.provider, LlmProvider::Ollama);
        assert_eq!(settings.llm.model, "mistral");
    }
}
