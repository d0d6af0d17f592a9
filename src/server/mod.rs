//! Web server for document analysis.
//!
//! Exposes a single upload endpoint that extracts text from the document and
//! returns the model's review as JSON, plus a health check.

mod error;
mod handlers;
mod routes;

pub use error::ApiError;
pub use routes::create_router;

use std::net::SocketAddr;
use std::sync::Arc;

use crate::config::Settings;
use crate::services::AnalyzeService;

/// Shared state for the web server.
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<AnalyzeService>,
}

impl AppState {
    pub fn new(service: AnalyzeService) -> Self {
        Self {
            service: Arc::new(service),
        }
    }

    pub fn from_settings(settings: &Settings) -> anyhow::Result<Self> {
        Ok(Self::new(AnalyzeService::from_settings(settings)?))
    }
}

/// Start the web server.
pub async fn serve(settings: &Settings, host: &str, port: u16) -> anyhow::Result<()> {
    if settings.llm.provider.requires_api_key() && settings.llm.api_key.is_none() {
        tracing::warn!(
            "No API key configured for {}; analysis requests will fail until one is set",
            settings.llm.provider
        );
    }

    let state = AppState::from_settings(settings)?;
    let app = create_router(state, &settings.server);

    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;
    tracing::info!("Starting server at http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
