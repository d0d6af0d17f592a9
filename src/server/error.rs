//! HTTP error mapping.

use std::any::Any;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde_json::json;
use thiserror::Error;

use crate::services::{AnalyzeError, ErrorKind};

#[derive(Debug, Error)]
pub enum ApiError {
    /// Malformed request (bad multipart body, missing file field)
    #[error("{message}")]
    BadRequest { message: String },

    /// Upload exceeded the configured body limit
    #[error("{message}")]
    PayloadTooLarge { message: String },

    /// Failure inside the extract/analyze pipeline
    #[error(transparent)]
    Analyze(#[from] AnalyzeError),

    /// Unexpected error with full context chain
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            ApiError::PayloadTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            ApiError::Analyze(err) => match err.kind() {
                ErrorKind::UnsupportedType | ErrorKind::EmptyInput => StatusCode::BAD_REQUEST,
                ErrorKind::NoTextExtracted => StatusCode::UNPROCESSABLE_ENTITY,
                ErrorKind::AiInvocation | ErrorKind::InvalidAiOutput | ErrorKind::Internal => {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            },
            ApiError::Other(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message placed in the `error` field of the response body.
    ///
    /// AI failures get fixed wording; internal failures carry the underlying
    /// message through to the client.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::BadRequest { message } | ApiError::PayloadTooLarge { message } => {
                message.clone()
            }
            ApiError::Analyze(err) => match err.kind() {
                ErrorKind::UnsupportedType => "Unsupported file type".to_string(),
                ErrorKind::NoTextExtracted => "No text could be extracted from file".to_string(),
                ErrorKind::EmptyInput => "No text provided for analysis.".to_string(),
                ErrorKind::AiInvocation => "AI service request failed. Please try again.".to_string(),
                ErrorKind::InvalidAiOutput => "AI returned invalid JSON. Please try again.".to_string(),
                ErrorKind::Internal => format!("Internal server error: {}", err),
            },
            ApiError::Other(err) => format!("Internal server error: {}", err),
        }
    }

    fn is_server_error(&self) -> bool {
        self.status_code().is_server_error()
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if self.is_server_error() {
            tracing::error!("Request failed: {:#}", self);
        } else {
            tracing::debug!("Client error: {}", self);
        }

        let status = self.status_code();
        let body = json!({ "error": self.user_message() });
        (status, Json(body)).into_response()
    }
}

/// Turn a handler panic into the same 500 body as any other internal error.
pub fn panic_response(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "handler panicked".to_string()
    };
    ApiError::Other(anyhow::anyhow!(detail)).into_response()
}
