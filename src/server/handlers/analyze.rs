//! Upload analysis endpoint.

use axum::{
    extract::{multipart::MultipartRejection, Multipart, State},
    http::StatusCode,
    Json,
};

use super::super::error::ApiError;
use super::super::AppState;
use crate::models::{AnalysisReport, UploadedFile};

/// Multipart field carrying the document.
const FILE_FIELD: &str = "file";

/// Accept a single uploaded document, extract its text and return the AI review.
pub async fn analyze_upload(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<AnalysisReport>, ApiError> {
    let mut multipart = multipart.map_err(|e| ApiError::BadRequest {
        message: format!("Expected a multipart/form-data upload: {}", e.body_text()),
    })?;

    let file = read_upload(&mut multipart).await?;
    tracing::debug!(filename = %file.filename, bytes = file.bytes.len(), "Received upload");

    let report = state.service.process(file).await?;
    Ok(Json(report))
}

async fn read_upload(multipart: &mut Multipart) -> Result<UploadedFile, ApiError> {
    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }

        let filename = field.file_name().unwrap_or_default().to_string();
        let bytes = field.bytes().await.map_err(multipart_error)?;
        return Ok(UploadedFile::new(filename, bytes));
    }

    Err(ApiError::BadRequest {
        message: "No file uploaded".to_string(),
    })
}

fn multipart_error(err: axum::extract::multipart::MultipartError) -> ApiError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        ApiError::PayloadTooLarge {
            message: "Uploaded file is too large".to_string(),
        }
    } else {
        ApiError::BadRequest {
            message: format!("Failed to read multipart data: {}", err.body_text()),
        }
    }
}
