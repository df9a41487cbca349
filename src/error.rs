//! Error types for the extraction server

use axum::{
    extract::multipart::MultipartError,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::extract::ExtractError;

/// Application-wide result type
pub type Result<T> = std::result::Result<T, AppError>;

/// Application error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("{0}")]
    BadRequest(String),

    #[error("Failed to read upload: {0}")]
    Multipart(#[from] MultipartError),

    #[error("Error processing PDF: {0}")]
    Extraction(#[from] ExtractError),
}

/// Error response body
#[derive(Serialize)]
struct ErrorResponse {
    error: &'static str,
    detail: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_type) = match &self {
            AppError::BadRequest(_) => (StatusCode::BAD_REQUEST, "bad_request"),
            AppError::Multipart(e) => (e.status(), "bad_upload"),
            AppError::Extraction(ExtractError::Base64(_)) => {
                (StatusCode::BAD_REQUEST, "bad_request")
            }
            AppError::Extraction(e) => {
                tracing::error!("Extraction failed: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "extraction_failed")
            }
        };

        let body = Json(ErrorResponse {
            error: error_type,
            detail: self.to_string(),
        });

        (status, body).into_response()
    }
}
