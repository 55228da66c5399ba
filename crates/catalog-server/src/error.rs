//! HTTP error mapping
//!
//! Every failure reaches the client as a plain-text body and a status code.
//! Storage and upload details stay in the server log.

use crate::upload::UploadError;
use axum::extract::multipart::MultipartError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use catalog_core::{CatalogError, ValidationError};

pub const DATABASE_ERROR: &str = "Database error";
pub const UPLOAD_ERROR: &str = "Upload failed";

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Storage error: {0}")]
    Storage(#[from] CatalogError),

    #[error(transparent)]
    Upload(#[from] UploadError),

    #[error("Malformed multipart body: {}", .0.body_text())]
    Multipart(#[from] MultipartError),

    /// Body the extractor could not parse, with the status axum chose for it
    #[error("Rejected request body: {1}")]
    Rejected(StatusCode, String),
}

pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::Validation(e) | AppError::Storage(CatalogError::Validation(e)) => {
                (StatusCode::BAD_REQUEST, e.to_string())
            }
            AppError::Storage(e) => {
                tracing::error!("Storage operation failed: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, DATABASE_ERROR.to_string())
            }
            AppError::Upload(e @ UploadError::UnexpectedFile(_)) => {
                (StatusCode::BAD_REQUEST, e.to_string())
            }
            AppError::Upload(UploadError::Multipart(e)) | AppError::Multipart(e) => {
                multipart_response(&e)
            }
            AppError::Upload(e) => {
                tracing::error!("Upload failed: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, UPLOAD_ERROR.to_string())
            }
            AppError::Rejected(status, message) => (status, message),
        };

        (status, message).into_response()
    }
}

/// Keep axum's status for multipart failures, so an over-limit body is a 413
fn multipart_response(e: &MultipartError) -> (StatusCode, String) {
    let status = e.status();
    if status.is_server_error() {
        tracing::error!("Failed to read multipart body: {}", e.body_text());
        return (status, UPLOAD_ERROR.to_string());
    }
    (status, e.body_text())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (AppError::from(ValidationError::MissingFields), StatusCode::BAD_REQUEST),
            (
                AppError::from(CatalogError::Validation(ValidationError::InvalidPrice)),
                StatusCode::BAD_REQUEST,
            ),
            (
                AppError::from(CatalogError::Database("timeout".to_string())),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (
                AppError::from(UploadError::UnexpectedFile("avatar".to_string())),
                StatusCode::BAD_REQUEST,
            ),
            (
                AppError::from(UploadError::Io(std::io::Error::other("disk full"))),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (
                AppError::Rejected(StatusCode::PAYLOAD_TOO_LARGE, "too big".to_string()),
                StatusCode::PAYLOAD_TOO_LARGE,
            ),
        ];

        for (error, status) in cases {
            assert_eq!(error.into_response().status(), status);
        }
    }
}
