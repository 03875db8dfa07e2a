//! Error types for the map web server.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use map_store::StoreError;
use state_data::IngestError;
use thiserror::Error;

/// Errors that can occur while handling a request.
#[derive(Debug, Error)]
pub enum AppError {
    /// Malformed or missing input.
    #[error("{0}")]
    BadRequest(String),

    /// Route exists but not for this method.
    #[error("Method not allowed")]
    MethodNotAllowed,

    /// Upload could not be turned into state data.
    #[error(transparent)]
    Ingest(#[from] IngestError),

    /// Map store error.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Status code and the message safe to show the caller.
    ///
    /// Storage and parser failures are logged here and replaced by a generic
    /// message.
    pub fn status_and_message(&self) -> (StatusCode, String) {
        match self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::MethodNotAllowed => {
                (StatusCode::METHOD_NOT_ALLOWED, "Method not allowed".to_string())
            }
            AppError::Ingest(err) => match err {
                IngestError::Csv(_) | IngestError::Excel(_) => {
                    tracing::error!("Upload parse error: {}", err);
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "Failed to process uploaded file".to_string(),
                    )
                }
                _ => (StatusCode::BAD_REQUEST, err.to_string()),
            },
            AppError::Store(err) => match err {
                StoreError::InvalidId(_) => (StatusCode::BAD_REQUEST, "Invalid map ID".to_string()),
                StoreError::NotFound(_) => (StatusCode::NOT_FOUND, "Map not found".to_string()),
                StoreError::Validation(inner) => (StatusCode::BAD_REQUEST, inner.to_string()),
                _ => {
                    tracing::error!("Store error: {}", err);
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "Failed to access map storage".to_string(),
                    )
                }
            },
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = self.status_and_message();

        let body = serde_json::json!({
            "error": message
        });

        (status, Json(body)).into_response()
    }
}

/// Result type for handlers.
pub type Result<T> = std::result::Result<T, AppError>;
