//! Error types for contato-api

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use contato_core::{StoreError, ValidationError};
use serde_json::json;
use thiserror::Error;

/// Result type alias for contato-api server operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while running the server itself.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// Binding or serving failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// A failed request, rendered as `{"detail": ...}` with a status code.
#[derive(Error, Debug)]
pub enum ApiError {
    /// The submission was rejected before reaching the store.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The store failed.
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl ApiError {
    /// HTTP status for this error.
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Store(StoreError::NotFound { .. }) => StatusCode::NOT_FOUND,
            ApiError::Store(StoreError::Unsupported { .. }) => StatusCode::NOT_IMPLEMENTED,
            ApiError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match &self {
            ApiError::Validation(err) => {
                tracing::debug!(error = %err, "Rejected submission");
                json!({
                    "detail": err.to_string(),
                    "errors": err.field_errors(),
                })
            }
            ApiError::Store(err) => {
                tracing::error!(error = %err, status = status.as_u16(), "Store operation failed");
                json!({ "detail": err.to_string() })
            }
        };
        (status, Json(body)).into_response()
    }
}
