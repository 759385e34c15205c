//! Unified error handling with Sentry integration.
//!
//! Provides a unified `AppError` type that captures server errors to Sentry
//! before responding to the client. All route handlers return
//! `Result<T, AppError>`. Every error body is JSON: field errors as
//! `{"field": ["message"]}`, everything else as `{"detail": "message"}`.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use shopping_list_core::ValidationErrors;

use crate::db::RepositoryError;

/// Body for errors that are not tied to request fields.
#[derive(Debug, Serialize)]
pub struct ErrorDetail {
    pub detail: String,
}

/// Application-level error type for the API.
#[derive(Debug, Error)]
pub enum AppError {
    /// Database operation failed.
    #[error("Database error: {0}")]
    Database(RepositoryError),

    /// Request fields failed validation.
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationErrors),

    /// Resource not found.
    #[error("Not found.")]
    NotFound,

    /// Request body could not be read as JSON.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Request body exceeded the size limit.
    #[error("Payload too large: {0}")]
    PayloadTooLarge(String),

    /// Request body was not declared as JSON.
    #[error("Unsupported media type: {0}")]
    UnsupportedMediaType(String),
}

impl From<RepositoryError> for AppError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound => Self::NotFound,
            other => Self::Database(other),
        }
    }
}

impl AppError {
    /// HTTP status for this error.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Validation(_) | Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            Self::UnsupportedMediaType(_) => StatusCode::UNSUPPORTED_MEDIA_TYPE,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        match self {
            Self::Database(_) => {
                let event_id = sentry::capture_error(&self);
                tracing::error!(
                    error = %self,
                    sentry_event_id = %event_id,
                    "Request error"
                );

                // Don't expose internal error details to clients
                let body = ErrorDetail {
                    detail: "Internal server error.".to_string(),
                };
                (status, Json(body)).into_response()
            }
            Self::Validation(errors) => {
                tracing::debug!(%errors, "Request failed validation");
                (status, Json(errors)).into_response()
            }
            Self::NotFound => {
                let body = ErrorDetail {
                    detail: "Not found.".to_string(),
                };
                (status, Json(body)).into_response()
            }
            Self::BadRequest(detail)
            | Self::PayloadTooLarge(detail)
            | Self::UnsupportedMediaType(detail) => {
                (status, Json(ErrorDetail { detail })).into_response()
            }
        }
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;
