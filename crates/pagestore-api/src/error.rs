//! Outward-facing errors
//!
//! Wraps validation and repository faults and maps them to HTTP outcomes.
//! Storage detail is logged but never sent to the client.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use pagestore_domain::{RepositoryError, ValidationError};
use serde_json::json;
use thiserror::Error;
use tracing::error;

/// Message sent in place of any storage or serialization detail
pub const INTERNAL_MESSAGE: &str = "internal storage error";

#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Invalid request: {0}")]
    BadRequest(String),

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest(message.into())
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) | ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Repository(err) => match err {
                RepositoryError::NotFound { .. } => StatusCode::NOT_FOUND,
                RepositoryError::AlreadyExists { .. }
                | RepositoryError::ConcurrentModification { .. } => StatusCode::CONFLICT,
                RepositoryError::Storage(_) | RepositoryError::Serialization(_) => {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            },
        }
    }

    /// Stable machine-readable error kind
    pub fn error_type(&self) -> &'static str {
        match self {
            ApiError::Validation(_) => "validation_error",
            ApiError::BadRequest(_) => "bad_request",
            ApiError::Repository(err) => match err {
                RepositoryError::NotFound { .. } => "not_found",
                RepositoryError::AlreadyExists { .. } => "already_exists",
                RepositoryError::ConcurrentModification { .. } => "concurrent_modification",
                RepositoryError::Storage(_) | RepositoryError::Serialization(_) => {
                    "internal_error"
                }
            },
        }
    }

    pub fn is_internal(&self) -> bool {
        matches!(self, ApiError::Repository(err) if err.is_internal())
    }

    /// Message safe to show a client
    pub fn public_message(&self) -> String {
        if self.is_internal() {
            INTERNAL_MESSAGE.to_string()
        } else {
            self.to_string()
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if self.is_internal() {
            error!(error = %self, "Request failed on storage");
        }

        let body = Json(json!({
            "error": {
                "type": self.error_type(),
                "message": self.public_message(),
            }
        }));

        (self.status_code(), body).into_response()
    }
}

/// Result type alias for API operations
pub type ApiResult<T> = Result<T, ApiError>;
