//! Application error handling
//!
//! This module provides unified error handling for the API,
//! converting internal errors to appropriate HTTP responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use sedentarism_shared::validation::ValidationError;
use serde::Serialize;
use thiserror::Error;
use tracing::error;

/// Postgres SQLSTATE for unique constraint violations
const PG_UNIQUE_VIOLATION: &str = "23505";
/// Postgres SQLSTATE for foreign key violations
const PG_FOREIGN_KEY_VIOLATION: &str = "23503";

/// API error type that can be converted to HTTP responses
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Validation error on {field}: {message}")]
    InvalidField { field: String, message: String },

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Internal server error")]
    Internal(#[from] anyhow::Error),

    #[error("Bad request: {0}")]
    BadRequest(String),
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::InvalidField {
            message: err.user_message(),
            field: err.field,
        }
    }
}

impl From<validator::ValidationErrors> for ApiError {
    fn from(errors: validator::ValidationErrors) -> Self {
        match ValidationError::from_errors(&errors) {
            Some(err) => err.into(),
            None => ApiError::Validation(errors.to_string()),
        }
    }
}

impl ApiError {
    /// Map repository failures, surfacing constraint violations as conflicts
    ///
    /// Repositories return `anyhow::Error`; the underlying `sqlx::Error`
    /// is recovered to classify the failure.
    pub fn from_repository(err: anyhow::Error, conflict_message: &str) -> Self {
        let code = err
            .downcast_ref::<sqlx::Error>()
            .and_then(|e| e.as_database_error())
            .and_then(|db| db.code().map(|c| c.into_owned()));

        match code.as_deref() {
            Some(PG_UNIQUE_VIOLATION) => ApiError::Conflict(conflict_message.to_string()),
            Some(PG_FOREIGN_KEY_VIOLATION) => {
                ApiError::NotFound("Referenced participant not found".to_string())
            }
            _ => ApiError::Internal(err),
        }
    }
}

/// Error response body
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

/// Error detail
#[derive(Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let mut field = None;
        let (status, code, message) = match self {
            ApiError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg),
            ApiError::InvalidField {
                field: name,
                message,
            } => {
                field = Some(name);
                (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", message)
            }
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, "CONFLICT", msg),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg),
            ApiError::Internal(err) => {
                error!("Internal error: {:?}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal error occurred".to_string(),
                )
            }
        };

        let body = Json(ErrorResponse {
            error: ErrorDetail {
                code: code.to_string(),
                message,
                field,
            },
        });

        (status, body).into_response()
    }
}
