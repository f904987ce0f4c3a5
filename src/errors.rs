//! Centralized error handling.
//!
//! Provides a unified error type for the entire application,
//! with automatic HTTP response conversion.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::{DateTime, Utc};
use sea_orm::{DbErr, SqlErr};
use serde::Serialize;
use thiserror::Error;

/// Application error types.
///
/// Closed set of domain failure conditions; every variant maps to exactly
/// one HTTP status at the response boundary.
#[derive(Error, Debug)]
pub enum AppError {
    // Resource errors
    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Conflict(String),

    // Ownership
    #[error("{0}")]
    Forbidden(String),

    // Validation
    #[error("{0}")]
    Validation(String),

    // External service errors
    #[error("Database error")]
    Database(#[source] DbErr),

    // Internal
    #[error("Internal server error")]
    Internal(String),
}

/// Uniform error response body
#[derive(Debug, Serialize)]
struct ErrorBody {
    timestamp: DateTime<Utc>,
    status: u16,
    error: &'static str,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    exception: Option<&'static str>,
}

impl AppError {
    /// Get HTTP status code
    fn status(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Database(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the reason phrase reported in the `error` field
    fn label(&self) -> &'static str {
        match self {
            AppError::NotFound(_) => "Not Found",
            AppError::Conflict(_) => "Conflict",
            AppError::Forbidden(_) => "Forbidden",
            AppError::Validation(_) => "Bad Request",
            AppError::Database(_) | AppError::Internal(_) => "Internal Server Error",
        }
    }

    /// Name of the underlying failure, surfaced only for unclassified errors
    fn exception(&self) -> Option<&'static str> {
        match self {
            AppError::Database(_) => Some("DbErr"),
            AppError::Internal(_) => Some("Internal"),
            _ => None,
        }
    }

    /// Get user-facing message; unclassified failures surface their cause
    fn user_message(&self) -> String {
        match self {
            AppError::NotFound(msg)
            | AppError::Conflict(msg)
            | AppError::Forbidden(msg)
            | AppError::Validation(msg)
            | AppError::Internal(msg) => msg.clone(),

            AppError::Database(e) => e.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!("Request failed: {:?}", self);
        }
        let body = ErrorBody {
            timestamp: Utc::now(),
            status: status.as_u16(),
            error: self.label(),
            message: self.user_message(),
            exception: self.exception(),
        };

        (status, Json(body)).into_response()
    }
}

impl From<DbErr> for AppError {
    fn from(err: DbErr) -> Self {
        // Reactive uniqueness mapping: a creation that races past the
        // service-level pre-check still surfaces as a Conflict.
        match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(msg)) => {
                let message = if msg.contains("email") {
                    "A user with this email already exists".to_string()
                } else if msg.contains("username") {
                    "A user with this username already exists".to_string()
                } else {
                    "Resource already exists".to_string()
                };
                tracing::warn!("Unique constraint violation: {}", msg);
                AppError::Conflict(message)
            }
            Some(SqlErr::ForeignKeyConstraintViolation(msg)) => {
                tracing::warn!("Foreign key constraint violation: {}", msg);
                AppError::Conflict("Resource is still referenced by other records".to_string())
            }
            _ => AppError::Database(err),
        }
    }
}

/// Result type alias
pub type AppResult<T> = Result<T, AppError>;

/// Convenience constructors
impl AppError {
    pub fn not_found(msg: impl Into<String>) -> Self {
        AppError::NotFound(msg.into())
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        AppError::Conflict(msg.into())
    }

    pub fn forbidden(msg: impl Into<String>) -> Self {
        AppError::Forbidden(msg.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        AppError::Validation(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        AppError::Internal(msg.into())
    }
}
