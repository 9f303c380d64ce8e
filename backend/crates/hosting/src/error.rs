//! Hosting Error Types
//!
//! Store failures are classified here once, so handlers only ever see
//! not-found, already-exists, cardinality or storage errors.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

/// Hosting-specific result type alias
pub type HostingResult<T> = Result<T, HostingError>;

/// Hosting-specific error variants
#[derive(Debug, Error)]
pub enum HostingError {
    /// Body could not be decoded or broke a field rule
    #[error("Validation failed: {0}")]
    Validation(String),

    /// No row matched the scope and key
    #[error("Not found")]
    NotFound,

    /// Insert or rename collided with a uniqueness constraint
    #[error("Already exists")]
    AlreadyExists,

    /// A mutation touched more than one row and was rolled back
    #[error("Expected one affected row, got {0}")]
    NotExactlyOne(u64),

    /// Any other store failure
    #[error("Database error: {0}")]
    Database(sqlx::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl HostingError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            HostingError::Validation(_) => StatusCode::BAD_REQUEST,
            HostingError::NotFound => StatusCode::NOT_FOUND,
            HostingError::AlreadyExists | HostingError::NotExactlyOne(_) => StatusCode::CONFLICT,
            HostingError::Database(_) | HostingError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            HostingError::Validation(_) => ErrorKind::BadRequest,
            HostingError::NotFound => ErrorKind::NotFound,
            HostingError::AlreadyExists | HostingError::NotExactlyOne(_) => ErrorKind::Conflict,
            HostingError::Database(_) | HostingError::Internal(_) => {
                ErrorKind::InternalServerError
            }
        }
    }

    /// Client-facing message; store detail stays in the logs
    pub fn public_message(&self) -> &'static str {
        match self {
            HostingError::Validation(_) => "Bad incoming data",
            HostingError::NotFound => "Not found",
            HostingError::AlreadyExists => "Already exist",
            HostingError::NotExactlyOne(_) => "Not exactly one row affected",
            HostingError::Database(_) => "Database error",
            HostingError::Internal(_) => "Internal error",
        }
    }

    /// Convert to AppError
    pub fn to_app_error(&self) -> AppError {
        AppError::new(self.kind(), self.public_message())
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            HostingError::Database(e) => {
                tracing::error!(error = ?e, "Database error");
            }
            HostingError::Internal(msg) => {
                tracing::error!(message = %msg, "Hosting internal error");
            }
            HostingError::NotExactlyOne(n) => {
                tracing::warn!(affected = n, "Mutation rolled back");
            }
            _ => {
                tracing::debug!(error = %self, "Hosting error");
            }
        }
    }
}

impl IntoResponse for HostingError {
    fn into_response(self) -> Response {
        self.log();
        AppError::from(self).into_response()
    }
}

impl From<HostingError> for AppError {
    fn from(err: HostingError) -> Self {
        let app_error = err.to_app_error();
        app_error.with_source(err)
    }
}

impl From<sqlx::Error> for HostingError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => HostingError::NotFound,
            sqlx::Error::Database(ref db) if db.is_unique_violation() => {
                HostingError::AlreadyExists
            }
            other => HostingError::Database(other),
        }
    }
}

impl From<validator::ValidationErrors> for HostingError {
    fn from(err: validator::ValidationErrors) -> Self {
        HostingError::Validation(err.to_string())
    }
}

impl From<JsonRejection> for HostingError {
    fn from(err: JsonRejection) -> Self {
        HostingError::Validation(err.body_text())
    }
}
