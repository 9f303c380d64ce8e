//! Auth Error Types
//!
//! This module provides auth-specific error variants that integrate
//! with the unified `kernel::error::AppError` system.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

/// Auth-specific result type alias
pub type AuthResult<T> = Result<T, AuthError>;

/// Auth-specific error variants
#[derive(Debug, Error)]
pub enum AuthError {
    /// Directory rejected the identity/secret pair, found no entry, or
    /// found more than one
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Directory could not be reached or the service bind failed
    #[error("Directory unavailable: {0}")]
    DirectoryUnavailable(String),

    /// No usable bearer token on a protected route
    #[error("Missing bearer token")]
    MissingToken,

    /// Token malformed, signed with another secret, or expired
    #[error("Invalid token")]
    TokenInvalid,

    /// Login body could not be decoded
    #[error("Bad incoming data: {0}")]
    BadRequest(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AuthError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            AuthError::InvalidCredentials | AuthError::MissingToken | AuthError::TokenInvalid => {
                StatusCode::UNAUTHORIZED
            }
            AuthError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AuthError::DirectoryUnavailable(_) | AuthError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            AuthError::InvalidCredentials | AuthError::MissingToken | AuthError::TokenInvalid => {
                ErrorKind::Unauthorized
            }
            AuthError::BadRequest(_) => ErrorKind::BadRequest,
            AuthError::DirectoryUnavailable(_) | AuthError::Internal(_) => {
                ErrorKind::InternalServerError
            }
        }
    }

    /// Client-facing message; server faults never leak their detail
    pub fn public_message(&self) -> &'static str {
        match self {
            AuthError::InvalidCredentials => "Invalid Credentials",
            AuthError::MissingToken | AuthError::TokenInvalid => "Unauthorized",
            AuthError::BadRequest(_) => "Bad incoming data",
            AuthError::DirectoryUnavailable(_) | AuthError::Internal(_) => "Internal error",
        }
    }

    /// Convert to AppError
    pub fn to_app_error(&self) -> AppError {
        AppError::new(self.kind(), self.public_message())
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            AuthError::DirectoryUnavailable(msg) => {
                tracing::error!(message = %msg, "Directory unavailable");
            }
            AuthError::Internal(msg) => {
                tracing::error!(message = %msg, "Auth internal error");
            }
            AuthError::InvalidCredentials => {
                tracing::warn!("Invalid login attempt");
            }
            AuthError::TokenInvalid => {
                tracing::warn!("Rejected invalid bearer token");
            }
            _ => {
                tracing::debug!(error = %self, "Auth error");
            }
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        self.log();
        AppError::from(self).into_response()
    }
}

impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        let app_error = err.to_app_error();
        app_error.with_source(err)
    }
}

impl From<ldap3::LdapError> for AuthError {
    fn from(err: ldap3::LdapError) -> Self {
        AuthError::DirectoryUnavailable(err.to_string())
    }
}
