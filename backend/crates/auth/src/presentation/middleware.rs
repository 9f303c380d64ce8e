//! Auth Gate
//!
//! Middleware that admits only requests carrying a valid bearer token, and
//! the extractor that hands the resulting identity to handlers.

use axum::body::Body;
use axum::extract::{FromRequestParts, State};
use axum::http::Request;
use axum::http::request::Parts;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use std::sync::Arc;

use crate::application::token::TokenService;
use crate::domain::identity::Identity;
use crate::error::AuthError;

/// Middleware state
#[derive(Clone)]
pub struct AuthGateState {
    pub tokens: Arc<TokenService>,
}

impl AuthGateState {
    pub fn new(tokens: Arc<TokenService>) -> Self {
        Self { tokens }
    }
}

/// Middleware that requires a valid bearer token
///
/// On success the decoded [`Identity`] is stored in the request extensions
/// for the rest of this request only. On failure no handler runs.
pub async fn require_token(
    State(state): State<AuthGateState>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, Response> {
    let identity = {
        let token = platform::bearer::extract_bearer(req.headers())
            .ok_or_else(|| AuthError::MissingToken.into_response())?;

        state
            .tokens
            .validate(token)
            .map_err(IntoResponse::into_response)?
    };

    tracing::debug!(identity = %identity, path = %req.uri().path(), "Request authenticated");

    req.extensions_mut().insert(identity);

    Ok(next.run(req).await)
}

/// Identity of the caller, as attached by [`require_token`]
///
/// Handlers name it as an argument; a route that is not behind the gate
/// rejects with 401 instead of running without an identity.
#[derive(Debug, Clone)]
pub struct CurrentIdentity(pub Identity);

impl<S> FromRequestParts<S> for CurrentIdentity
where
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Identity>()
            .cloned()
            .map(CurrentIdentity)
            .ok_or(AuthError::MissingToken)
    }
}
