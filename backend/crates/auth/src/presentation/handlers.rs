//! HTTP Handlers

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use chrono::SecondsFormat;
use platform::client::ClientIp;
use std::sync::Arc;

use crate::application::token::TokenService;
use crate::application::{LoginInput, LoginUseCase};
use crate::domain::directory::DirectoryConnector;
use crate::error::{AuthError, AuthResult};
use crate::presentation::dto::{LoginRequest, LoginResponse};

/// Shared state for auth handlers
#[derive(Clone)]
pub struct AuthAppState<C>
where
    C: DirectoryConnector + Clone + Send + Sync + 'static,
{
    pub connector: Arc<C>,
    pub tokens: Arc<TokenService>,
}

// ============================================================================
// Login
// ============================================================================

/// POST /login
pub async fn login<C>(
    State(state): State<AuthAppState<C>>,
    ClientIp(client_ip): ClientIp,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> AuthResult<Json<LoginResponse>>
where
    C: DirectoryConnector + Clone + Send + Sync + 'static,
{
    let Json(req) = payload.map_err(|e| AuthError::BadRequest(e.body_text()))?;

    let use_case = LoginUseCase::new(state.connector.clone(), state.tokens.clone());

    let input = LoginInput {
        username: req.username,
        password: req.password,
    };

    let output = use_case.execute(input).await.inspect_err(|_| {
        tracing::debug!(client_ip = ?client_ip, "Login failed");
    })?;

    tracing::info!(
        identity = %output.identity,
        client_ip = ?client_ip,
        "Token issued"
    );

    Ok(Json(LoginResponse {
        token: output.token,
        expires: output.expires_at.to_rfc3339_opts(SecondsFormat::Secs, true),
    }))
}
