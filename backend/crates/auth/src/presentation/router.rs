//! Auth Router

use axum::{Router, routing::post};
use std::sync::Arc;

use crate::application::token::TokenService;
use crate::domain::directory::DirectoryConnector;
use crate::infra::ldap::LdapConnector;
use crate::presentation::handlers::{self, AuthAppState};

/// Create the Auth router with the LDAP directory
pub fn auth_router(connector: LdapConnector, tokens: Arc<TokenService>) -> Router {
    auth_router_generic(connector, tokens)
}

/// Create a generic Auth router for any directory implementation
pub fn auth_router_generic<C>(connector: C, tokens: Arc<TokenService>) -> Router
where
    C: DirectoryConnector + Clone + Send + Sync + 'static,
{
    let state = AuthAppState {
        connector: Arc::new(connector),
        tokens,
    };

    Router::new()
        .route(
            "/login",
            post(handlers::login::<C>).get(handlers::login::<C>),
        )
        .with_state(state)
}
