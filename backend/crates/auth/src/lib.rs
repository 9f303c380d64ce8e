//! Auth (Authentication) Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Identity value object, directory traits
//! - `application/` - Token service, credential verification, login
//! - `infra/` - LDAP directory implementation
//! - `presentation/` - Login handler, auth gate middleware, router
//!
//! ## Security Model
//! - Credentials are checked against the directory with a fresh connection
//!   per attempt: service bind, single-entry search, user bind
//! - Tokens are HS256 JWTs carrying `{username, exp}`, stateless and
//!   never revoked; they expire after the configured TTL (24h by default)
//! - Every route except `/login` sits behind [`require_token`]; requests
//!   without a valid token are rejected with 401 before any handler runs

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use application::config::{AuthConfig, DirectoryConfig};
pub use application::token::{IssuedToken, TokenService};
pub use domain::identity::Identity;
pub use error::{AuthError, AuthResult};
pub use infra::ldap::LdapConnector;
pub use presentation::middleware::{AuthGateState, CurrentIdentity, require_token};
pub use presentation::router::{auth_router, auth_router_generic};

// Re-export kernel error types for unified error handling
pub use kernel::error::{app_error::AppError, kind::ErrorKind};

pub mod middleware {
    pub use crate::presentation::middleware::*;
}

#[cfg(test)]
mod tests;
