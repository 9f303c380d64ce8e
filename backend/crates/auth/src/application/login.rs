//! Login Use Case
//!
//! Verifies credentials against the directory and issues a token.

use chrono::{DateTime, Utc};
use std::sync::Arc;

use crate::application::token::TokenService;
use crate::application::verify_credentials::CredentialVerifier;
use crate::domain::directory::DirectoryConnector;
use crate::domain::identity::Identity;
use crate::error::AuthResult;

/// Login input
pub struct LoginInput {
    pub username: String,
    pub password: String,
}

/// Login output
pub struct LoginOutput {
    pub identity: Identity,
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

/// Login use case
pub struct LoginUseCase<C>
where
    C: DirectoryConnector + Send + Sync + 'static,
{
    verifier: CredentialVerifier<C>,
    tokens: Arc<TokenService>,
}

impl<C> LoginUseCase<C>
where
    C: DirectoryConnector + Send + Sync + 'static,
{
    pub fn new(connector: Arc<C>, tokens: Arc<TokenService>) -> Self {
        Self {
            verifier: CredentialVerifier::new(connector),
            tokens,
        }
    }

    pub async fn execute(&self, input: LoginInput) -> AuthResult<LoginOutput> {
        let identity = Identity::new(input.username)?;

        self.verifier.verify(&identity, &input.password).await?;

        let issued = self.tokens.issue(&identity)?;

        Ok(LoginOutput {
            identity,
            token: issued.token,
            expires_at: issued.expires_at,
        })
    }
}
