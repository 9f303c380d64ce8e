//! Verify Credentials Use Case
//!
//! Checks an identity/secret pair against the directory.

use std::sync::Arc;

use crate::domain::directory::{DirectoryConnector, DirectorySession};
use crate::domain::identity::Identity;
use crate::error::{AuthError, AuthResult};

/// Credential verifier
///
/// Every call opens its own directory session and releases it before
/// returning, whatever the outcome.
pub struct CredentialVerifier<C>
where
    C: DirectoryConnector + Send + Sync + 'static,
{
    connector: Arc<C>,
}

impl<C> CredentialVerifier<C>
where
    C: DirectoryConnector + Send + Sync + 'static,
{
    pub fn new(connector: Arc<C>) -> Self {
        Self { connector }
    }

    pub async fn verify(&self, identity: &Identity, secret: &str) -> AuthResult<()> {
        // An empty simple-bind password is an anonymous bind and would succeed
        if secret.is_empty() {
            return Err(AuthError::InvalidCredentials);
        }

        let mut session = self.connector.connect().await?;

        let outcome = self.authenticate(&mut session, identity, secret).await;

        if let Err(e) = session.unbind().await {
            tracing::debug!(error = %e, "Directory unbind failed");
        }

        outcome
    }

    async fn authenticate(
        &self,
        session: &mut C::Session,
        identity: &Identity,
        secret: &str,
    ) -> AuthResult<()> {
        let (service_dn, service_secret) = self.connector.service_account();

        // A rejected service account is a deployment fault, not a user error
        session
            .bind(service_dn, service_secret)
            .await
            .map_err(|e| match e {
                AuthError::InvalidCredentials => {
                    AuthError::DirectoryUnavailable("Service account bind rejected".to_string())
                }
                other => other,
            })?;

        let entries = session.find_entries(identity).await?;

        let user_dn = match entries.as_slice() {
            [dn] => dn,
            [] => {
                tracing::debug!(identity = %identity, "No directory entry");
                return Err(AuthError::InvalidCredentials);
            }
            many => {
                tracing::warn!(identity = %identity, matches = many.len(), "Ambiguous directory entry");
                return Err(AuthError::InvalidCredentials);
            }
        };

        session.bind(user_dn, secret).await?;

        tracing::info!(identity = %identity, "Credentials verified");

        Ok(())
    }
}
