//! LDAP Directory Implementation
//!
//! One connection per credential check, StartTLS negotiated per config.

use ldap3::{Ldap, LdapConnAsync, LdapConnSettings, LdapError, Scope, SearchEntry, ldap_escape};
use std::sync::Arc;

use crate::application::config::DirectoryConfig;
use crate::domain::directory::{DirectoryConnector, DirectorySession};
use crate::domain::identity::Identity;
use crate::error::{AuthError, AuthResult};

/// LDAP result code for a rejected simple bind
const INVALID_CREDENTIALS_RC: u32 = 49;

/// Builds the subtree search filter for one identity
fn identity_filter(config: &DirectoryConfig, identity: &Identity) -> String {
    format!(
        "(&(objectClass={})({}={}))",
        config.object_class,
        config.identity_attribute,
        ldap_escape(identity.as_str())
    )
}

/// LDAP-backed connector
#[derive(Clone)]
pub struct LdapConnector {
    config: Arc<DirectoryConfig>,
}

impl LdapConnector {
    pub fn new(config: DirectoryConfig) -> Self {
        Self {
            config: Arc::new(config),
        }
    }
}

impl DirectoryConnector for LdapConnector {
    type Session = LdapSession;

    async fn connect(&self) -> AuthResult<LdapSession> {
        let settings = LdapConnSettings::new()
            .set_conn_timeout(self.config.connect_timeout)
            .set_starttls(self.config.starttls)
            .set_no_tls_verify(!self.config.tls_verify);

        let (conn, ldap) = LdapConnAsync::with_settings(settings, &self.config.url).await?;

        tokio::spawn(async move {
            if let Err(e) = conn.drive().await {
                tracing::warn!(error = %e, "LDAP connection error");
            }
        });

        tracing::debug!(url = %self.config.url, "Directory connection opened");

        Ok(LdapSession {
            ldap,
            config: self.config.clone(),
        })
    }

    fn service_account(&self) -> (&str, &str) {
        (&self.config.bind_dn, &self.config.bind_password)
    }
}

/// An open LDAP connection
pub struct LdapSession {
    ldap: Ldap,
    config: Arc<DirectoryConfig>,
}

impl DirectorySession for LdapSession {
    async fn bind(&mut self, dn: &str, secret: &str) -> AuthResult<()> {
        match self
            .ldap
            .simple_bind(dn, secret)
            .await
            .and_then(|result| result.success())
        {
            Ok(_) => Ok(()),
            Err(LdapError::LdapResult { result }) if result.rc == INVALID_CREDENTIALS_RC => {
                Err(AuthError::InvalidCredentials)
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn find_entries(&mut self, identity: &Identity) -> AuthResult<Vec<String>> {
        let filter = identity_filter(&self.config, identity);

        let (entries, _) = self
            .ldap
            .search(&self.config.base_dn, Scope::Subtree, &filter, vec!["dn"])
            .await?
            .success()?;

        Ok(entries
            .into_iter()
            .map(|entry| SearchEntry::construct(entry).dn)
            .collect())
    }

    async fn unbind(&mut self) -> AuthResult<()> {
        self.ldap.unbind().await?;
        Ok(())
    }
}
