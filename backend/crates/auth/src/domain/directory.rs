//! Directory Traits
//!
//! Interfaces to the external credential directory. The LDAP
//! implementation lives in the infrastructure layer.

use crate::domain::identity::Identity;
use crate::error::AuthResult;

/// Opens one directory session per credential check
#[trait_variant::make(DirectoryConnector: Send)]
pub trait LocalDirectoryConnector {
    type Session: DirectorySession + Send;

    /// Establish a fresh connection
    ///
    /// Fails with `DirectoryUnavailable` when the directory cannot be reached.
    async fn connect(&self) -> AuthResult<Self::Session>;

    /// Service account used to search the directory
    fn service_account(&self) -> (&str, &str);
}

/// A single open connection to the directory
#[trait_variant::make(DirectorySession: Send)]
pub trait LocalDirectorySession {
    /// Simple bind
    ///
    /// A rejected secret is `InvalidCredentials`; any other failure is
    /// `DirectoryUnavailable`.
    async fn bind(&mut self, dn: &str, secret: &str) -> AuthResult<()>;

    /// Distinguished names of every entry whose mail matches `identity`
    async fn find_entries(&mut self, identity: &Identity) -> AuthResult<Vec<String>>;

    /// Release the connection
    async fn unbind(&mut self) -> AuthResult<()>;
}
