//! Application Configuration
//!
//! Configuration for the Auth application layer. Built once at startup,
//! wrapped in `Arc` and never mutated afterwards.

use std::fmt;
use std::time::Duration;

/// Default token lifetime (24 hours)
pub const DEFAULT_TOKEN_TTL: Duration = Duration::from_secs(24 * 3600);

/// Auth application configuration
#[derive(Clone)]
pub struct AuthConfig {
    /// Symmetric HS256 signing secret
    pub token_secret: Vec<u8>,
    /// Lifetime of issued tokens
    pub token_ttl: Duration,
    /// Directory used to verify credentials
    pub directory: DirectoryConfig,
}

/// Directory (LDAP) connection settings
#[derive(Clone)]
pub struct DirectoryConfig {
    /// `ldap://host:389` or `ldaps://host:636`
    pub url: String,
    /// Service account DN used for the search bind
    pub bind_dn: String,
    pub bind_password: String,
    /// Subtree searched for user entries
    pub base_dn: String,
    /// Object class of user entries
    pub object_class: String,
    /// Attribute holding the identity
    pub identity_attribute: String,
    /// Negotiate StartTLS on plain `ldap://` connections
    pub starttls: bool,
    /// Verify the directory certificate
    pub tls_verify: bool,
    pub connect_timeout: Duration,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            token_secret: Vec::new(),
            token_ttl: DEFAULT_TOKEN_TTL,
            directory: DirectoryConfig::default(),
        }
    }
}

impl Default for DirectoryConfig {
    fn default() -> Self {
        Self {
            url: "ldap://localhost:389".to_string(),
            bind_dn: String::new(),
            bind_password: String::new(),
            base_dn: String::new(),
            object_class: "inetOrgPerson".to_string(),
            identity_attribute: "mail".to_string(),
            starttls: true,
            tls_verify: true,
            connect_timeout: Duration::from_secs(5),
        }
    }
}

impl AuthConfig {
    /// Create config with a random token secret (for development)
    pub fn with_random_secret() -> Self {
        use rand::RngCore;
        let mut secret = vec![0u8; 32];
        rand::rng().fill_bytes(&mut secret);
        Self {
            token_secret: secret,
            ..Default::default()
        }
    }

    /// Create config for development (random secret, plain directory
    /// connection, no certificate checks)
    pub fn development() -> Self {
        Self {
            directory: DirectoryConfig {
                starttls: false,
                tls_verify: false,
                ..DirectoryConfig::default()
            },
            ..Self::with_random_secret()
        }
    }
}

impl fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthConfig")
            .field("token_secret", &"<redacted>")
            .field("token_ttl", &self.token_ttl)
            .field("directory", &self.directory)
            .finish()
    }
}

impl fmt::Debug for DirectoryConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DirectoryConfig")
            .field("url", &self.url)
            .field("bind_dn", &self.bind_dn)
            .field("bind_password", &"<redacted>")
            .field("base_dn", &self.base_dn)
            .field("object_class", &self.object_class)
            .field("identity_attribute", &self.identity_attribute)
            .field("starttls", &self.starttls)
            .field("tls_verify", &self.tls_verify)
            .field("connect_timeout", &self.connect_timeout)
            .finish()
    }
}
