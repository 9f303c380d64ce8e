//! Identity Value Object
//!
//! The username (a mail address in the directory) that a token vouches for.

use derive_more::Display;
use serde::{Deserialize, Serialize};

use crate::error::{AuthError, AuthResult};

/// Maximum identity length (per RFC 5321)
const IDENTITY_MAX_LENGTH: usize = 254;

/// Authenticated identity
///
/// Produced by a successful directory verification or by decoding a valid
/// token. It is the only claim a token carries.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[display("{_0}")]
#[serde(transparent)]
pub struct Identity(String);

impl Identity {
    /// Create a new identity
    ///
    /// Surrounding whitespace is removed. Empty, oversized and control
    /// character carrying values are rejected as invalid credentials, the
    /// same answer a directory miss gives.
    pub fn new(identity: impl Into<String>) -> AuthResult<Self> {
        let identity = identity.into().trim().to_string();

        if identity.is_empty()
            || identity.len() > IDENTITY_MAX_LENGTH
            || identity.chars().any(char::is_control)
        {
            return Err(AuthError::InvalidCredentials);
        }

        Ok(Self(identity))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for Identity {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_trims() {
        let identity = Identity::new("  alice@example.com ").unwrap();
        assert_eq!(identity.as_str(), "alice@example.com");
        assert_eq!(identity.to_string(), "alice@example.com");
    }

    #[test]
    fn test_identity_rejects_empty() {
        assert!(matches!(
            Identity::new("   "),
            Err(AuthError::InvalidCredentials)
        ));
    }

    #[test]
    fn test_identity_rejects_control_chars() {
        assert!(Identity::new("a\nalice@example.com").is_err());
        assert!(Identity::new("a".repeat(255)).is_err());
    }

    #[test]
    fn test_identity_serializes_as_string() {
        let identity = Identity::new("alice@example.com").unwrap();
        assert_eq!(
            serde_json::to_string(&identity).unwrap(),
            r#""alice@example.com""#
        );
    }
}
