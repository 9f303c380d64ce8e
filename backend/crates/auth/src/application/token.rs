//! Token Service
//!
//! Issues and validates HS256-signed identity tokens. Tokens are stateless:
//! nothing is stored server-side and nothing is ever revoked.

use chrono::{DateTime, Duration, TimeZone, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::domain::identity::Identity;
use crate::error::{AuthError, AuthResult};

/// Token claims
#[derive(Debug, Clone, Serialize, Deserialize)]
struct Claims {
    username: String,
    /// Expiry as unix seconds
    exp: i64,
}

/// A freshly signed token and the instant it stops being valid
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

/// Token service
#[derive(Clone)]
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    ttl: Duration,
}

impl TokenService {
    pub fn new(config: Arc<AuthConfig>) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.validate_exp = true;
        validation.set_required_spec_claims(&["exp"]);

        Self {
            encoding_key: EncodingKey::from_secret(&config.token_secret),
            decoding_key: DecodingKey::from_secret(&config.token_secret),
            validation,
            ttl: Duration::from_std(config.token_ttl).unwrap_or(Duration::MAX),
        }
    }

    /// Issue a token for `identity`, valid for the configured TTL from now
    pub fn issue(&self, identity: &Identity) -> AuthResult<IssuedToken> {
        self.issue_at(identity, Utc::now())
    }

    /// Issue a token as if the current instant were `now`
    pub fn issue_at(&self, identity: &Identity, now: DateTime<Utc>) -> AuthResult<IssuedToken> {
        let expires_at = now
            .checked_add_signed(self.ttl)
            .ok_or_else(|| AuthError::Internal("Token expiry out of range".to_string()))?;
        let claims = Claims {
            username: identity.as_str().to_string(),
            exp: expires_at.timestamp(),
        };

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| AuthError::Internal(format!("Failed to sign token: {e}")))?;

        // Second precision, the same instant the token carries
        let expires_at = Utc
            .timestamp_opt(claims.exp, 0)
            .single()
            .ok_or_else(|| AuthError::Internal("Token expiry out of range".to_string()))?;

        Ok(IssuedToken { token, expires_at })
    }

    /// Validate `token` and recover the identity it was issued for
    ///
    /// Malformed, foreign-signed and expired tokens are all `TokenInvalid`.
    pub fn validate(&self, token: &str) -> AuthResult<Identity> {
        let data = decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(|e| {
            tracing::debug!(error = %e, "Token validation failed");
            AuthError::TokenInvalid
        })?;

        // jsonwebtoken accepts exp == now; a token is only valid strictly before expiry
        if Utc::now().timestamp() >= data.claims.exp {
            return Err(AuthError::TokenInvalid);
        }

        Identity::new(data.claims.username).map_err(|_| AuthError::TokenInvalid)
    }
}
