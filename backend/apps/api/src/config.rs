//! Process configuration
//!
//! Everything is read from the environment once, before the listener is
//! bound. A `.env` file is loaded first when present.

use anyhow::{Context, bail};
use auth::{AuthConfig, DirectoryConfig};
use hosting::HostingConfig;
use std::time::Duration;

pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_FRONTEND_ORIGINS: &str = "http://localhost:3000";
/// Longest accepted token lifetime (one year)
pub const MAX_TOKEN_TTL_HOURS: u64 = 24 * 366;

/// Everything `main` needs to start serving
#[derive(Debug)]
pub struct AppConfig {
    pub port: u16,
    pub auth: AuthConfig,
    pub hosting: HostingConfig,
    pub frontend_origins: Vec<String>,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; `from_env` passes the process environment
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &str| -> anyhow::Result<String> {
            lookup(key)
                .filter(|v| !v.is_empty())
                .with_context(|| format!("{key} must be set in environment"))
        };

        let port = match lookup("PORT") {
            Some(raw) => raw
                .parse::<u16>()
                .with_context(|| format!("PORT is not a port: {raw}"))?,
            None => DEFAULT_PORT,
        };

        let token_ttl = match lookup("TOKEN_TTL_HOURS") {
            Some(raw) => {
                let hours: u64 = raw
                    .parse::<u64>()
                    .with_context(|| format!("TOKEN_TTL_HOURS is not a number: {raw}"))?;
                if hours == 0 || hours > MAX_TOKEN_TTL_HOURS {
                    bail!("TOKEN_TTL_HOURS must be between 1 and {MAX_TOKEN_TTL_HOURS}, got {hours}");
                }
                let secs = hours
                    .checked_mul(3600)
                    .with_context(|| format!("TOKEN_TTL_HOURS overflows: {hours}"))?;
                Duration::from_secs(secs)
            }
            None => auth::application::config::DEFAULT_TOKEN_TTL,
        };

        let directory = DirectoryConfig {
            url: required("BINDADDRESS")?,
            bind_dn: required("BINDUSERNAME")?,
            bind_password: required("BINDPASSWORD")?,
            base_dn: required("BASEDN")?,
            starttls: flag(&lookup, "LDAP_STARTTLS", true)?,
            tls_verify: flag(&lookup, "LDAP_TLS_VERIFY", true)?,
            ..DirectoryConfig::default()
        };

        let auth = match lookup("SECRET").filter(|s| !s.is_empty()) {
            Some(secret) => AuthConfig {
                token_secret: secret.into_bytes(),
                token_ttl,
                directory,
            },
            None if cfg!(debug_assertions) => {
                tracing::warn!("SECRET not set, signing tokens with a random development secret");
                AuthConfig {
                    token_ttl,
                    directory,
                    ..AuthConfig::with_random_secret()
                }
            }
            None => bail!("SECRET must be set in environment"),
        };

        let hosting = match lookup("DATABASE_URL").filter(|v| !v.is_empty()) {
            Some(url) => HostingConfig::from_url(&url).context("DATABASE_URL is not a valid URL")?,
            None => {
                let host = lookup("DBHOST").unwrap_or_else(|| "localhost".to_string());
                let db_port = match lookup("DBPORT") {
                    Some(raw) => raw
                        .parse::<u16>()
                        .with_context(|| format!("DBPORT is not a port: {raw}"))?,
                    None => 5432,
                };
                HostingConfig::from_parts(
                    &required("DBUSER")?,
                    &required("DBPWD")?,
                    &host,
                    db_port,
                    &required("DB")?,
                )
            }
        };

        let frontend_origins = lookup("FRONTEND_ORIGINS")
            .unwrap_or_else(|| DEFAULT_FRONTEND_ORIGINS.to_string())
            .split(',')
            .map(str::trim)
            .filter(|o| !o.is_empty())
            .map(String::from)
            .collect();

        Ok(Self {
            port,
            auth,
            hosting,
            frontend_origins,
        })
    }
}

fn flag<F>(lookup: &F, key: &str, default: bool) -> anyhow::Result<bool>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        None => Ok(default),
        Some(raw) => raw
            .parse::<bool>()
            .with_context(|| format!("{key} must be true or false, got {raw}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    const BASE: &[(&str, &str)] = &[
        ("SECRET", "top-secret"),
        ("BINDADDRESS", "ldap://ldap.example.com:389"),
        ("BINDUSERNAME", "cn=service,dc=example,dc=com"),
        ("BINDPASSWORD", "service-pw"),
        ("BASEDN", "ou=people,dc=example,dc=com"),
        ("DBUSER", "hosting"),
        ("DBPWD", "db-pw"),
        ("DB", "hosting"),
    ];

    #[test]
    fn test_defaults() {
        let config = AppConfig::from_lookup(lookup(BASE)).unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.auth.token_secret, b"top-secret");
        assert_eq!(config.auth.token_ttl, Duration::from_secs(24 * 3600));
        assert!(config.auth.directory.starttls);
        assert!(config.auth.directory.tls_verify);
        assert_eq!(config.hosting.target(), "hosting@localhost:5432/hosting");
        assert_eq!(config.frontend_origins, vec!["http://localhost:3000"]);
    }

    #[test]
    fn test_overrides() {
        let mut pairs = BASE.to_vec();
        pairs.extend([
            ("PORT", "9000"),
            ("TOKEN_TTL_HOURS", "2"),
            ("LDAP_STARTTLS", "false"),
            ("LDAP_TLS_VERIFY", "false"),
            ("DATABASE_URL", "postgres://u:p@db/x"),
            ("FRONTEND_ORIGINS", "https://a.example.com, https://b.example.com"),
        ]);
        let config = AppConfig::from_lookup(lookup(&pairs)).unwrap();
        assert_eq!(config.port, 9000);
        assert_eq!(config.auth.token_ttl, Duration::from_secs(7200));
        assert!(!config.auth.directory.starttls);
        assert!(!config.auth.directory.tls_verify);
        assert_eq!(config.hosting.target(), "u@db:5432/x");
        assert_eq!(config.frontend_origins.len(), 2);
    }

    #[test]
    fn test_missing_directory_settings_fail() {
        let pairs: Vec<_> = BASE
            .iter()
            .copied()
            .filter(|(k, _)| *k != "BASEDN")
            .collect();
        let err = AppConfig::from_lookup(lookup(&pairs)).unwrap_err();
        assert!(err.to_string().contains("BASEDN"));
    }

    #[test]
    fn test_token_ttl_is_bounded() {
        for hours in ["8785", "10000000000", "18446744073709551615"] {
            let mut pairs = BASE.to_vec();
            pairs.push(("TOKEN_TTL_HOURS", hours));
            let err = AppConfig::from_lookup(lookup(&pairs)).unwrap_err();
            assert!(err.to_string().contains("TOKEN_TTL_HOURS"), "{hours}");
        }

        let mut pairs = BASE.to_vec();
        pairs.push(("TOKEN_TTL_HOURS", "8784"));
        let config = AppConfig::from_lookup(lookup(&pairs)).unwrap();
        assert_eq!(config.auth.token_ttl, Duration::from_secs(8784 * 3600));
    }

    #[test]
    fn test_malformed_numbers_fail() {
        for (key, value) in [("PORT", "eighty"), ("TOKEN_TTL_HOURS", "0"), ("LDAP_TLS_VERIFY", "yes")] {
            let mut pairs = BASE.to_vec();
            pairs.push((key, value));
            assert!(AppConfig::from_lookup(lookup(&pairs)).is_err(), "{key}");
        }
    }
}
