//! Application Configuration
//!
//! Store settings for the hosting crate. Built once at startup.

use sqlx::postgres::PgConnectOptions;
use std::fmt;
use std::time::Duration;

/// Pool size used by every deployment so far
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;

#[derive(Clone)]
pub struct HostingConfig {
    /// Where and as whom to connect; never rendered with its password
    pub connect_options: PgConnectOptions,
    pub max_connections: u32,
    pub acquire_timeout: Duration,
}

impl Default for HostingConfig {
    fn default() -> Self {
        Self {
            connect_options: PgConnectOptions::new_without_pgpass()
                .host("localhost")
                .port(5432)
                .username("postgres")
                .database("postgres"),
            max_connections: DEFAULT_MAX_CONNECTIONS,
            acquire_timeout: Duration::from_secs(5),
        }
    }
}

impl HostingConfig {
    /// Connection from its parts; the password is passed through as is, so
    /// it may hold `@`, `/` or `:`
    pub fn from_parts(user: &str, password: &str, host: &str, port: u16, database: &str) -> Self {
        Self {
            connect_options: PgConnectOptions::new_without_pgpass()
                .host(host)
                .port(port)
                .username(user)
                .password(password)
                .database(database),
            ..Self::default()
        }
    }

    /// Connection from a full `postgres://` URL
    pub fn from_url(url: &str) -> Result<Self, sqlx::Error> {
        Ok(Self {
            connect_options: url.parse::<PgConnectOptions>()?,
            ..Self::default()
        })
    }

    /// Local database with a short acquire timeout
    pub fn development() -> Self {
        Self {
            acquire_timeout: Duration::from_secs(2),
            ..Self::default()
        }
    }

    /// `user@host:port/db`, safe to log
    pub fn target(&self) -> String {
        let options = &self.connect_options;
        format!(
            "{}@{}:{}/{}",
            options.get_username(),
            options.get_host(),
            options.get_port(),
            options.get_database().unwrap_or_default()
        )
    }
}

impl fmt::Debug for HostingConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HostingConfig")
            .field("target", &self.target())
            .field("max_connections", &self.max_connections)
            .field("acquire_timeout", &self.acquire_timeout)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_parts() {
        let config = HostingConfig::from_parts("admin", "s3cret", "db", 5433, "hosting");
        assert_eq!(config.target(), "admin@db:5433/hosting");
        assert_eq!(config.max_connections, 5);
    }

    #[test]
    fn test_password_with_url_delimiters_keeps_host() {
        let config = HostingConfig::from_parts("admin", "p@ss/w:rd", "db", 5432, "hosting");
        let options = &config.connect_options;

        assert_eq!(options.get_host(), "db");
        assert_eq!(options.get_port(), 5432);
        assert_eq!(options.get_username(), "admin");
        assert_eq!(options.get_database(), Some("hosting"));
    }

    #[test]
    fn test_from_url() {
        let config = HostingConfig::from_url("postgres://u:p@db:6543/x").unwrap();
        assert_eq!(config.target(), "u@db:6543/x");
        assert!(HostingConfig::from_url("not a url").is_err());
    }

    #[test]
    fn test_debug_redacts_password() {
        let config = HostingConfig::from_parts("admin", "s3cret", "db", 5432, "hosting");
        let debug = format!("{config:?}");
        assert!(!debug.contains("s3cret"));
        assert!(debug.contains("admin@db:5432/hosting"));
    }
}
