//! Unit tests for Auth crate

#[cfg(test)]
mod support {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use crate::application::config::AuthConfig;
    use crate::application::token::TokenService;
    use crate::domain::directory::{DirectoryConnector, DirectorySession};
    use crate::domain::identity::Identity;
    use crate::error::{AuthError, AuthResult};

    pub const SERVICE_DN: &str = "cn=service,dc=example,dc=com";
    pub const SERVICE_SECRET: &str = "service-pw";

    /// A directory entry: mail, dn, secret
    pub struct Entry {
        pub mail: &'static str,
        pub dn: &'static str,
        pub secret: &'static str,
    }

    /// In-memory directory
    #[derive(Clone)]
    pub struct FakeDirectory {
        pub entries: Arc<Vec<Entry>>,
        pub service_secret: &'static str,
        pub unreachable: bool,
        pub connects: Arc<AtomicUsize>,
        pub unbinds: Arc<AtomicUsize>,
    }

    impl FakeDirectory {
        pub fn new(entries: Vec<Entry>) -> Self {
            Self {
                entries: Arc::new(entries),
                service_secret: SERVICE_SECRET,
                unreachable: false,
                connects: Arc::new(AtomicUsize::new(0)),
                unbinds: Arc::new(AtomicUsize::new(0)),
            }
        }

        pub fn standard() -> Self {
            Self::new(vec![
                Entry {
                    mail: "alice@example.com",
                    dn: "uid=alice,ou=people,dc=example,dc=com",
                    secret: "correct-pw",
                },
                Entry {
                    mail: "twin@example.com",
                    dn: "uid=twin1,ou=people,dc=example,dc=com",
                    secret: "pw",
                },
                Entry {
                    mail: "twin@example.com",
                    dn: "uid=twin2,ou=people,dc=example,dc=com",
                    secret: "pw",
                },
            ])
        }

        pub fn connects(&self) -> usize {
            self.connects.load(Ordering::SeqCst)
        }

        pub fn unbinds(&self) -> usize {
            self.unbinds.load(Ordering::SeqCst)
        }
    }

    pub struct FakeSession {
        directory: FakeDirectory,
    }

    impl DirectoryConnector for FakeDirectory {
        type Session = FakeSession;

        async fn connect(&self) -> AuthResult<FakeSession> {
            if self.unreachable {
                return Err(AuthError::DirectoryUnavailable(
                    "connection refused".to_string(),
                ));
            }
            self.connects.fetch_add(1, Ordering::SeqCst);
            Ok(FakeSession {
                directory: self.clone(),
            })
        }

        fn service_account(&self) -> (&str, &str) {
            (SERVICE_DN, SERVICE_SECRET)
        }
    }

    impl DirectorySession for FakeSession {
        async fn bind(&mut self, dn: &str, secret: &str) -> AuthResult<()> {
            let accepted = if dn == SERVICE_DN {
                secret == self.directory.service_secret
            } else {
                self.directory
                    .entries
                    .iter()
                    .any(|entry| entry.dn == dn && entry.secret == secret)
            };

            if accepted {
                Ok(())
            } else {
                Err(AuthError::InvalidCredentials)
            }
        }

        async fn find_entries(&mut self, identity: &Identity) -> AuthResult<Vec<String>> {
            Ok(self
                .directory
                .entries
                .iter()
                .filter(|entry| entry.mail == identity.as_str())
                .map(|entry| entry.dn.to_string())
                .collect())
        }

        async fn unbind(&mut self) -> AuthResult<()> {
            self.directory.unbinds.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    pub fn test_config() -> AuthConfig {
        AuthConfig {
            token_secret: b"test-secret-key-for-token-signing".to_vec(),
            ..AuthConfig::default()
        }
    }

    pub fn token_service() -> Arc<TokenService> {
        Arc::new(TokenService::new(Arc::new(test_config())))
    }
}

#[cfg(test)]
mod config_tests {
    use crate::application::config::*;
    use std::time::Duration;

    #[test]
    fn test_default_config() {
        let config = AuthConfig::default();

        assert_eq!(config.token_ttl, Duration::from_secs(24 * 3600));
        assert_eq!(config.directory.object_class, "inetOrgPerson");
        assert_eq!(config.directory.identity_attribute, "mail");
        assert!(config.directory.starttls);
        assert!(config.directory.tls_verify);
    }

    #[test]
    fn test_with_random_secret() {
        let config1 = AuthConfig::with_random_secret();
        let config2 = AuthConfig::with_random_secret();

        assert_eq!(config1.token_secret.len(), 32);
        assert_ne!(config1.token_secret, config2.token_secret);
    }

    #[test]
    fn test_development_config() {
        let config = AuthConfig::development();

        assert!(!config.directory.starttls);
        assert!(!config.directory.tls_verify);
        assert!(config.token_secret.iter().any(|&b| b != 0));
    }


    #[test]
    fn test_debug_redacts_secrets() {
        let mut config = AuthConfig::with_random_secret();
        config.directory.bind_password = "hunter2".to_string();

        let debug = format!("{config:?}");
        assert!(!debug.contains("hunter2"));
        assert!(debug.contains("<redacted>"));
    }
}

#[cfg(test)]
mod token_tests {
    use super::support::*;
    use crate::application::config::AuthConfig;
    use crate::application::token::TokenService;
    use crate::domain::identity::Identity;
    use crate::error::AuthError;
    use chrono::{Duration, Utc};
    use std::sync::Arc;

    fn alice() -> Identity {
        Identity::new("alice@example.com").unwrap()
    }

    #[test]
    fn test_issue_then_validate_roundtrip() {
        let service = token_service();
        let issued = service.issue(&alice()).unwrap();

        assert!(!issued.token.is_empty());
        assert_eq!(service.validate(&issued.token).unwrap(), alice());
    }

    #[test]
    fn test_issue_sets_expiry_from_ttl() {
        let service = token_service();
        let now = Utc::now();
        let issued = service.issue_at(&alice(), now).unwrap();

        let expected = now + Duration::hours(24);
        assert!((issued.expires_at - expected).num_seconds().abs() <= 1);
    }

    #[test]
    fn test_expired_token_is_rejected() {
        let service = token_service();
        let issued = service
            .issue_at(&alice(), Utc::now() - Duration::hours(25))
            .unwrap();

        assert!(matches!(
            service.validate(&issued.token),
            Err(AuthError::TokenInvalid)
        ));
    }

    #[test]
    fn test_token_expiring_now_is_rejected() {
        let service = token_service();
        let issued = service
            .issue_at(&alice(), Utc::now() - Duration::hours(24))
            .unwrap();

        assert!(service.validate(&issued.token).is_err());
    }

    #[test]
    fn test_any_flipped_byte_is_rejected() {
        let service = token_service();
        let token = service.issue(&alice()).unwrap().token;

        for i in 0..token.len() {
            let mut bytes = token.clone().into_bytes();
            bytes[i] = if bytes[i] == b'A' { b'B' } else { b'A' };
            let tampered = String::from_utf8(bytes).unwrap();

            assert!(
                service.validate(&tampered).is_err(),
                "tampered byte {i} must invalidate the token"
            );
        }
    }

    #[test]
    fn test_foreign_secret_is_rejected() {
        let other = TokenService::new(Arc::new(AuthConfig {
            token_secret: b"some-other-secret".to_vec(),
            ..AuthConfig::default()
        }));
        let token = other.issue(&alice()).unwrap().token;

        assert!(matches!(
            token_service().validate(&token),
            Err(AuthError::TokenInvalid)
        ));
    }

    #[test]
    fn test_garbage_is_rejected() {
        let service = token_service();
        assert!(service.validate("").is_err());
        assert!(service.validate("not-a-token").is_err());
        assert!(service.validate("a.b.c").is_err());
    }

    #[test]
    fn test_out_of_range_expiry_is_an_error() {
        for ttl in [
            std::time::Duration::from_secs(10_000_000_000 * 3600),
            std::time::Duration::MAX,
        ] {
            let service = TokenService::new(Arc::new(AuthConfig {
                token_ttl: ttl,
                ..AuthConfig::with_random_secret()
            }));

            assert!(matches!(
                service.issue(&alice()),
                Err(AuthError::Internal(_))
            ));
        }
    }

    #[test]
    fn test_tokens_are_independent() {
        let service = token_service();
        let first = service.issue(&alice()).unwrap();
        let second = service
            .issue_at(&alice(), Utc::now() + Duration::seconds(5))
            .unwrap();

        assert_ne!(first.token, second.token);
        assert!(service.validate(&first.token).is_ok());
        assert!(service.validate(&second.token).is_ok());
    }
}

#[cfg(test)]
mod verifier_tests {
    use super::support::*;
    use crate::application::verify_credentials::CredentialVerifier;
    use crate::domain::identity::Identity;
    use crate::error::AuthError;
    use std::sync::Arc;

    fn verifier(directory: &FakeDirectory) -> CredentialVerifier<FakeDirectory> {
        CredentialVerifier::new(Arc::new(directory.clone()))
    }

    fn identity(s: &str) -> Identity {
        Identity::new(s).unwrap()
    }

    #[tokio::test]
    async fn test_single_entry_with_correct_secret() {
        let directory = FakeDirectory::standard();
        let result = verifier(&directory)
            .verify(&identity("alice@example.com"), "correct-pw")
            .await;

        assert!(result.is_ok());
        assert_eq!(directory.connects(), 1);
        assert_eq!(directory.unbinds(), 1);
    }

    #[tokio::test]
    async fn test_wrong_secret() {
        let directory = FakeDirectory::standard();
        let result = verifier(&directory)
            .verify(&identity("alice@example.com"), "wrong-pw")
            .await;

        assert!(matches!(result, Err(AuthError::InvalidCredentials)));
        assert_eq!(directory.unbinds(), 1);
    }

    #[tokio::test]
    async fn test_no_matching_entry() {
        let directory = FakeDirectory::standard();
        let result = verifier(&directory)
            .verify(&identity("nobody@example.com"), "correct-pw")
            .await;

        assert!(matches!(result, Err(AuthError::InvalidCredentials)));
        assert_eq!(directory.unbinds(), 1);
    }

    #[tokio::test]
    async fn test_multiple_matching_entries() {
        let directory = FakeDirectory::standard();
        let result = verifier(&directory)
            .verify(&identity("twin@example.com"), "pw")
            .await;

        assert!(matches!(result, Err(AuthError::InvalidCredentials)));
        assert_eq!(directory.unbinds(), 1);
    }

    #[tokio::test]
    async fn test_empty_secret_never_reaches_directory() {
        let directory = FakeDirectory::standard();
        let result = verifier(&directory)
            .verify(&identity("alice@example.com"), "")
            .await;

        assert!(matches!(result, Err(AuthError::InvalidCredentials)));
        assert_eq!(directory.connects(), 0);
    }

    #[tokio::test]
    async fn test_unreachable_directory() {
        let mut directory = FakeDirectory::standard();
        directory.unreachable = true;

        let result = verifier(&directory)
            .verify(&identity("alice@example.com"), "correct-pw")
            .await;

        assert!(matches!(result, Err(AuthError::DirectoryUnavailable(_))));
    }

    #[tokio::test]
    async fn test_rejected_service_account_is_not_a_credentials_error() {
        let mut directory = FakeDirectory::standard();
        directory.service_secret = "rotated";

        let result = verifier(&directory)
            .verify(&identity("alice@example.com"), "correct-pw")
            .await;

        assert!(matches!(result, Err(AuthError::DirectoryUnavailable(_))));
        assert_eq!(directory.unbinds(), 1);
    }
}

#[cfg(test)]
mod error_tests {
    use crate::error::*;
    use axum::http::StatusCode;
    use axum::response::IntoResponse;

    #[test]
    fn test_error_into_response_status_codes() {
        let test_cases: Vec<(AuthError, StatusCode)> = vec![
            (AuthError::InvalidCredentials, StatusCode::UNAUTHORIZED),
            (AuthError::MissingToken, StatusCode::UNAUTHORIZED),
            (AuthError::TokenInvalid, StatusCode::UNAUTHORIZED),
            (AuthError::BadRequest("x".into()), StatusCode::BAD_REQUEST),
            (
                AuthError::DirectoryUnavailable("down".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (
                AuthError::Internal("test".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (error, expected_status) in test_cases {
            assert_eq!(error.status_code(), expected_status);
            let response = error.into_response();
            assert_eq!(
                response.status(),
                expected_status,
                "Error should return correct status code"
            );
        }
    }

    #[test]
    fn test_public_messages() {
        assert_eq!(
            AuthError::InvalidCredentials.public_message(),
            "Invalid Credentials"
        );
        assert_eq!(AuthError::TokenInvalid.public_message(), "Unauthorized");
        assert_eq!(
            AuthError::DirectoryUnavailable("ldap://10.0.0.1 refused".into()).public_message(),
            "Internal error"
        );
    }
}

#[cfg(test)]
mod router_tests {
    use super::support::*;
    use crate::presentation::dto::LoginResponse;
    use crate::presentation::middleware::{AuthGateState, CurrentIdentity, require_token};
    use crate::presentation::router::auth_router_generic;
    use axum::Router;
    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use axum::routing::get;
    use kernel::status::Status;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tower::ServiceExt;

    fn login_request(body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/login")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn body_json<T: serde::de::DeserializeOwned>(response: axum::response::Response) -> T {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_login_with_valid_credentials() {
        let tokens = token_service();
        let app = auth_router_generic(FakeDirectory::standard(), tokens.clone());

        let response = app
            .oneshot(login_request(
                r#"{"username":"alice@example.com","password":"correct-pw"}"#,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body: LoginResponse = body_json(response).await;
        assert!(!body.token.is_empty());
        assert!(chrono::DateTime::parse_from_rfc3339(&body.expires).is_ok());
        assert_eq!(tokens.validate(&body.token).unwrap().as_str(), "alice@example.com");
    }

    #[tokio::test]
    async fn test_login_with_wrong_password() {
        let app = auth_router_generic(FakeDirectory::standard(), token_service());

        let response = app
            .oneshot(login_request(
                r#"{"username":"alice@example.com","password":"nope"}"#,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let body: Status = body_json(response).await;
        assert_eq!(body, Status::new(401, "Invalid Credentials"));
    }

    #[tokio::test]
    async fn test_login_with_malformed_body() {
        let app = auth_router_generic(FakeDirectory::standard(), token_service());

        let response = app.oneshot(login_request("{not json")).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body: Status = body_json(response).await;
        assert_eq!(body.message, "Bad incoming data");
    }

    #[tokio::test]
    async fn test_login_with_directory_down() {
        let mut directory = FakeDirectory::standard();
        directory.unreachable = true;
        let app = auth_router_generic(directory, token_service());

        let response = app
            .oneshot(login_request(
                r#"{"username":"alice@example.com","password":"correct-pw"}"#,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    fn protected_app(hits: Arc<AtomicUsize>) -> Router {
        let tokens = token_service();
        Router::new()
            .route(
                "/whoami",
                get(move |CurrentIdentity(identity): CurrentIdentity| {
                    let hits = hits.clone();
                    async move {
                        hits.fetch_add(1, Ordering::SeqCst);
                        identity.to_string()
                    }
                }),
            )
            .route_layer(axum::middleware::from_fn_with_state(
                AuthGateState::new(tokens),
                require_token,
            ))
    }

    #[tokio::test]
    async fn test_gate_attaches_identity() {
        let hits = Arc::new(AtomicUsize::new(0));
        let token = token_service()
            .issue(&crate::Identity::new("alice@example.com").unwrap())
            .unwrap()
            .token;

        let response = protected_app(hits.clone())
            .oneshot(
                Request::builder()
                    .uri("/whoami")
                    .header(header::AUTHORIZATION, format!("Bearer {token}"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(&bytes[..], b"alice@example.com");
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_gate_rejects_without_running_handler() {
        let hits = Arc::new(AtomicUsize::new(0));

        for authorization in [None, Some("Bearer"), Some("Token abc"), Some("Bearer garbled.token.value")] {
            let mut builder = Request::builder().uri("/whoami");
            if let Some(value) = authorization {
                builder = builder.header(header::AUTHORIZATION, value);
            }

            let response = protected_app(hits.clone())
                .oneshot(builder.body(Body::empty()).unwrap())
                .await
                .unwrap();

            assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
            let body: Status = body_json(response).await;
            assert_eq!(body, Status::new(401, "Unauthorized"));
        }

        assert_eq!(hits.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_identity_extractor_outside_gate_rejects() {
        let app = Router::new().route(
            "/open",
            get(|CurrentIdentity(identity): CurrentIdentity| async move { identity.to_string() }),
        );

        let response = app
            .oneshot(Request::builder().uri("/open").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}
