//! Application Layer
//!
//! Use cases and application services.

pub mod config;
pub mod login;
pub mod token;
pub mod verify_credentials;

// Re-exports
pub use config::{AuthConfig, DirectoryConfig};
pub use login::{LoginInput, LoginOutput, LoginUseCase};
pub use token::{IssuedToken, TokenService};
pub use verify_credentials::CredentialVerifier;
