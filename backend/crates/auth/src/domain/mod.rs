//! Domain Layer
//!
//! Contains the identity value object and the directory traits.

pub mod directory;
pub mod identity;

// Re-exports
pub use directory::{DirectoryConnector, DirectorySession};
pub use identity::Identity;
