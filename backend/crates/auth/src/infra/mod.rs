//! Infrastructure Layer
//!
//! Directory implementations.

pub mod ldap;

pub use ldap::{LdapConnector, LdapSession};
