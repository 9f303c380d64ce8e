//! Hosting application layer

pub mod config;
pub mod filter;

pub use config::HostingConfig;
pub use filter::{ListParams, Operator, Predicate, Predicates, build, push_page};
