//! Platform Crate - Technical Infrastructure
//!
//! This crate provides shared HTTP plumbing that carries no domain meaning:
//! - Bearer token extraction from the `Authorization` header
//! - Client IP resolution behind reverse proxies

pub mod bearer;
pub mod client;
