//! Hosting Backend Module
//!
//! CRUD over the hosting hierarchy: domains own plans and tenants, plans
//! own tariffs, tenants own groups and users.
//!
//! Clean Architecture structure:
//! - `domain/` - Entity metadata, per-entity records and inputs, filter set, store trait
//! - `application/` - Query parameters, predicate builder
//! - `infra/` - Single-row executor, Postgres store
//! - `presentation/` - Generic handlers, path scope extractor, router
//!
//! ## Data Rules
//! - Every mutation affects exactly one row or is rolled back
//! - Parents are resolved by name inside the mutating statement
//! - Deletes are soft: the row's `type` becomes `disabled` or `deleted`

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use application::config::HostingConfig;
pub use application::filter::ListParams;
pub use domain::entities::{Domain, Group, Plan, Tariff, Tenant, User};
pub use domain::entity::{Entity, Lifecycle, Scope, ScopeField};
pub use domain::filter::FilterSet;
pub use domain::repository::EntityStore;
pub use error::{HostingError, HostingResult};
pub use infra::postgres::PgEntityStore;
pub use presentation::router::{entity_routes, hosting_router, hosting_router_generic};
