//! Hosting domain layer

pub mod entities;
pub mod entity;
pub mod filter;
pub mod repository;
pub mod validation;

pub use entities::{Domain, Group, Plan, Tariff, Tenant, User};
pub use entity::{Entity, Lifecycle, Scope, ScopeField};
pub use filter::FilterSet;
pub use repository::{EntityStore, LocalEntityStore};
