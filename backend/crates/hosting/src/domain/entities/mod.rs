//! The six entity kinds of the hierarchy

pub mod domain;
pub mod group;
pub mod plan;
pub mod tariff;
pub mod tenant;
pub mod user;

pub use domain::{Domain, DomainInput, DomainKind, DomainRecord};
pub use group::{Group, GroupInput, GroupKind, GroupRecord};
pub use plan::{Plan, PlanInput, PlanKind, PlanRecord};
pub use tariff::{Regularity, Tariff, TariffInput, TariffKind, TariffRecord};
pub use tenant::{Tenant, TenantInput, TenantKind, TenantRecord};
pub use user::{User, UserInput, UserKind, UserRecord};
