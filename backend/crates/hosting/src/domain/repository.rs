//! Repository Traits
//!
//! One store serves every entity kind; the Postgres implementation is in
//! the infrastructure layer.

use crate::domain::entity::{Entity, Lifecycle, Scope};
use crate::domain::filter::FilterSet;
use crate::error::HostingResult;

/// Entity store trait
#[trait_variant::make(EntityStore: Send)]
pub trait LocalEntityStore<E: Entity> {
    /// Rows matching the filter set, one page
    async fn find(&self, filters: &FilterSet) -> HostingResult<Vec<E::Record>>;

    /// Create one row under the parents named in `scope`
    async fn insert(&self, scope: &Scope, input: &E::Input) -> HostingResult<()>;

    /// Overwrite the row named `key` under `scope`; the input may rename it
    async fn update(&self, scope: &Scope, key: &str, input: &E::Input) -> HostingResult<()>;

    /// Flip the row named `key` under `scope` to a terminal lifecycle
    async fn soft_delete(&self, scope: &Scope, key: &str, lifecycle: Lifecycle)
    -> HostingResult<()>;
}
