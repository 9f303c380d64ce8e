//! PostgreSQL Entity Store
//!
//! One implementation for all six entity kinds. Statement shapes come from
//! the [`Entity`] impls; reads add the filter predicates and the page,
//! mutations go through [`execute_one`].

use sqlx::postgres::PgPoolOptions;
use sqlx::{PgPool, Postgres, QueryBuilder};

use crate::application::config::HostingConfig;
use crate::application::filter::{build, push_page};
use crate::domain::entity::{Entity, Lifecycle, Scope, push_target};
use crate::domain::filter::FilterSet;
use crate::domain::repository::EntityStore;
use crate::error::HostingResult;
use crate::infra::executor::execute_one;

/// PostgreSQL-backed entity store
#[derive(Clone)]
pub struct PgEntityStore {
    pool: PgPool,
}

impl PgEntityStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Open the shared pool described by `config`
    pub async fn connect(config: &HostingConfig) -> Result<PgPool, sqlx::Error> {
        PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(config.acquire_timeout)
            .connect_with(config.connect_options.clone())
            .await
    }
}

// ============================================================================
// Statements
// ============================================================================

/// `SELECT <columns> FROM <table> <joins> [WHERE ...] ORDER BY ... LIMIT ... OFFSET ...`
pub fn select_statement<E: Entity>(filters: &FilterSet) -> QueryBuilder<'static, Postgres> {
    let mut qb = QueryBuilder::new("SELECT ");
    qb.push(E::COLUMNS)
        .push(" FROM ")
        .push(E::TABLE)
        .push(" ")
        .push(E::ALIAS);
    if !E::JOINS.is_empty() {
        qb.push(" ").push(E::JOINS);
    }

    build::<E>(filters).push_to(&mut qb);
    push_page::<E>(&mut qb, filters);
    qb
}

pub fn insert_statement<E: Entity>(
    scope: &Scope,
    input: &E::Input,
) -> HostingResult<QueryBuilder<'static, Postgres>> {
    let mut qb = QueryBuilder::new("");
    E::push_insert(&mut qb, scope, input)?;
    Ok(qb)
}

pub fn update_statement<E: Entity>(
    scope: &Scope,
    key: &str,
    input: &E::Input,
) -> HostingResult<QueryBuilder<'static, Postgres>> {
    let mut qb = QueryBuilder::new("");
    E::push_update(&mut qb, scope, key, input)?;
    Ok(qb)
}

/// `UPDATE <table> SET type = $1 WHERE id IN (<parent chain select>)`
pub fn soft_delete_statement<E: Entity>(
    scope: &Scope,
    key: &str,
    lifecycle: Lifecycle,
) -> HostingResult<QueryBuilder<'static, Postgres>> {
    let mut qb = QueryBuilder::new("UPDATE ");
    qb.push(E::TABLE)
        .push(" SET type = ")
        .push_bind(lifecycle.as_str())
        .push(" WHERE ");
    push_target::<E>(&mut qb, scope, key)?;
    Ok(qb)
}

// ============================================================================
// Entity Store Implementation
// ============================================================================

impl<E: Entity> EntityStore<E> for PgEntityStore {
    async fn find(&self, filters: &FilterSet) -> HostingResult<Vec<E::Record>> {
        let mut qb = select_statement::<E>(filters);

        let rows = qb
            .build_query_as::<E::Record>()
            .fetch_all(&self.pool)
            .await?;

        tracing::debug!(entity = E::KIND, rows = rows.len(), "Query");

        Ok(rows)
    }

    async fn insert(&self, scope: &Scope, input: &E::Input) -> HostingResult<()> {
        let statement = insert_statement::<E>(scope, input)?;
        execute_one(&self.pool, statement).await?;

        tracing::info!(entity = E::KIND, key = E::input_key(input), "Inserted");

        Ok(())
    }

    async fn update(&self, scope: &Scope, key: &str, input: &E::Input) -> HostingResult<()> {
        let statement = update_statement::<E>(scope, key, input)?;
        execute_one(&self.pool, statement).await?;

        tracing::info!(entity = E::KIND, key, new_key = E::input_key(input), "Updated");

        Ok(())
    }

    async fn soft_delete(
        &self,
        scope: &Scope,
        key: &str,
        lifecycle: Lifecycle,
    ) -> HostingResult<()> {
        let statement = soft_delete_statement::<E>(scope, key, lifecycle)?;
        execute_one(&self.pool, statement).await?;

        tracing::info!(entity = E::KIND, key, lifecycle = %lifecycle, "Soft deleted");

        Ok(())
    }
}
