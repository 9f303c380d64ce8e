//! HTTP Handlers
//!
//! One set of handlers serves every entity kind; the router instantiates
//! them per entity.

use auth::CurrentIdentity;
use axum::Json;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Query, State};
use kernel::status::Status;
use std::sync::Arc;
use validator::Validate;

use crate::application::filter::ListParams;
use crate::domain::entity::Entity;
use crate::domain::filter::FilterSet;
use crate::domain::repository::EntityStore;
use crate::error::{HostingError, HostingResult};
use crate::presentation::dto::OneOrMany;
use crate::presentation::extract::PathScope;

/// Shared state for hosting handlers
pub struct HostingAppState<S> {
    pub store: Arc<S>,
}

impl<S> HostingAppState<S> {
    pub fn new(store: S) -> Self {
        Self {
            store: Arc::new(store),
        }
    }
}

impl<S> Clone for HostingAppState<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}

/// Malformed query strings fall back to the defaults
fn list_params(params: Result<Query<ListParams>, QueryRejection>) -> ListParams {
    match params {
        Ok(Query(params)) => params,
        Err(e) => {
            tracing::debug!(error = %e, "Ignoring malformed query string");
            ListParams::default()
        }
    }
}

fn decode<T: Validate>(payload: Result<Json<T>, JsonRejection>) -> HostingResult<T> {
    let Json(input) = payload?;
    input.validate()?;
    Ok(input)
}

// ============================================================================
// Read
// ============================================================================

/// GET on a collection
pub async fn list<E, S>(
    State(state): State<HostingAppState<S>>,
    CurrentIdentity(identity): CurrentIdentity,
    PathScope(scope): PathScope,
    params: Result<Query<ListParams>, QueryRejection>,
) -> HostingResult<Json<OneOrMany<E::Record>>>
where
    E: Entity,
    S: EntityStore<E> + Send + Sync + 'static,
{
    let filters = list_params(params).into_filter_set(scope);

    tracing::debug!(identity = %identity, entity = E::KIND, "List");

    let rows = state.store.find(&filters).await?;

    Ok(Json(OneOrMany::from(rows)))
}

/// GET on a single item
pub async fn get_one<E, S>(
    State(state): State<HostingAppState<S>>,
    CurrentIdentity(identity): CurrentIdentity,
    PathScope(scope): PathScope,
    params: Result<Query<ListParams>, QueryRejection>,
) -> HostingResult<Json<OneOrMany<E::Record>>>
where
    E: Entity,
    S: EntityStore<E> + Send + Sync + 'static,
{
    let filters = list_params(params).into_filter_set(scope);

    tracing::debug!(identity = %identity, entity = E::KIND, "Get");

    let rows = state.store.find(&filters).await?;
    if rows.is_empty() {
        return Err(HostingError::NotFound);
    }

    Ok(Json(OneOrMany::from(rows)))
}

// ============================================================================
// Mutations
// ============================================================================

/// POST on a collection
pub async fn create<E, S>(
    State(state): State<HostingAppState<S>>,
    CurrentIdentity(identity): CurrentIdentity,
    PathScope(scope): PathScope,
    payload: Result<Json<E::Input>, JsonRejection>,
) -> HostingResult<Status>
where
    E: Entity,
    S: EntityStore<E> + Send + Sync + 'static,
{
    let input = decode(payload)?;

    state.store.insert(&scope, &input).await?;

    tracing::info!(
        identity = %identity,
        entity = E::KIND,
        key = E::input_key(&input),
        "Created"
    );

    Ok(Status::inserted())
}

/// PUT on an item; answers the record as stored under its new key
pub async fn update<E, S>(
    State(state): State<HostingAppState<S>>,
    CurrentIdentity(identity): CurrentIdentity,
    PathScope(scope): PathScope,
    payload: Result<Json<E::Input>, JsonRejection>,
) -> HostingResult<Json<E::Record>>
where
    E: Entity,
    S: EntityStore<E> + Send + Sync + 'static,
{
    let input = decode(payload)?;
    let key = scope.require(E::KEY)?.to_string();

    state.store.update(&scope, &key, &input).await?;

    tracing::info!(
        identity = %identity,
        entity = E::KIND,
        key = %key,
        new_key = E::input_key(&input),
        "Updated"
    );

    let renamed = scope.with(E::KEY, E::input_key(&input));
    let record = state
        .store
        .find(&FilterSet::show_all(renamed))
        .await?
        .into_iter()
        .next()
        .ok_or(HostingError::NotFound)?;

    Ok(Json(record))
}

/// DELETE on an item; `forced=true` marks it deleted instead of disabled
pub async fn remove<E, S>(
    State(state): State<HostingAppState<S>>,
    CurrentIdentity(identity): CurrentIdentity,
    PathScope(scope): PathScope,
    params: Result<Query<ListParams>, QueryRejection>,
) -> HostingResult<Status>
where
    E: Entity,
    S: EntityStore<E> + Send + Sync + 'static,
{
    let lifecycle = list_params(params).into_filter_set(scope.clone()).delete_as;
    let key = scope.require(E::KEY)?;

    state.store.soft_delete(&scope, key, lifecycle).await?;

    tracing::info!(
        identity = %identity,
        entity = E::KIND,
        key = %key,
        lifecycle = %lifecycle,
        "Deleted"
    );

    Ok(Status::deleted())
}
