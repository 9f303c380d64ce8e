//! Hosting Router

use axum::{Router, routing::get};

use crate::domain::entities::{Domain, Group, Plan, Tariff, Tenant, User};
use crate::domain::entity::Entity;
use crate::domain::repository::EntityStore;
use crate::infra::postgres::PgEntityStore;
use crate::presentation::handlers::{self, HostingAppState};

/// Create the Hosting router with the Postgres store
pub fn hosting_router(store: PgEntityStore) -> Router {
    hosting_router_generic(store)
}

/// Create a generic Hosting router for any store serving all six entities
pub fn hosting_router_generic<S>(store: S) -> Router
where
    S: EntityStore<Domain>
        + EntityStore<Plan>
        + EntityStore<Tariff>
        + EntityStore<Tenant>
        + EntityStore<Group>
        + EntityStore<User>
        + Send
        + Sync
        + 'static,
{
    Router::new()
        .merge(entity_routes::<Domain, S>(
            "/domains",
            "/domains/{domain}",
            None,
        ))
        .merge(entity_routes::<Plan, S>(
            "/domains/{domain}/plans",
            "/domains/{domain}/plans/{plan}",
            Some("/plans"),
        ))
        .merge(entity_routes::<Tariff, S>(
            "/domains/{domain}/plans/{plan}/tariffs",
            "/domains/{domain}/plans/{plan}/tariffs/{tariff}",
            Some("/tariffs"),
        ))
        .merge(entity_routes::<Tenant, S>(
            "/domains/{domain}/tenants",
            "/domains/{domain}/tenants/{tenant}",
            Some("/tenants"),
        ))
        .merge(entity_routes::<Group, S>(
            "/domains/{domain}/tenants/{tenant}/groups",
            "/domains/{domain}/tenants/{tenant}/groups/{group}",
            Some("/groups"),
        ))
        .merge(entity_routes::<User, S>(
            "/domains/{domain}/tenants/{tenant}/users",
            "/domains/{domain}/tenants/{tenant}/users/{user}",
            Some("/users"),
        ))
        .with_state(HostingAppState::new(store))
}

/// Routes of one entity kind
///
/// `collection` takes GET and POST, `item` takes GET, PUT and DELETE, and
/// the optional `flat` path lists the entity across all parents.
pub fn entity_routes<E, S>(
    collection: &str,
    item: &str,
    flat: Option<&str>,
) -> Router<HostingAppState<S>>
where
    E: Entity,
    S: EntityStore<E> + Send + Sync + 'static,
{
    let router = Router::new()
        .route(
            collection,
            get(handlers::list::<E, S>).post(handlers::create::<E, S>),
        )
        .route(
            item,
            get(handlers::get_one::<E, S>)
                .put(handlers::update::<E, S>)
                .delete(handlers::remove::<E, S>),
        );

    match flat {
        Some(path) => router.route(path, get(handlers::list::<E, S>)),
        None => router,
    }
}
