//! API Server Entry Point
//!
//! Application entry point and server initialization.
//! Uses `anyhow` for startup errors; request errors render through the
//! crates' own error types.

mod config;

use anyhow::Context;
use auth::{AuthGateState, LdapConnector, TokenService, auth_router, require_token};
use axum::{
    Router, http,
    http::{Method, header},
    middleware,
};
use hosting::{PgEntityStore, hosting_router};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::{AllowHeaders, AllowMethods, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "api=info,auth=info,hosting=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::from_env().context("Invalid configuration")?;
    tracing::debug!(config = ?config, "Configuration loaded");

    // Database connection
    let pool = PgEntityStore::connect(&config.hosting)
        .await
        .context("Failed to connect to database")?;

    tracing::info!(
        target_db = %config.hosting.target(),
        max_connections = config.hosting.max_connections,
        "Connected to database"
    );

    // Run migrations
    sqlx::migrate!("../../../database/migrations")
        .run(&pool)
        .await
        .context("Failed to run migrations")?;

    tracing::info!("Migrations completed");

    // Auth: signing secret and directory, fixed for the life of the process
    let directory = LdapConnector::new(config.auth.directory.clone());
    let tokens = Arc::new(TokenService::new(Arc::new(config.auth)));

    // CORS configuration
    let allowed_origins: Vec<http::HeaderValue> = config
        .frontend_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    let cors = CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods(AllowMethods::list([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ]))
        .allow_headers(AllowHeaders::list([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            header::ACCEPT,
        ]));

    // Build router: everything but /login sits behind the auth gate
    let protected = hosting_router(PgEntityStore::new(pool)).route_layer(
        middleware::from_fn_with_state(AuthGateState::new(tokens.clone()), require_token),
    );

    let app = Router::new()
        .merge(auth_router(directory, tokens))
        .merge(protected)
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Listening on {}", addr);

    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}
