//! noc-gateway server entry point.
//!
//! Starts the Axum HTTP server with REST and WebSocket endpoints, after
//! establishing both database pools and launching the poll loop.

use std::sync::Arc;

use axum::Router;
use axum::http::HeaderValue;
use axum::routing::get;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use noc_gateway::api;
use noc_gateway::app_state::AppState;
use noc_gateway::auth::TokenIssuer;
use noc_gateway::config::GatewayConfig;
use noc_gateway::db;
use noc_gateway::domain::BroadcastHub;
use noc_gateway::poller::Poller;
use noc_gateway::ws::handler::ws_handler;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Load configuration
    let config = GatewayConfig::from_env()?;
    tracing::info!(addr = %config.listen_addr, "starting noc-gateway");

    // Acquire both pools; exhausting retries on either is fatal.
    let databases = match db::connect_all(&config).await {
        Ok(databases) => databases,
        Err(e) => {
            tracing::error!(error = %e, "startup connectivity failed, terminating");
            return Err(e.into());
        }
    };

    // Build domain layer
    let hub = Arc::new(BroadcastHub::new(config.hub_channel_capacity));
    let tokens = Arc::new(TokenIssuer::new(&config.token_secret, config.token_ttl_secs));

    // Build application state
    let app_state = AppState {
        db: databases.clone(),
        hub: Arc::clone(&hub),
        tokens,
        access_log_retries: config.access_log_retries,
        access_log_retry_delay: config.access_log_retry_delay(),
    };

    // Start the poll loop
    let poller = Poller::new(databases.clone(), Arc::clone(&hub), config.poll_interval());
    let poller_handle = poller.spawn();

    // Build router
    let app = Router::new()
        .merge(api::build_router(app_state.clone()))
        .route("/ws", get(ws_handler))
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(config.cors_allowed_origin.as_deref()))
        .with_state(app_state);

    // Start server
    let listener = tokio::net::TcpListener::bind(config.listen_addr).await?;
    tracing::info!(addr = %config.listen_addr, "server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    // Stop the timer and close pools on the way out.
    poller_handle.abort();
    databases.close().await;
    tracing::info!("shutdown complete");

    Ok(())
}

/// CORS policy: the configured origin when one is set, permissive
/// otherwise (local development).
fn cors_layer(allowed_origin: Option<&str>) -> CorsLayer {
    match allowed_origin.and_then(|origin| origin.parse::<HeaderValue>().ok()) {
        Some(origin) => CorsLayer::new()
            .allow_origin(origin)
            .allow_methods(Any)
            .allow_headers(Any),
        None => CorsLayer::permissive(),
    }
}

/// Resolves when the process receives a termination signal.
async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_err() {
        tracing::warn!("failed to install ctrl-c handler");
        return;
    }
    tracing::info!("shutdown signal received");
}
