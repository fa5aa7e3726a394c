//! REST API layer: route handlers and router composition.
//!
//! All endpoints are mounted under `/api`.

pub mod handlers;

use axum::Router;

use crate::app_state::AppState;

/// Builds the complete API router with all REST endpoints.
///
/// Takes the state up front because the protected namespace attaches a
/// stateful middleware layer.
pub fn build_router(state: AppState) -> Router<AppState> {
    Router::new().nest("/api", handlers::routes(state))
}
