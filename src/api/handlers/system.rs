//! System endpoints: health check.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;
use utoipa::ToSchema;

use crate::app_state::AppState;

/// Health check response.
#[derive(Debug, Serialize, ToSchema)]
struct HealthResponse {
    status: String,
    database: String,
}

/// `GET /api/health` — Service health status.
///
/// Always 200; the database field reflects a live acquire/release probe
/// of the primary pool at request time.
#[utoipa::path(
    get,
    path = "/api/health",
    tag = "System",
    summary = "Health check",
    responses(
        (status = 200, description = "Health status", body = HealthResponse),
    )
)]
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let connected = state.db.probe_primary().await;
    (
        StatusCode::OK,
        Json(HealthResponse {
            status: "ok".to_string(),
            database: if connected {
                "connected".to_string()
            } else {
                "disconnected".to_string()
            },
        }),
    )
}

/// System routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/health", get(health))
}
