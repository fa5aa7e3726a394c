//! Protected namespace: routes behind the bearer-token gate.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Extension, Json, Router, middleware};
use serde::Serialize;
use utoipa::ToSchema;

use crate::app_state::AppState;
use crate::auth::Claims;
use crate::auth::middleware::require_bearer;
use crate::error::ErrorResponse;

/// Echo of the verified token claims.
#[derive(Debug, Serialize, ToSchema)]
struct SessionResponse {
    username: String,
    issued_at: i64,
    expires_at: i64,
}

/// `GET /api/protected/session` — Who the presented token belongs to.
#[utoipa::path(
    get,
    path = "/api/protected/session",
    tag = "Protected",
    summary = "Current session claims",
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Verified claims", body = SessionResponse),
        (status = 401, description = "Missing token", body = ErrorResponse),
        (status = 403, description = "Invalid or expired token", body = ErrorResponse),
    )
)]
pub async fn session(Extension(claims): Extension<Claims>) -> impl IntoResponse {
    Json(SessionResponse {
        username: claims.sub,
        issued_at: claims.iat,
        expires_at: claims.exp,
    })
}

/// Live subscriber count.
#[derive(Debug, Serialize, ToSchema)]
struct SubscribersResponse {
    connected: usize,
}

/// `GET /api/protected/subscribers` — Number of live viewers.
#[utoipa::path(
    get,
    path = "/api/protected/subscribers",
    tag = "Protected",
    summary = "Live subscriber count",
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Current count", body = SubscribersResponse),
        (status = 401, description = "Missing token", body = ErrorResponse),
        (status = 403, description = "Invalid or expired token", body = ErrorResponse),
    )
)]
pub async fn subscribers(State(state): State<AppState>) -> impl IntoResponse {
    Json(SubscribersResponse {
        connected: state.hub.subscriber_count(),
    })
}

/// Protected routes with the bearer gate attached.
pub fn routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/session", get(session))
        .route("/subscribers", get(subscribers))
        .route_layer(middleware::from_fn_with_state(state, require_bearer))
}
