//! Synchronous access-log endpoint.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};

use crate::app_state::AppState;
use crate::db::queries;
use crate::error::{ErrorResponse, GatewayError};

/// `GET /api/access-logs` — The five most recent access-log entries.
///
/// Same join the poller broadcasts, reachable on demand. Unlike the
/// poller's fire-and-forget suppression, this path retries up to the
/// configured attempt count with a short fixed delay before surfacing
/// the error to the caller.
///
/// # Errors
///
/// Returns [`GatewayError::Database`] with an `{error, details}` body
/// when every retry fails.
#[utoipa::path(
    get,
    path = "/api/access-logs",
    tag = "AccessLogs",
    summary = "Recent access-log entries",
    responses(
        (status = 200, description = "Up to five entries, most recent first", body = [crate::db::AccessLogEntry]),
        (status = 500, description = "All retries exhausted", body = ErrorResponse),
    )
)]
pub async fn access_logs(State(state): State<AppState>) -> Result<impl IntoResponse, GatewayError> {
    let entries = queries::recent_access_entries_with_retry(
        &state.db.access,
        state.access_log_retries,
        state.access_log_retry_delay,
    )
    .await?;

    Ok(Json(entries))
}

/// Access-log routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/access-logs", get(access_logs))
}
