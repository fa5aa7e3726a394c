//! HTTP long-poll fallback transport.
//!
//! Viewers that cannot hold a WebSocket open fall back to repeated
//! long-poll requests. Each request registers a fresh subscriber, waits
//! for the first event (bounded), drains whatever else is already
//! queued, and returns the batch. There is no continuity between
//! requests — same semantics as a WebSocket reconnect.

use std::time::Duration;

use axum::extract::{Query, State};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::app_state::AppState;
use crate::ws::messages::PushMessage;

/// Longest a poll request may wait for its first event.
const MAX_WAIT_SECS: u64 = 30;

/// Query parameters for the long-poll endpoint.
#[derive(Debug, Deserialize, IntoParams)]
pub struct PollParams {
    /// Seconds to wait for the first event (1–30, default 20).
    pub wait_secs: Option<u64>,
}

/// `GET /api/stream/poll` — Next batch of broadcast events.
///
/// Returns an empty array when no event arrives within the wait window.
#[utoipa::path(
    get,
    path = "/api/stream/poll",
    tag = "Stream",
    summary = "Long-poll event batch",
    params(PollParams),
    responses(
        (status = 200, description = "Batch of events, possibly empty", body = [serde_json::Value]),
    )
)]
pub async fn poll_events(
    State(state): State<AppState>,
    Query(params): Query<PollParams>,
) -> impl IntoResponse {
    let wait = Duration::from_secs(params.wait_secs.unwrap_or(20).clamp(1, MAX_WAIT_SECS));

    let mut subscription = state.hub.subscribe();
    let mut batch: Vec<PushMessage> = Vec::new();

    if let Ok(Some(first)) = tokio::time::timeout(wait, subscription.rx.recv()).await {
        batch.push(PushMessage::from(first));
        while let Ok(event) = subscription.rx.try_recv() {
            batch.push(PushMessage::from(event));
        }
    }

    state.hub.unsubscribe(subscription.id);
    Json(batch)
}

/// Stream routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/stream/poll", get(poll_events))
}
