//! Shared application state injected into all Axum handlers.

use std::sync::Arc;
use std::time::Duration;

use crate::auth::TokenIssuer;
use crate::db::Databases;
use crate::domain::BroadcastHub;

/// Shared application state available to all handlers via Axum's
/// `State` extractor.
#[derive(Debug, Clone)]
pub struct AppState {
    /// The two database pools.
    pub db: Databases,
    /// Broadcast hub for the real-time channel.
    pub hub: Arc<BroadcastHub>,
    /// Bearer-token issuer/verifier.
    pub tokens: Arc<TokenIssuer>,
    /// Immediate retries for the synchronous access-log endpoint.
    pub access_log_retries: u32,
    /// Delay between those retries.
    pub access_log_retry_delay: Duration,
}
