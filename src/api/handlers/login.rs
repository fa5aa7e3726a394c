//! Login endpoint issuing bearer tokens.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::routing::post;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::app_state::AppState;
use crate::auth::password;
use crate::db::queries;
use crate::error::{ErrorResponse, GatewayError};

/// Well-formed `salt$digest` stand-in verified for unknown usernames, so
/// the no-such-user path burns the same hash work as a wrong password
/// and the two 401s are not distinguishable by timing. Matches nothing:
/// the all-zero digest is not the SHA-256 of any input we could receive.
const UNKNOWN_USER_HASH: &str = "00000000000000000000000000000000$0000000000000000000000000000000000000000000000000000000000000000";

/// Login request body.
#[derive(Debug, Deserialize, ToSchema)]
pub struct LoginRequest {
    /// Username.
    pub username: String,
    /// Plaintext password, verified against the stored salted hash.
    pub password: String,
}

/// Login response body.
#[derive(Debug, Serialize, ToSchema)]
pub struct LoginResponse {
    /// Bearer token for the protected namespace.
    pub token: String,
}

/// `POST /api/login` — Verify credentials and issue a token.
///
/// An unknown username and a wrong password are indistinguishable to the
/// caller: both are a plain 401, so usernames cannot be enumerated.
///
/// # Errors
///
/// Returns [`GatewayError::Unauthorized`] on any credential mismatch and
/// [`GatewayError::Database`] when the lookup itself fails.
#[utoipa::path(
    post,
    path = "/api/login",
    tag = "Auth",
    summary = "Log in",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Token issued", body = LoginResponse),
        (status = 401, description = "Invalid credentials", body = ErrorResponse),
        (status = 500, description = "Lookup failed", body = ErrorResponse),
    )
)]
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<impl IntoResponse, GatewayError> {
    let user = queries::find_user(&state.db.primary, &req.username).await?;

    let stored = user
        .as_ref()
        .map_or(UNKNOWN_USER_HASH, |u| u.password_hash.as_str());
    let verified = password::verify_password(&req.password, stored) && user.is_some();
    if !verified {
        tracing::info!(username = %req.username, "login rejected");
        return Err(GatewayError::Unauthorized);
    }

    let token = state.tokens.issue(&req.username)?;
    tracing::info!(username = %req.username, "login succeeded");
    Ok(Json(LoginResponse { token }))
}

/// Auth routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/login", post(login))
}
