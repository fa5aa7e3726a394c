//! REST endpoint handlers organized by resource.

pub mod access_logs;
pub mod login;
pub mod protected;
pub mod stream;
pub mod system;

use axum::Router;

use crate::app_state::AppState;

/// Composes all resource routes under `/api`.
pub fn routes(state: AppState) -> Router<AppState> {
    Router::new()
        .merge(login::routes())
        .merge(system::routes())
        .merge(access_logs::routes())
        .merge(stream::routes())
        .nest("/protected", protected::routes(state))
}
