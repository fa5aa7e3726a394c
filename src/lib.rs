//! # noc-gateway
//!
//! REST API and WebSocket gateway for live facility monitoring.
//!
//! The gateway polls two relational stores — an operational store holding
//! sensor, electrical, and fire/smoke readings, and a separate access-log
//! store — on a fixed cadence, normalizes the latest rows into typed
//! events, and pushes them to every connected viewer. A small REST surface
//! (login, health, access logs) sits next to the push channel, with a
//! bearer-token gate in front of the protected routes.
//!
//! ## Architecture
//!
//! ```text
//! Clients (HTTP, WebSocket, long-poll)
//!     │
//!     ├── REST Handlers (api/)
//!     ├── WS Handler (ws/)
//!     │
//!     ├── Poller + Normalizer (poller/)
//!     ├── BroadcastHub (domain/)
//!     ├── Auth Gate (auth/)
//!     │
//!     └── PostgreSQL pools × 2 (db/)
//! ```

pub mod api;
pub mod app_state;
pub mod auth;
pub mod config;
pub mod db;
pub mod domain;
pub mod error;
pub mod poller;
pub mod ws;
