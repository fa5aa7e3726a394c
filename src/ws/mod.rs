//! Real-time push channel: WebSocket transport and the shared push
//! message envelope (also used by the HTTP long-poll fallback).

pub mod connection;
pub mod handler;
pub mod messages;
