//! Database layer: pool acquisition with startup retries, row models,
//! and the fixed battery of poll queries.

pub mod manager;
pub mod models;
pub mod queries;

pub use manager::{Databases, acquire_pool, connect_all, probe};
pub use models::{AccessLogEntry, SensorRow};
