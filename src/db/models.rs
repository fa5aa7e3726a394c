//! Row models for the polled tables.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Latest row of a temperature/humidity sensor table.
///
/// Values are kept in their stored string form here; parsing into floats
/// (with a NaN sentinel for malformed values) happens at normalization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SensorRow {
    /// Temperature reading as stored (string/decimal form).
    pub temperature: String,
    /// Relative-humidity reading as stored.
    pub humidity: String,
    /// When the sensor recorded the reading.
    pub recorded_at: DateTime<Utc>,
}

/// One entry of the door-access join.
///
/// `person` and `access_point` come from outer joins and stay `None` for
/// orphaned foreign keys; they serialize as JSON `null`, never as a
/// placeholder string.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AccessLogEntry {
    /// When the access attempt happened.
    pub accessed_at: DateTime<Utc>,
    /// Whether access was granted.
    pub granted: bool,
    /// Name of the person, if the badge still maps to one.
    pub person: Option<String>,
    /// Name of the access point, if it still exists.
    pub access_point: Option<String>,
}

/// Login row from the primary store's `users` table.
#[derive(Debug, Clone)]
pub struct UserRecord {
    /// Unique username.
    pub username: String,
    /// Stored salted hash (`salt$digest` hex form).
    pub password_hash: String,
}
