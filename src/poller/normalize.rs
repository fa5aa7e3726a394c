//! Event normalizer: maps raw rows into typed, named events.
//!
//! Normalization is pure and never fails. Malformed numeric fields
//! degrade to a NaN sentinel (JSON `null` on the wire) so the event is
//! still emitted and consumers keep their liveness signal — a late event
//! with bad data is distinguishable from no event at all.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::db::models::{AccessLogEntry, SensorRow};
use crate::domain::{Event, Topic};

/// Payload of a single-metric sensor event.
#[derive(Debug, Clone, Serialize)]
pub struct Reading {
    /// Parsed metric value; NaN when the stored form was not numeric.
    pub value: f64,
    /// Timestamp of the originating row, never emission time.
    pub timestamp: DateTime<Utc>,
}

/// Parses a stored sensor value, degrading to NaN instead of failing.
#[must_use]
pub fn parse_reading(raw: &str) -> f64 {
    raw.trim().parse().unwrap_or(f64::NAN)
}

/// Expands one sensor row into its temperature and humidity events.
#[must_use]
pub fn sensor_events(temperature: Topic, humidity: Topic, row: &SensorRow) -> [Event; 2] {
    let make = |topic: Topic, raw: &str| {
        let reading = Reading {
            value: parse_reading(raw),
            timestamp: row.recorded_at,
        };
        Event::new(topic, serde_json::to_value(reading).unwrap_or_default())
    };
    [
        make(temperature, &row.temperature),
        make(humidity, &row.humidity),
    ]
}

/// Wraps a verbatim row (already JSON) in its topic.
#[must_use]
pub const fn verbatim_event(topic: Topic, row: serde_json::Value) -> Event {
    Event::new(topic, row)
}

/// Wraps the ordered access-log list in its topic.
#[must_use]
pub fn access_log_event(entries: &[AccessLogEntry]) -> Event {
    Event::new(
        Topic::AccessLogs,
        serde_json::to_value(entries).unwrap_or_default(),
    )
}
