//! The unit of broadcast: a topic plus its payload.

use serde::Serialize;

use super::Topic;

/// A normalized event ready for fan-out.
///
/// The payload always carries a timestamp sourced from the originating
/// database row, never wall-clock time at emission, so consumers can
/// detect staleness.
#[derive(Debug, Clone, Serialize)]
pub struct Event {
    /// Topic this event belongs to.
    pub topic: Topic,
    /// Topic-specific payload.
    pub payload: serde_json::Value,
}

impl Event {
    /// Creates a new event.
    #[must_use]
    pub const fn new(topic: Topic, payload: serde_json::Value) -> Self {
        Self { topic, payload }
    }
}
