//! Push message envelope shared by both transports.

use serde::Serialize;

use crate::domain::Event;

/// The envelope a viewer receives for every broadcast event.
#[derive(Debug, Clone, Serialize)]
pub struct PushMessage {
    /// Topic wire name (e.g. `noc_temperature`).
    pub event: &'static str,
    /// Topic-specific payload; timestamps inside come from the
    /// originating row.
    pub data: serde_json::Value,
}

impl From<Event> for PushMessage {
    fn from(event: Event) -> Self {
        Self {
            event: event.topic.as_str(),
            data: event.payload,
        }
    }
}
