//! Timer-driven poll loop.
//!
//! Every tick issues the fixed battery of five queries (four primary-store
//! tables, one access-store join), normalizes the results into events, and
//! hands them to the broadcast hub. Per-query failures are collected as
//! explicit results, logged uniformly, and suppressed — one failing table
//! never affects the other four or any future tick.
//!
//! Ticks are serialized: the loop awaits a whole tick before sleeping for
//! the next one, so an overrunning tick delays its successor rather than
//! overlapping it, and the connection pool can never be starved by
//! stacked ticks.

pub mod normalize;

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use crate::db::models::{AccessLogEntry, SensorRow};
use crate::db::{Databases, queries};
use crate::domain::{BroadcastHub, Event, Topic};
use crate::error::GatewayError;

/// One suppressed per-tick query failure.
#[derive(Debug)]
pub struct QueryFailure {
    /// Which of the five queries failed.
    pub query: &'static str,
    /// The underlying error.
    pub error: GatewayError,
}

/// The periodic poll-and-broadcast task.
#[derive(Debug)]
pub struct Poller {
    db: Databases,
    hub: Arc<BroadcastHub>,
    interval: Duration,
}

impl Poller {
    /// Creates a poller over the given stores and hub.
    #[must_use]
    pub const fn new(db: Databases, hub: Arc<BroadcastHub>, interval: Duration) -> Self {
        Self { db, hub, interval }
    }

    /// Starts the repeating tick loop on the runtime.
    ///
    /// The returned handle aborts the loop when dropped or aborted; the
    /// process ties it to its shutdown signal.
    #[must_use]
    pub fn spawn(self) -> JoinHandle<()> {
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(self.interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            tracing::info!(interval_secs = self.interval.as_secs(), "poller started");
            loop {
                ticker.tick().await;
                self.tick().await;
            }
        })
    }

    /// Runs exactly one tick: five concurrent queries, normalization,
    /// fan-out. Public so tests can drive ticks deterministically.
    pub async fn tick(&self) {
        let (noc, ups, electrical, fire_smoke, access) = tokio::join!(
            queries::latest_noc_sensor(&self.db.primary),
            queries::latest_ups_sensor(&self.db.primary),
            queries::latest_electrical(&self.db.primary),
            queries::latest_fire_smoke(&self.db.primary),
            queries::recent_access_entries(&self.db.access),
        );

        let (events, failures) = assemble_tick(noc, ups, electrical, fire_smoke, access);

        for failure in &failures {
            tracing::warn!(
                query = failure.query,
                error = %failure.error,
                "poll query failed; suppressed until next tick"
            );
        }

        for event in &events {
            let delivered = self.hub.publish(event);
            tracing::trace!(topic = %event.topic, delivered, "event broadcast");
        }
    }
}

/// Pure per-tick assembly: turns the five query results into events and
/// failures. A failed query contributes a [`QueryFailure`] without
/// touching any other query's events; an empty result contributes
/// nothing at all.
#[must_use]
pub fn assemble_tick(
    noc: Result<Option<SensorRow>, GatewayError>,
    ups: Result<Option<SensorRow>, GatewayError>,
    electrical: Result<Option<serde_json::Value>, GatewayError>,
    fire_smoke: Result<Option<serde_json::Value>, GatewayError>,
    access: Result<Vec<AccessLogEntry>, GatewayError>,
) -> (Vec<Event>, Vec<QueryFailure>) {
    let mut events = Vec::new();
    let mut failures = Vec::new();

    match noc {
        Ok(Some(row)) => events.extend(normalize::sensor_events(
            Topic::NocTemperature,
            Topic::NocHumidity,
            &row,
        )),
        Ok(None) => {}
        Err(error) => failures.push(QueryFailure {
            query: "noc_sensors",
            error,
        }),
    }

    match ups {
        Ok(Some(row)) => events.extend(normalize::sensor_events(
            Topic::UpsTemperature,
            Topic::UpsHumidity,
            &row,
        )),
        Ok(None) => {}
        Err(error) => failures.push(QueryFailure {
            query: "ups_sensors",
            error,
        }),
    }

    match electrical {
        Ok(Some(row)) => events.push(normalize::verbatim_event(Topic::ElectricalData, row)),
        Ok(None) => {}
        Err(error) => failures.push(QueryFailure {
            query: "electrical_readings",
            error,
        }),
    }

    match fire_smoke {
        Ok(Some(row)) => events.push(normalize::verbatim_event(Topic::FireSmokeData, row)),
        Ok(None) => {}
        Err(error) => failures.push(QueryFailure {
            query: "fire_smoke_readings",
            error,
        }),
    }

    match access {
        Ok(entries) if !entries.is_empty() => events.push(normalize::access_log_event(&entries)),
        Ok(_) => {}
        Err(error) => failures.push(QueryFailure {
            query: "access_events",
            error,
        }),
    }

    (events, failures)
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use chrono::DateTime;

    fn sensor_row() -> SensorRow {
        SensorRow {
            temperature: "21.5".to_string(),
            humidity: "48".to_string(),
            recorded_at: DateTime::from_timestamp(1_700_000_000, 0).unwrap_or_default(),
        }
    }

    fn entry() -> AccessLogEntry {
        AccessLogEntry {
            accessed_at: DateTime::from_timestamp(1_700_000_000, 0).unwrap_or_default(),
            granted: true,
            person: Some("dana".to_string()),
            access_point: Some("noc-door".to_string()),
        }
    }

    fn db_error() -> GatewayError {
        GatewayError::Database(sqlx::Error::PoolClosed)
    }

    #[test]
    fn full_tick_yields_seven_events() {
        let (events, failures) = assemble_tick(
            Ok(Some(sensor_row())),
            Ok(Some(sensor_row())),
            Ok(Some(serde_json::json!({"load_kw": 12.4}))),
            Ok(Some(serde_json::json!({"smoke": false}))),
            Ok(vec![entry()]),
        );

        assert_eq!(events.len(), 7);
        assert!(failures.is_empty());
    }

    #[test]
    fn one_failure_does_not_suppress_the_other_queries() {
        let (events, failures) = assemble_tick(
            Err(db_error()),
            Ok(Some(sensor_row())),
            Ok(Some(serde_json::json!({"load_kw": 12.4}))),
            Ok(Some(serde_json::json!({"smoke": false}))),
            Ok(vec![entry()]),
        );

        // ups pair + electrical + fire + access
        assert_eq!(events.len(), 5);
        assert_eq!(failures.len(), 1);
        assert_eq!(failures.first().map(|f| f.query), Some("noc_sensors"));
        assert!(events.iter().all(|e| e.topic != Topic::NocTemperature));
        assert!(events.iter().any(|e| e.topic == Topic::UpsTemperature));
        assert!(events.iter().any(|e| e.topic == Topic::AccessLogs));
    }

    #[test]
    fn empty_results_yield_no_events_and_no_failures() {
        let (events, failures) = assemble_tick(Ok(None), Ok(None), Ok(None), Ok(None), Ok(vec![]));
        assert!(events.is_empty());
        assert!(failures.is_empty());
    }

    #[test]
    fn all_queries_failing_is_still_not_fatal() {
        let (events, failures) = assemble_tick(
            Err(db_error()),
            Err(db_error()),
            Err(db_error()),
            Err(db_error()),
            Err(db_error()),
        );
        assert!(events.is_empty());
        assert_eq!(failures.len(), 5);
    }
}
