//! Broadcast hub: the concurrent-safe subscriber registry.
//!
//! [`BroadcastHub`] keeps every live subscriber behind a bounded
//! [`tokio::sync::mpsc`] channel and pushes each published [`Event`] to
//! all of them. Delivery is best-effort, at most once per subscriber per
//! publish: a full channel drops the event for that subscriber only, and
//! a closed channel removes the subscriber from the registry. Publishing
//! never blocks, so a slow viewer can never stall the poll loop or starve
//! the other viewers.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use tokio::sync::mpsc;
use uuid::Uuid;

use super::Event;

/// Unique identity of one live subscriber connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriberId(Uuid);

impl SubscriberId {
    fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl std::fmt::Display for SubscriberId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// Handle returned to a new subscriber: its identity plus the receiving
/// end of its event channel.
///
/// Dropping the receiver closes the channel; the hub removes the entry on
/// the next publish that observes it closed. Callers that can do so should
/// still call [`BroadcastHub::unsubscribe`] for prompt removal.
#[derive(Debug)]
pub struct Subscription {
    /// Identity of this subscriber in the registry.
    pub id: SubscriberId,
    /// Receiving end of the bounded event channel.
    pub rx: mpsc::Receiver<Event>,
}

/// Registry of live subscribers with best-effort fan-out.
///
/// # Concurrency
///
/// The registry is a `RwLock<HashMap>`: publishes take the read lock and
/// iterate, subscribe/unsubscribe take the write lock. A subscriber added
/// while a publish holds the read lock is not visible to that publish and
/// receives only subsequent events. A poisoned lock is recovered — the
/// map holds only channel handles, which no operation leaves half-mutated.
#[derive(Debug)]
pub struct BroadcastHub {
    subscribers: RwLock<HashMap<SubscriberId, mpsc::Sender<Event>>>,
    channel_capacity: usize,
}

impl BroadcastHub {
    /// Creates an empty hub. `channel_capacity` bounds each subscriber's
    /// queue; events beyond it are dropped for that subscriber.
    #[must_use]
    pub fn new(channel_capacity: usize) -> Self {
        Self {
            subscribers: RwLock::new(HashMap::new()),
            channel_capacity: channel_capacity.max(1),
        }
    }

    /// Registers a new subscriber, immediately eligible for all
    /// subsequent [`publish`](Self::publish) calls.
    #[must_use]
    pub fn subscribe(&self) -> Subscription {
        let id = SubscriberId::new();
        let (tx, rx) = mpsc::channel(self.channel_capacity);
        self.subscribers
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(id, tx);
        tracing::info!(subscriber = %id, "subscriber connected");
        Subscription { id, rx }
    }

    /// Removes a subscriber from the registry.
    ///
    /// Removing an already-removed subscriber is a no-op; a reconnecting
    /// client always gets a brand-new identity via
    /// [`subscribe`](Self::subscribe).
    pub fn unsubscribe(&self, id: SubscriberId) {
        let removed = self
            .subscribers
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&id)
            .is_some();
        if removed {
            tracing::info!(subscriber = %id, "subscriber disconnected");
        }
    }

    /// Delivers `event` to every currently connected subscriber.
    ///
    /// Returns the number of subscribers the event was handed to. A
    /// subscriber whose channel is full misses this event (logged at
    /// debug); one whose channel is closed is dropped from the registry.
    pub fn publish(&self, event: &Event) -> usize {
        let mut delivered = 0;
        let mut dead = Vec::new();

        {
            let map = self.subscribers.read().unwrap_or_else(PoisonError::into_inner);
            for (id, tx) in map.iter() {
                match tx.try_send(event.clone()) {
                    Ok(()) => delivered += 1,
                    Err(mpsc::error::TrySendError::Full(_)) => {
                        tracing::debug!(
                            subscriber = %id,
                            topic = %event.topic,
                            "subscriber queue full, event dropped"
                        );
                    }
                    Err(mpsc::error::TrySendError::Closed(_)) => dead.push(*id),
                }
            }
        }

        for id in dead {
            self.unsubscribe(id);
        }

        delivered
    }

    /// Returns the current number of registered subscribers.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.subscribers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::domain::Topic;

    fn make_event() -> Event {
        Event::new(
            Topic::NocTemperature,
            serde_json::json!({"value": 21.5, "timestamp": "2024-01-01T00:00:00Z"}),
        )
    }

    #[test]
    fn publish_without_subscribers_delivers_zero() {
        let hub = BroadcastHub::new(8);
        assert_eq!(hub.publish(&make_event()), 0);
    }

    #[tokio::test]
    async fn subscriber_receives_event() {
        let hub = BroadcastHub::new(8);
        let mut sub = hub.subscribe();

        assert_eq!(hub.publish(&make_event()), 1);

        let Some(event) = sub.rx.recv().await else {
            panic!("expected to receive event");
        };
        assert_eq!(event.topic, Topic::NocTemperature);
    }

    #[tokio::test]
    async fn all_subscribers_receive_same_event() {
        let hub = BroadcastHub::new(8);
        let mut a = hub.subscribe();
        let mut b = hub.subscribe();

        assert_eq!(hub.publish(&make_event()), 2);

        let Some(ea) = a.rx.recv().await else {
            panic!("a should receive");
        };
        let Some(eb) = b.rx.recv().await else {
            panic!("b should receive");
        };
        assert_eq!(ea.topic, eb.topic);
    }

    #[tokio::test]
    async fn late_subscriber_misses_earlier_events() {
        let hub = BroadcastHub::new(8);
        hub.publish(&make_event());

        let mut late = hub.subscribe();
        hub.publish(&make_event());

        let Some(_first) = late.rx.recv().await else {
            panic!("late subscriber should get the second event");
        };
        // Nothing else queued: only the post-subscribe event was delivered.
        assert!(late.rx.try_recv().is_err());
    }

    #[test]
    fn full_subscriber_drops_event_without_blocking_others() {
        let hub = BroadcastHub::new(1);
        let mut slow = hub.subscribe();
        let mut healthy = hub.subscribe();

        // First publish fills the slow subscriber's single-slot queue.
        assert_eq!(hub.publish(&make_event()), 2);
        // Second publish drops for the slow one, still reaches the other.
        assert_eq!(hub.publish(&make_event()), 1);

        assert!(slow.rx.try_recv().is_ok());
        assert!(healthy.rx.try_recv().is_ok());
        assert!(healthy.rx.try_recv().is_ok());
    }

    #[test]
    fn closed_subscriber_is_removed_on_publish() {
        let hub = BroadcastHub::new(8);
        let sub = hub.subscribe();
        assert_eq!(hub.subscriber_count(), 1);

        drop(sub);
        hub.publish(&make_event());
        assert_eq!(hub.subscriber_count(), 0);
    }

    #[tokio::test]
    async fn registry_survives_a_poisoned_lock() {
        let hub = std::sync::Arc::new(BroadcastHub::new(8));

        // Poison the registry lock by panicking while holding it.
        let poisoner = std::sync::Arc::clone(&hub);
        let result = std::thread::spawn(move || {
            let _guard = poisoner.subscribers.write();
            panic!("poison the registry");
        })
        .join();
        assert!(result.is_err());

        let mut sub = hub.subscribe();
        assert_eq!(hub.subscriber_count(), 1);
        assert_eq!(hub.publish(&make_event()), 1);
        let Some(event) = sub.rx.recv().await else {
            panic!("subscriber should still receive after poisoning");
        };
        assert_eq!(event.topic, Topic::NocTemperature);

        hub.unsubscribe(sub.id);
        assert_eq!(hub.subscriber_count(), 0);
    }

    #[test]
    fn unsubscribe_removes_and_is_idempotent() {
        let hub = BroadcastHub::new(8);
        let sub = hub.subscribe();
        assert_eq!(hub.subscriber_count(), 1);

        hub.unsubscribe(sub.id);
        assert_eq!(hub.subscriber_count(), 0);
        hub.unsubscribe(sub.id);
        assert_eq!(hub.subscriber_count(), 0);
    }
}
