//! Domain layer: event topics, the event value object, and the
//! broadcast hub that fans events out to connected subscribers.

pub mod event;
pub mod hub;
pub mod topic;

pub use event::Event;
pub use hub::{BroadcastHub, SubscriberId, Subscription};
pub use topic::Topic;
