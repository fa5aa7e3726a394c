//! Per-connection WebSocket loop.
//!
//! One subscriber per connection: `Connecting → Connected` on upgrade,
//! `Disconnected` (terminal) on close or transport error. A reconnecting
//! client gets a brand-new subscriber identity and simply receives the
//! next tick's events.

use std::sync::Arc;

use axum::extract::ws::{Message, WebSocket};
use futures_util::{SinkExt, StreamExt};

use super::messages::PushMessage;
use crate::domain::{BroadcastHub, Subscription};

/// Runs the read/write loop for a single WebSocket connection.
///
/// Forwards every hub event to the client as a [`PushMessage`]; any
/// transport error closes only this subscriber's channel. Viewers do not
/// send commands — inbound frames other than `Close` are ignored.
pub async fn run_connection(socket: WebSocket, subscription: Subscription, hub: Arc<BroadcastHub>) {
    let (mut ws_tx, mut ws_rx) = socket.split();
    let Subscription { id, mut rx } = subscription;

    loop {
        tokio::select! {
            // Inbound frame from the client
            msg = ws_rx.next() => {
                match msg {
                    Some(Ok(Message::Close(_))) | None => break,
                    Some(Err(e)) => {
                        tracing::debug!(subscriber = %id, error = %e, "ws receive error");
                        break;
                    }
                    _ => {}
                }
            }
            // Event from the hub
            event = rx.recv() => {
                match event {
                    Some(event) => {
                        let msg = PushMessage::from(event);
                        let json = serde_json::to_string(&msg).unwrap_or_default();
                        if let Err(e) = ws_tx.send(Message::text(json)).await {
                            tracing::debug!(subscriber = %id, error = %e, "ws send failed");
                            break;
                        }
                    }
                    // Hub side closed — we were already unsubscribed.
                    None => break,
                }
            }
        }
    }

    hub.unsubscribe(id);
}
