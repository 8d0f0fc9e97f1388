//! Live notification registry
//!
//! Owns the connection-id → sender map for the voucher broadcast
//! channel. Connections register on WebSocket upgrade and unregister
//! when their socket task ends; broadcast is fire-and-forget and never
//! blocks the sender. Settlement does not go through here.

use std::sync::Arc;

use dashmap::DashMap;
use shared::message::{NotifyEvent, NotifyMessage};
use tokio::sync::mpsc;

type ConnectionSender = mpsc::UnboundedSender<NotifyMessage>;

#[derive(Clone, Default)]
pub struct NotifyService {
    connections: Arc<DashMap<String, ConnectionSender>>,
}

impl NotifyService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a live connection; the returned receiver feeds the socket
    /// write loop.
    pub fn register(&self, connection_id: String) -> mpsc::UnboundedReceiver<NotifyMessage> {
        let (tx, rx) = mpsc::unbounded_channel();
        self.connections.insert(connection_id, tx);
        rx
    }

    pub fn unregister(&self, connection_id: &str) {
        self.connections.remove(connection_id);
    }

    /// Broadcast an event to every live connection. Dead connections are
    /// dropped from the registry as they are discovered.
    pub fn broadcast<T: serde::Serialize>(&self, event: NotifyEvent, payload: &T) {
        let message = match NotifyMessage::new(event, payload) {
            Ok(message) => message,
            Err(e) => {
                tracing::error!(error = %e, %event, "failed to serialize notification");
                return;
            }
        };

        let mut dead = Vec::new();
        for entry in self.connections.iter() {
            if entry.value().send(message.clone()).is_err() {
                dead.push(entry.key().clone());
            }
        }
        for id in dead {
            self.connections.remove(&id);
        }

        tracing::debug!(%event, recipients = self.connections.len(), "notification broadcast");
    }

    pub fn connection_count(&self) -> usize {
        self.connections.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(serde::Serialize)]
    struct Payload {
        code: String,
    }

    #[tokio::test]
    async fn broadcast_reaches_registered_connections() {
        let service = NotifyService::new();
        let mut rx = service.register("conn-1".into());

        service.broadcast(
            NotifyEvent::VoucherCreated,
            &Payload {
                code: "SAVE10".into(),
            },
        );

        let message = rx.recv().await.unwrap();
        assert_eq!(message.event, NotifyEvent::VoucherCreated);
        assert_eq!(message.payload["code"], "SAVE10");
    }

    #[tokio::test]
    async fn dropped_receiver_is_pruned() {
        let service = NotifyService::new();
        let rx = service.register("conn-1".into());
        assert_eq!(service.connection_count(), 1);

        drop(rx);
        service.broadcast(NotifyEvent::VoucherCreated, &Payload { code: "X".into() });
        assert_eq!(service.connection_count(), 0);
    }

    #[tokio::test]
    async fn unregister_removes_connection() {
        let service = NotifyService::new();
        let _rx = service.register("conn-1".into());
        service.unregister("conn-1");
        assert_eq!(service.connection_count(), 0);
    }
}
