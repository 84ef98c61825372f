use std::collections::HashMap;

use axum::body::Bytes;
use axum::extract::ws::Message;
use tokio::sync::{mpsc, RwLock};

/// Channel sender half for pushing messages to a WebSocket connection.
pub type WsSender = mpsc::UnboundedSender<Message>;

/// Manages all live dashboard connections.
///
/// Thread-safe via interior `RwLock`; designed to be wrapped in `Arc` and
/// shared across the application. Each connection owns an unbounded mpsc
/// channel, so messages to a single viewer stay FIFO and a slow viewer
/// never blocks the broadcast caller.
pub struct WsManager {
    connections: RwLock<HashMap<String, WsSender>>,
}

impl WsManager {
    /// Create a new, empty connection manager.
    pub fn new() -> Self {
        Self {
            connections: RwLock::new(HashMap::new()),
        }
    }

    /// Register a new connection.
    ///
    /// Returns the receiver half of the message channel so the caller can
    /// forward messages to the WebSocket sink.
    pub async fn add(&self, conn_id: String) -> mpsc::UnboundedReceiver<Message> {
        let (tx, rx) = mpsc::unbounded_channel();
        self.connections.write().await.insert(conn_id, tx);
        rx
    }

    /// Remove a connection by its ID.
    pub async fn remove(&self, conn_id: &str) {
        self.connections.write().await.remove(conn_id);
    }

    /// Broadcast a message to all connected viewers.
    ///
    /// Delivery to each viewer is independent: a connection whose channel
    /// is closed is pruned from the live set and never affects delivery to
    /// the others. The failure stays here -- it is not surfaced to the
    /// caller.
    pub async fn broadcast(&self, message: Message) {
        let mut dead: Vec<String> = Vec::new();
        {
            let conns = self.connections.read().await;
            for (conn_id, sender) in conns.iter() {
                if sender.send(message.clone()).is_err() {
                    dead.push(conn_id.clone());
                }
            }
        }

        if !dead.is_empty() {
            let mut conns = self.connections.write().await;
            for conn_id in &dead {
                conns.remove(conn_id);
            }
            tracing::debug!(pruned = dead.len(), "Removed dead dashboard connections");
        }
    }

    /// Return the current number of live connections.
    pub async fn connection_count(&self) -> usize {
        self.connections.read().await.len()
    }

    /// Send a Ping frame to every connected viewer.
    ///
    /// Used by the heartbeat task to keep connections alive and detect
    /// stale ones.
    pub async fn ping_all(&self) {
        let conns = self.connections.read().await;
        for sender in conns.values() {
            let _ = sender.send(Message::Ping(Bytes::new()));
        }
    }

    /// Send a Close frame to every connection, then clear the map.
    ///
    /// Used during graceful shutdown to notify all viewers before the
    /// server stops accepting new connections.
    pub async fn shutdown_all(&self) {
        let mut conns = self.connections.write().await;
        let count = conns.len();
        for sender in conns.values() {
            let _ = sender.send(Message::Close(None));
        }
        conns.clear();
        tracing::info!(count, "Closed all WebSocket connections");
    }
}

impl Default for WsManager {
    fn default() -> Self {
        Self::new()
    }
}
