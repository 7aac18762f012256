use std::net::SocketAddr;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::mpsc;

use crate::codec::encode_cs;
use crate::error::{ProtoError, Result};
use crate::model::{CSMessage, TransactionId};

pub type ConnectionId = u64;

struct ConnectionEntry {
    remote_addr: SocketAddr,
    /// Frames queued here are written out by the connection's own write
    /// task, in enqueue order (spec §5: "outbound writes are FIFO in
    /// enqueue order").
    outbound: mpsc::UnboundedSender<Vec<u8>>,
}

/// The set of live connections, shared across the accept loop and every
/// connection task. A concurrent map keyed by connection id gives O(1)
/// insert/remove and safe iteration for broadcast/shutdown without a global
/// lock on the hot path (spec §5, §9) — the same shape as a DNS cache
/// keyed by hostname, just keyed by connection id here.
#[derive(Default)]
pub struct ConnectionRegistry {
    entries: DashMap<ConnectionId, ConnectionEntry>,
    next_id: AtomicU64,
}

impl ConnectionRegistry {
    pub fn new() -> Self {
        ConnectionRegistry::default()
    }

    pub fn register(
        &self,
        remote_addr: SocketAddr,
        outbound: mpsc::UnboundedSender<Vec<u8>>,
    ) -> ConnectionId {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        self.entries.insert(id, ConnectionEntry { remote_addr, outbound });
        id
    }

    pub fn remove(&self, id: ConnectionId) {
        self.entries.remove(&id);
    }

    pub fn remote_addr(&self, id: ConnectionId) -> Option<SocketAddr> {
        self.entries.get(&id).map(|e| e.remote_addr)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Enqueue a raw framed message for connection `id`'s write task.
    fn enqueue(&self, id: ConnectionId, frame: Vec<u8>) -> Result<()> {
        let entry = self
            .entries
            .get(&id)
            .ok_or_else(|| ProtoError::Io(std::io::Error::other(format!("unknown connection {id}"))))?;
        entry
            .outbound
            .send(frame)
            .map_err(|_| ProtoError::Io(std::io::Error::other("connection write task gone")))
    }

    /// Ask every live connection's write task to drain and close, used
    /// during graceful shutdown (spec §4.6, §5).
    pub fn connection_ids(&self) -> Vec<ConnectionId> {
        self.entries.iter().map(|e| *e.key()).collect()
    }
}

/// Handed to a `Handler` so it can address a specific connection without
/// holding the registry itself (spec §4.6: "a per-connection send
/// operation that the handler uses to emit `CSMessage`s").
#[derive(Clone)]
pub struct ConnectionHandle {
    pub id: ConnectionId,
    registry: Arc<ConnectionRegistry>,
}

impl ConnectionHandle {
    pub(crate) fn new(id: ConnectionId, registry: Arc<ConnectionRegistry>) -> Self {
        ConnectionHandle { id, registry }
    }

    pub fn remote_addr(&self) -> Option<SocketAddr> {
        self.registry.remote_addr(self.id)
    }

    /// Serialize, frame, and enqueue a controller→switch message for
    /// delivery on this connection (spec §4.6).
    pub fn send(&self, xid: TransactionId, message: &CSMessage) -> Result<()> {
        let frame = encode_cs(xid, message);
        self.registry.enqueue(self.id, frame)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn register_and_remove_tracks_live_connections() {
        let registry = ConnectionRegistry::new();
        let (tx, _rx) = mpsc::unbounded_channel();
        let id = registry.register("127.0.0.1:1".parse().unwrap(), tx);
        assert_eq!(registry.len(), 1);
        assert!(registry.remote_addr(id).is_some());
        registry.remove(id);
        assert!(registry.is_empty());
    }

    #[test]
    fn handle_send_enqueues_encoded_frame() {
        let registry = Arc::new(ConnectionRegistry::new());
        let (tx, mut rx) = mpsc::unbounded_channel();
        let id = registry.register("127.0.0.1:1".parse().unwrap(), tx);
        let handle = ConnectionHandle::new(id, registry);

        handle.send(1, &CSMessage::BarrierRequest).unwrap();
        let frame = rx.try_recv().unwrap();
        assert_eq!(frame[1], 18);
    }
}
