use std::future::Future;
use std::pin::Pin;

use tracing::info;

use crate::model::{SCMessage, TransactionId};

use super::registry::ConnectionHandle;

/// What the server hands decoded switch→controller messages to (spec §4.6,
/// §6: "a function receiving `(connection_handle, TransactionID,
/// SCMessage)`"). Boxed-future return rather than an `async fn` in the
/// trait so the server can hold `Arc<dyn Handler>` and invoke it across
/// connections without knowing the concrete handler type.
pub trait Handler: Send + Sync {
    fn handle(
        &self,
        conn: ConnectionHandle,
        xid: TransactionId,
        message: SCMessage,
    ) -> Pin<Box<dyn Future<Output = ()> + Send>>;
}

/// A minimal handler that only logs what it receives. Useful for smoke
/// tests and as the default wired up by the controller binary; real
/// controller logic (learning hub, flooding, topology) is an external
/// collaborator per the scope note in the system overview.
pub struct LoggingHandler;

impl Handler for LoggingHandler {
    fn handle(
        &self,
        conn: ConnectionHandle,
        xid: TransactionId,
        message: SCMessage,
    ) -> Pin<Box<dyn Future<Output = ()> + Send>> {
        Box::pin(async move {
            info!(remote = ?conn.remote_addr(), xid, ?message, "received switch message");
        })
    }
}
