pub mod connection;
pub mod handler;
pub mod metrics;
pub mod registry;

use std::sync::Arc;

use tokio::net::TcpListener;
use tokio::sync::watch;
use tracing::{info, warn};

use crate::config::ServerConfig;
use crate::error::ErrorCounters;

pub use handler::{Handler, LoggingHandler};
pub use metrics::{ConnectionCount, ConnectionSnapshot};
pub use registry::{ConnectionHandle, ConnectionId, ConnectionRegistry};

/// Accepts switch connections and spawns a `connection::run` task for each
/// one, the same shape as the teacher's TCP accept loop: a `tokio::select!`
/// race between `listener.accept()` and a shutdown watch channel, with a
/// `max_connections` gate before the per-connection task is spawned (spec
/// §4.6, §5).
pub struct OpenFlowServer {
    config: Arc<ServerConfig>,
    registry: Arc<ConnectionRegistry>,
    connections: Arc<ConnectionCount>,
    errors: Arc<ErrorCounters>,
    handler: Arc<dyn Handler>,
}

impl OpenFlowServer {
    pub fn new(config: ServerConfig, handler: Arc<dyn Handler>) -> Self {
        OpenFlowServer {
            config: Arc::new(config),
            registry: Arc::new(ConnectionRegistry::new()),
            connections: Arc::new(ConnectionCount::default()),
            errors: Arc::new(ErrorCounters::new()),
            handler,
        }
    }

    pub fn connections(&self) -> Arc<ConnectionCount> {
        Arc::clone(&self.connections)
    }

    pub fn errors(&self) -> Arc<ErrorCounters> {
        Arc::clone(&self.errors)
    }

    pub fn registry(&self) -> Arc<ConnectionRegistry> {
        Arc::clone(&self.registry)
    }

    /// Bind `config.listen` and run the accept loop until `shutdown`
    /// reports `true`. Each accepted switch gets its own task running the
    /// handshake and read/dispatch loop in `connection::run`.
    pub async fn run(&self, shutdown: &mut watch::Receiver<bool>) -> std::io::Result<()> {
        let listener = TcpListener::bind(self.config.listen).await?;
        info!(addr = %self.config.listen, "listening for switch connections");

        loop {
            let accept_fut = listener.accept();
            let result = tokio::select! {
                res = accept_fut => res,
                res = shutdown.changed() => {
                    if res.is_ok() && *shutdown.borrow() {
                        info!("shutdown signal received, stopping accept loop");
                        break;
                    } else {
                        continue;
                    }
                }
            };

            let (stream, remote_addr) = match result {
                Ok(pair) => pair,
                Err(err) => {
                    warn!(error = %err, "failed to accept connection");
                    continue;
                }
            };

            if let Some(max) = self.config.max_connections {
                if self.connections.current() >= max {
                    warn!(%remote_addr, max, "connection limit reached, dropping");
                    continue;
                }
            }

            self.connections.increment();
            info!(%remote_addr, current = self.connections.current(), total = self.connections.total(), "accepted connection");

            let registry = Arc::clone(&self.registry);
            let counts = Arc::clone(&self.connections);
            let errors = Arc::clone(&self.errors);
            let handler = Arc::clone(&self.handler);
            let config = Arc::clone(&self.config);

            tokio::spawn(async move {
                connection::run(stream, remote_addr, registry, Arc::clone(&counts), errors, handler, config)
                    .await;
                counts.decrement();
            });
        }

        self.drain().await;
        Ok(())
    }

    /// Wait up to `config.timeouts.shutdown` for in-flight connections to
    /// close on their own before returning, so graceful shutdown doesn't
    /// hang indefinitely on a stuck switch (spec §5).
    async fn drain(&self) {
        let deadline = tokio::time::Instant::now() + self.config.timeouts.shutdown();
        while tokio::time::Instant::now() < deadline && !self.registry.is_empty() {
            tokio::time::sleep(std::time::Duration::from_millis(50)).await;
        }
        if !self.registry.is_empty() {
            warn!(remaining = self.registry.len(), "shutdown timeout elapsed with connections still open");
        }
    }
}
