use std::time::Duration;

use serde::Deserialize;

fn default_handshake_ms() -> u64 {
    5_000
}

fn default_idle_ms() -> u64 {
    30_000
}

fn default_shutdown_secs() -> u64 {
    5
}

/// Timing knobs for one connection's lifecycle (spec §4.6, §5): how long
/// the handshake may take, how long a connection may sit idle between
/// frames, and how long graceful shutdown waits for connections to drain.
#[derive(Debug, Clone, Deserialize)]
pub struct TimeoutConfig {
    #[serde(default = "default_handshake_ms")]
    pub handshake_ms: u64,

    #[serde(default = "default_idle_ms")]
    pub idle_ms: u64,

    #[serde(default = "default_shutdown_secs")]
    pub shutdown_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        TimeoutConfig {
            handshake_ms: default_handshake_ms(),
            idle_ms: default_idle_ms(),
            shutdown_secs: default_shutdown_secs(),
        }
    }
}

impl TimeoutConfig {
    pub fn handshake(&self) -> Duration {
        Duration::from_millis(self.handshake_ms)
    }

    pub fn idle(&self) -> Duration {
        Duration::from_millis(self.idle_ms)
    }

    pub fn shutdown(&self) -> Duration {
        Duration::from_secs(self.shutdown_secs)
    }
}
