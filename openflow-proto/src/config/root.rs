use std::net::SocketAddr;

use serde::Deserialize;

use super::logging::LoggingConfig;
use super::timeout::TimeoutConfig;

fn default_listen() -> SocketAddr {
    "0.0.0.0:6633".parse().expect("valid default listen address")
}

/// Top-level controller configuration (spec §5, §9 ambient stack). The
/// `[server]`-less flat shape mirrors the teacher's single `Config` root
/// deserialized straight from the TOML document.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_listen")]
    pub listen: SocketAddr,

    /// Connections beyond this count are refused at accept time. `None`
    /// means unbounded, the same convention as the teacher's
    /// `Config::max_connections`.
    #[serde(default)]
    pub max_connections: Option<usize>,

    #[serde(default)]
    pub timeouts: TimeoutConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            listen: default_listen(),
            max_connections: None,
            timeouts: TimeoutConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}
