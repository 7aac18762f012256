use serde::Deserialize;

fn default_level() -> String {
    "info".to_string()
}

/// Logging knobs read at process start (spec §9 ambient stack: logging).
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Base `tracing` filter directive, overridable by `RUST_LOG`.
    #[serde(default = "default_level")]
    pub level: String,

    /// Whether log lines include the emitting module path.
    #[serde(default)]
    pub show_target: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig { level: default_level(), show_target: false }
    }
}
