use std::fs;
use std::path::Path;

use crate::error::{ProtoError, Result};

use super::root::ServerConfig;
use super::validator::validate_config;

/// Load and validate controller configuration from a TOML file (spec §5).
/// Missing fields fall back to `ServerConfig`'s per-field defaults.
pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<ServerConfig> {
    let text = fs::read_to_string(&path)
        .map_err(|e| ProtoError::Config(format!("failed to read config file: {e}")))?;
    let config: ServerConfig = toml::from_str(&text)
        .map_err(|e| ProtoError::Config(format!("failed to parse config: {e}")))?;

    validate_config(&config)?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_is_a_config_error() {
        let err = load_from_path("/nonexistent/path/to/controller.toml").unwrap_err();
        assert!(matches!(err, ProtoError::Config(_)));
    }

    #[test]
    fn empty_file_falls_back_to_defaults() {
        let dir = std::env::temp_dir();
        let path = dir.join("openflow-proto-test-empty-config.toml");
        fs::write(&path, "").unwrap();
        let config = load_from_path(&path).unwrap();
        assert_eq!(config.listen, ServerConfig::default().listen);
        fs::remove_file(&path).ok();
    }
}
