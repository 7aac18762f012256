use crate::error::{ProtoError, Result};

use super::root::ServerConfig;

pub fn validate_config(config: &ServerConfig) -> Result<()> {
    if config.max_connections == Some(0) {
        return Err(ProtoError::Config("max_connections must be at least 1 when set".into()));
    }
    if config.timeouts.idle_ms == 0 {
        return Err(ProtoError::Config("timeouts.idle_ms must be at least 1".into()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_zero_max_connections() {
        let config = ServerConfig { max_connections: Some(0), ..ServerConfig::default() };
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn accepts_defaults() {
        assert!(validate_config(&ServerConfig::default()).is_ok());
    }
}
