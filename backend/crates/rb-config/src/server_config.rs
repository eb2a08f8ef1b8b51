use crate::{
    ConfigError, ConfigErrorResult, DEFAULT_API_PREFIX, DEFAULT_HOST, DEFAULT_PORT, MIN_PORT,
};

use std::time::Duration;

use serde::Deserialize;

// Time open connections get to finish after shutdown before they are cut
pub const DEFAULT_SHUTDOWN_GRACE_MS: u64 = 5000;
pub const MAX_SHUTDOWN_GRACE_MS: u64 = 60_000;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Path the robot routes are nested under
    pub api_prefix: String,
    pub shutdown_grace_ms: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: String::from(DEFAULT_HOST),
            port: DEFAULT_PORT,
            api_prefix: String::from(DEFAULT_API_PREFIX),
            shutdown_grace_ms: DEFAULT_SHUTDOWN_GRACE_MS,
        }
    }
}

impl ServerConfig {
    pub fn shutdown_grace(&self) -> Duration {
        Duration::from_millis(self.shutdown_grace_ms)
    }

    pub fn validate(&self) -> ConfigErrorResult<()> {
        // Port 0 means "auto-assign" - OS picks an available port.
        if self.port != 0 && self.port < MIN_PORT {
            return Err(ConfigError::server(format!(
                "server.port must be 0 (auto) or >= {}, got {}",
                MIN_PORT, self.port
            )));
        }

        if !self.api_prefix.starts_with('/') || self.api_prefix.ends_with('/') {
            return Err(ConfigError::server(format!(
                "server.api_prefix must start with '/' and not end with '/', got '{}'",
                self.api_prefix
            )));
        }

        if self.shutdown_grace_ms > MAX_SHUTDOWN_GRACE_MS {
            return Err(ConfigError::server(format!(
                "server.shutdown_grace_ms must be 0-{}, got {}",
                MAX_SHUTDOWN_GRACE_MS, self.shutdown_grace_ms
            )));
        }

        Ok(())
    }
}
