use crate::{ConfigError, ConfigErrorResult};

use serde::Deserialize;

// Keep-alive interval constraints (milliseconds)
pub const MIN_KEEP_ALIVE_INTERVAL_MS: u64 = 100;
pub const MAX_KEEP_ALIVE_INTERVAL_MS: u64 = 300_000;
pub const DEFAULT_KEEP_ALIVE_INTERVAL_MS: u64 = 5000;

// Subscriber cap per event stream
pub const MIN_MAX_CLIENTS: usize = 1;
pub const MAX_MAX_CLIENTS: usize = 1000;
pub const DEFAULT_MAX_CLIENTS: usize = 5;

// Frames buffered per session before a slow client starts missing events
pub const MIN_SEND_BUFFER_SIZE: usize = 1;
pub const MAX_SEND_BUFFER_SIZE: usize = 10000;
pub const DEFAULT_SEND_BUFFER_SIZE: usize = 16;

/// Settings shared by the state, attributes and map event streams.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StreamConfig {
    pub keep_alive_interval_ms: u64,
    pub max_clients: usize,
    pub send_buffer_size: usize,
}

impl Default for StreamConfig {
    fn default() -> Self {
        Self {
            keep_alive_interval_ms: DEFAULT_KEEP_ALIVE_INTERVAL_MS,
            max_clients: DEFAULT_MAX_CLIENTS,
            send_buffer_size: DEFAULT_SEND_BUFFER_SIZE,
        }
    }
}

impl StreamConfig {
    /// Validate all fields are within acceptable ranges.
    pub fn validate(&self) -> ConfigErrorResult<()> {
        if self.keep_alive_interval_ms < MIN_KEEP_ALIVE_INTERVAL_MS
            || self.keep_alive_interval_ms > MAX_KEEP_ALIVE_INTERVAL_MS
        {
            return Err(ConfigError::stream(format!(
                "streams.keep_alive_interval_ms must be {}-{}, got {}",
                MIN_KEEP_ALIVE_INTERVAL_MS, MAX_KEEP_ALIVE_INTERVAL_MS, self.keep_alive_interval_ms
            )));
        }

        if self.max_clients < MIN_MAX_CLIENTS || self.max_clients > MAX_MAX_CLIENTS {
            return Err(ConfigError::stream(format!(
                "streams.max_clients must be {}-{}, got {}",
                MIN_MAX_CLIENTS, MAX_MAX_CLIENTS, self.max_clients
            )));
        }

        if self.send_buffer_size < MIN_SEND_BUFFER_SIZE
            || self.send_buffer_size > MAX_SEND_BUFFER_SIZE
        {
            return Err(ConfigError::stream(format!(
                "streams.send_buffer_size must be {}-{}, got {}",
                MIN_SEND_BUFFER_SIZE, MAX_SEND_BUFFER_SIZE, self.send_buffer_size
            )));
        }

        Ok(())
    }
}
