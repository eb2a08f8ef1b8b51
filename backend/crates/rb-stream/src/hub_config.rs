use std::time::Duration;

pub const DEFAULT_KEEP_ALIVE_INTERVAL: Duration = Duration::from_millis(5000);
pub const DEFAULT_MAX_CLIENTS: usize = 5;
pub const DEFAULT_SEND_BUFFER_SIZE: usize = 16;

/// Configuration captured when a hub is created
#[derive(Debug, Clone)]
pub struct HubConfig {
    /// Display label used in logs and metrics
    pub name: String,
    /// Idle time after which a session writes a keep-alive frame
    pub keep_alive_interval: Duration,
    /// Maximum concurrent subscribers
    pub max_clients: usize,
    /// Events buffered per session (bounded to handle slow clients)
    pub send_buffer_size: usize,
}

impl HubConfig {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_keep_alive_interval(mut self, interval: Duration) -> Self {
        self.keep_alive_interval = interval;
        self
    }

    pub fn with_max_clients(mut self, max_clients: usize) -> Self {
        self.max_clients = max_clients;
        self
    }

    pub fn with_send_buffer_size(mut self, size: usize) -> Self {
        self.send_buffer_size = size.max(1);
        self
    }
}

impl Default for HubConfig {
    fn default() -> Self {
        Self {
            name: String::from("Hub"),
            keep_alive_interval: DEFAULT_KEEP_ALIVE_INTERVAL,
            max_clients: DEFAULT_MAX_CLIENTS,
            send_buffer_size: DEFAULT_SEND_BUFFER_SIZE,
        }
    }
}
