use crate::{ConfigError, ConfigErrorResult};

use serde::Deserialize;

pub const DEFAULT_IMAGE_SEND_BUFFER_SIZE: usize = 4;
pub const MAX_IMAGE_SEND_BUFFER_SIZE: usize = 100;

/// Settings for the multipart map image stream.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ImageStreamConfig {
    /// 0 leaves the stream uncapped
    pub max_clients: usize,
    pub send_buffer_size: usize,
}

impl Default for ImageStreamConfig {
    fn default() -> Self {
        Self {
            max_clients: 0,
            send_buffer_size: DEFAULT_IMAGE_SEND_BUFFER_SIZE,
        }
    }
}

impl ImageStreamConfig {
    pub fn max_clients(&self) -> Option<usize> {
        (self.max_clients > 0).then_some(self.max_clients)
    }

    pub fn validate(&self) -> ConfigErrorResult<()> {
        if self.send_buffer_size == 0 || self.send_buffer_size > MAX_IMAGE_SEND_BUFFER_SIZE {
            return Err(ConfigError::stream(format!(
                "image_stream.send_buffer_size must be 1-{}, got {}",
                MAX_IMAGE_SEND_BUFFER_SIZE, self.send_buffer_size
            )));
        }

        Ok(())
    }
}
