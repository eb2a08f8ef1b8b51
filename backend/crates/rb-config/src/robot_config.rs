use crate::{ConfigError, ConfigErrorResult};

use serde::Deserialize;

pub const MIN_SIMULATE_INTERVAL_MS: u64 = 100;

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RobotConfig {
    /// Interval between simulated mock robot updates (0 = disabled)
    pub simulate_interval_ms: u64,
}

impl RobotConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        if self.simulate_interval_ms != 0 && self.simulate_interval_ms < MIN_SIMULATE_INTERVAL_MS {
            return Err(ConfigError::config(format!(
                "robot.simulate_interval_ms must be 0 (disabled) or >= {}, got {}",
                MIN_SIMULATE_INTERVAL_MS, self.simulate_interval_ms
            )));
        }

        Ok(())
    }
}
