mod config;
mod error;
mod image_stream_config;
mod log_level;
mod logging_config;
mod robot_config;
mod server_config;
mod stream_config;

#[cfg(test)]
mod tests;

pub use config::Config;
pub use error::{ConfigError, ConfigErrorResult};
pub use image_stream_config::ImageStreamConfig;
pub use log_level::LogLevel;
pub use logging_config::LoggingConfig;
pub use robot_config::RobotConfig;
pub use server_config::ServerConfig;
pub use stream_config::StreamConfig;

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 8000;
const MIN_PORT: u16 = 1024;
const DEFAULT_API_PREFIX: &str = "/api/v2/robot";
const DEFAULT_LOG_LEVEL_STRING: &str = "info";
const DEFAULT_LOG_LEVEL: log::LevelFilter = log::LevelFilter::Info;
const DEFAULT_LOG_DIRECTORY: &str = "log";
const CONFIG_DIR_ENV: &str = "RB_CONFIG_DIR";
const CONFIG_DIR_NAME: &str = ".rb";
const CONFIG_FILE_NAME: &str = "config.toml";
