use crate::{
    CONFIG_DIR_ENV, CONFIG_DIR_NAME, CONFIG_FILE_NAME, ConfigError, ConfigErrorResult,
    ImageStreamConfig, LoggingConfig, RobotConfig, ServerConfig, StreamConfig,
};

use std::path::{Path, PathBuf};

use log::info;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub streams: StreamConfig,
    pub image_stream: ImageStreamConfig,
    pub robot: RobotConfig,
}

impl Config {
    /// Load config.
    ///
    /// Loading order:
    /// 1. Check for RB_CONFIG_DIR env var, else use ./.rb/
    /// 2. Auto-create config directory if it doesn't exist
    /// 3. Load config.toml if it exists, else use defaults
    /// 4. Apply RB_* environment variable overrides
    ///
    /// Does NOT validate - call validate() after load().
    pub fn load() -> ConfigErrorResult<Self> {
        let config_dir = Self::config_dir()?;

        if !config_dir.exists() {
            std::fs::create_dir_all(&config_dir).map_err(|e| ConfigError::Io {
                path: config_dir.clone(),
                source: e,
            })?;
        }

        let config_path = config_dir.join(CONFIG_FILE_NAME);

        let mut config = if config_path.exists() {
            Self::load_toml(&config_path)?
        } else {
            Config::default()
        };

        config.apply_env_overrides();

        Ok(config)
    }

    fn load_toml(path: &Path) -> ConfigErrorResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        toml::from_str(&contents).map_err(|e| ConfigError::Toml {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Get the config directory.
    /// Priority: RB_CONFIG_DIR env var > ./.rb/ (relative to cwd)
    pub fn config_dir() -> ConfigErrorResult<PathBuf> {
        if let Ok(dir) = std::env::var(CONFIG_DIR_ENV) {
            return Ok(PathBuf::from(dir));
        }

        let cwd = std::env::current_dir()
            .map_err(|_| ConfigError::config("Cannot determine current working directory"))?;
        Ok(cwd.join(CONFIG_DIR_NAME))
    }

    /// Validate all configuration.
    /// Call after load() to catch all errors at startup.
    pub fn validate(&self) -> ConfigErrorResult<()> {
        self.server.validate()?;
        self.streams.validate()?;
        self.image_stream.validate()?;
        self.robot.validate()?;

        if let Some(ref file) = self.logging.file
            && (file.contains("..") || Path::new(file).is_absolute())
        {
            return Err(ConfigError::logging(
                "logging.file must be a relative file name without '..'",
            ));
        }

        Ok(())
    }

    /// Get bind address as string.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// Log configuration summary.
    pub fn log_summary(&self) {
        info!("Configuration loaded:");
        info!(
            "  server: {}:{} (routes under {}, shutdown grace {}ms)",
            self.server.host,
            self.server.port,
            self.server.api_prefix,
            self.server.shutdown_grace_ms
        );
        info!(
            "  logging: {} (colored: {})",
            *self.logging.level, self.logging.colored
        );
        info!(
            "  streams: keep-alive={}ms, max_clients={}, buffer={}",
            self.streams.keep_alive_interval_ms,
            self.streams.max_clients,
            self.streams.send_buffer_size
        );
        match self.image_stream.max_clients() {
            Some(max) => info!(
                "  image_stream: max_clients={}, buffer={}",
                max, self.image_stream.send_buffer_size
            ),
            None => info!(
                "  image_stream: uncapped, buffer={}",
                self.image_stream.send_buffer_size
            ),
        }
        if self.robot.simulate_interval_ms > 0 {
            info!("  robot: simulating every {}ms", self.robot.simulate_interval_ms);
        } else {
            info!("  robot: simulation disabled");
        }
    }

    fn apply_env_overrides(&mut self) {
        // Server
        Self::apply_env_string("RB_SERVER_HOST", &mut self.server.host);
        Self::apply_env_parse("RB_SERVER_PORT", &mut self.server.port);
        Self::apply_env_string("RB_SERVER_API_PREFIX", &mut self.server.api_prefix);
        Self::apply_env_parse(
            "RB_SERVER_SHUTDOWN_GRACE_MS",
            &mut self.server.shutdown_grace_ms,
        );

        // Logging
        Self::apply_env_parse("RB_LOG_LEVEL", &mut self.logging.level);
        Self::apply_env_bool("RB_LOG_COLORED", &mut self.logging.colored);
        Self::apply_env_option_string("RB_LOG_FILE", &mut self.logging.file);

        // Event streams
        Self::apply_env_parse(
            "RB_STREAM_KEEP_ALIVE_INTERVAL_MS",
            &mut self.streams.keep_alive_interval_ms,
        );
        Self::apply_env_parse("RB_STREAM_MAX_CLIENTS", &mut self.streams.max_clients);
        Self::apply_env_parse(
            "RB_STREAM_SEND_BUFFER_SIZE",
            &mut self.streams.send_buffer_size,
        );

        // Image stream
        Self::apply_env_parse(
            "RB_IMAGE_STREAM_MAX_CLIENTS",
            &mut self.image_stream.max_clients,
        );
        Self::apply_env_parse(
            "RB_IMAGE_STREAM_SEND_BUFFER_SIZE",
            &mut self.image_stream.send_buffer_size,
        );

        // Robot
        Self::apply_env_parse(
            "RB_ROBOT_SIMULATE_INTERVAL_MS",
            &mut self.robot.simulate_interval_ms,
        );
    }

    /// Helper: Apply environment variable override for String values
    fn apply_env_string(var_name: &str, target: &mut String) {
        if let Ok(val) = std::env::var(var_name) {
            *target = val;
        }
    }

    /// Helper: Apply environment variable override for bool values (accepts "true"/"1")
    fn apply_env_bool(var_name: &str, target: &mut bool) {
        if let Ok(val) = std::env::var(var_name) {
            *target = val == "true" || val == "1";
        }
    }

    /// Helper: Apply environment variable override for parseable values
    fn apply_env_parse<T: std::str::FromStr>(var_name: &str, target: &mut T) {
        if let Ok(val) = std::env::var(var_name)
            && let Ok(parsed) = val.parse()
        {
            *target = parsed;
        }
    }

    /// Helper: Apply environment variable override for Option<String> values
    fn apply_env_option_string(var_name: &str, target: &mut Option<String>) {
        if let Ok(val) = std::env::var(var_name) {
            *target = Some(val);
        }
    }
}
