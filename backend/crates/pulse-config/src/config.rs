use crate::{
    CONFIG_DIR_ENV, CONFIG_FILENAME, ConfigError, ConfigErrorResult, DEFAULT_CONFIG_DIRECTORY,
    LoggingConfig, RelayConfig, ServerConfig, StreamConfig,
};

use std::path::{Path, PathBuf};

use log::info;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub stream: StreamConfig,
    pub relay: RelayConfig,
    pub logging: LoggingConfig,
}

impl Config {
    /// Load config.
    ///
    /// Loading order:
    /// 1. Check for PULSE_CONFIG_DIR env var, else use ./.pulse/
    /// 2. Auto-create config directory if it doesn't exist
    /// 3. Load config.toml if it exists, else use defaults
    /// 4. Apply PULSE_* environment variable overrides
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

        let config_path = config_dir.join(CONFIG_FILENAME);

        let mut config = if config_path.exists() {
            Self::load_toml(&config_path)?
        } else {
            Config::default()
        };

        config.apply_env_overrides();

        Ok(config)
    }

    /// Parse a config from TOML text, without env overrides.
    pub fn from_toml_str(contents: &str) -> ConfigErrorResult<Self> {
        toml::from_str(contents).map_err(|e| ConfigError::Toml {
            path: PathBuf::from("<inline>"),
            source: e,
        })
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
    /// Priority: PULSE_CONFIG_DIR env var > ./.pulse/ (relative to cwd)
    pub fn config_dir() -> ConfigErrorResult<PathBuf> {
        if let Ok(dir) = std::env::var(CONFIG_DIR_ENV) {
            return Ok(PathBuf::from(dir));
        }

        let cwd = std::env::current_dir()
            .map_err(|_| ConfigError::config("Cannot determine current working directory"))?;
        Ok(cwd.join(DEFAULT_CONFIG_DIRECTORY))
    }

    /// Validate all configuration.
    /// Call after load() to catch all errors at startup.
    pub fn validate(&self) -> ConfigErrorResult<()> {
        self.server.validate()?;
        self.stream.validate()?;
        self.relay.validate()?;

        // Log file must stay inside the config dir
        let log_dir = Path::new(&self.logging.dir);
        if log_dir.is_absolute() || self.logging.dir.contains("..") {
            return Err(ConfigError::logging(
                "logging.dir must be relative and cannot contain '..'",
            ));
        }

        if let Some(ref file) = self.logging.file
            && (file.is_empty() || file.contains(['/', '\\']))
        {
            return Err(ConfigError::logging(format!(
                "logging.file must be a plain file name, got '{file}'"
            )));
        }

        Ok(())
    }

    /// Absolute path of the log file, if file logging is configured.
    pub fn log_file_path(&self) -> ConfigErrorResult<Option<PathBuf>> {
        match self.logging.file {
            Some(ref file) => Ok(Some(Self::config_dir()?.join(&self.logging.dir).join(file))),
            None => Ok(None),
        }
    }

    /// Get bind address as string.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// Log configuration summary.
    pub fn log_summary(&self) {
        info!("Configuration loaded:");
        info!(
            "  server: {} (interactive: {}, shutdown timeout {}s)",
            self.bind_addr(),
            self.server.interactive,
            self.server.shutdown_timeout_secs
        );
        info!(
            "  stream: tick={}ms, resend={}ms, queue={}, send_buffer={}",
            self.stream.tick_interval_ms,
            self.stream.resend_interval_ms,
            self.stream.queue_capacity,
            self.stream.send_buffer_size
        );

        if self.relay.enabled {
            info!(
                "  relay: {} (sub '{}', pub '{}', keep-alive {}s)",
                self.relay.broker_addr(),
                self.relay.subscribe_topic,
                self.relay.publish_topic,
                self.relay.keep_alive_secs
            );
        } else {
            info!("  relay: disabled");
        }

        info!(
            "  logging: {} (colored: {}, file: {})",
            *self.logging.level,
            self.logging.colored,
            self.logging.file.as_deref().unwrap_or("stdout")
        );
    }

    fn apply_env_overrides(&mut self) {
        // Server
        Self::apply_env_string("PULSE_SERVER_HOST", &mut self.server.host);
        Self::apply_env_parse("PULSE_SERVER_PORT", &mut self.server.port);
        Self::apply_env_bool("PULSE_SERVER_INTERACTIVE", &mut self.server.interactive);
        Self::apply_env_parse(
            "PULSE_SERVER_SHUTDOWN_TIMEOUT_SECS",
            &mut self.server.shutdown_timeout_secs,
        );

        // Stream
        Self::apply_env_parse(
            "PULSE_STREAM_QUEUE_CAPACITY",
            &mut self.stream.queue_capacity,
        );
        Self::apply_env_parse(
            "PULSE_STREAM_TICK_INTERVAL_MS",
            &mut self.stream.tick_interval_ms,
        );
        Self::apply_env_parse(
            "PULSE_STREAM_RESEND_INTERVAL_MS",
            &mut self.stream.resend_interval_ms,
        );
        Self::apply_env_parse(
            "PULSE_STREAM_SEND_BUFFER_SIZE",
            &mut self.stream.send_buffer_size,
        );

        // Relay
        Self::apply_env_bool("PULSE_RELAY_ENABLED", &mut self.relay.enabled);
        Self::apply_env_string("PULSE_RELAY_HOST", &mut self.relay.host);
        Self::apply_env_parse("PULSE_RELAY_PORT", &mut self.relay.port);
        Self::apply_env_string(
            "PULSE_RELAY_SUBSCRIBE_TOPIC",
            &mut self.relay.subscribe_topic,
        );
        Self::apply_env_string("PULSE_RELAY_PUBLISH_TOPIC", &mut self.relay.publish_topic);
        Self::apply_env_string(
            "PULSE_RELAY_CLIENT_ID_PREFIX",
            &mut self.relay.client_id_prefix,
        );
        Self::apply_env_parse(
            "PULSE_RELAY_KEEP_ALIVE_SECS",
            &mut self.relay.keep_alive_secs,
        );
        Self::apply_env_parse(
            "PULSE_RELAY_CONNECT_TIMEOUT_SECS",
            &mut self.relay.connect_timeout_secs,
        );

        // Logging
        Self::apply_env_parse("PULSE_LOG_LEVEL", &mut self.logging.level);
        Self::apply_env_bool("PULSE_LOG_COLORED", &mut self.logging.colored);
        Self::apply_env_option_string("PULSE_LOG_FILE", &mut self.logging.file);
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
