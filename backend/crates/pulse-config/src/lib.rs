mod config;
mod error;
mod log_level;
mod logging_config;
mod relay_config;
mod server_config;
mod stream_config;

#[cfg(test)]
mod tests;

pub use config::Config;
pub use error::{ConfigError, ConfigErrorResult};
pub use log_level::LogLevel;
pub use logging_config::LoggingConfig;
pub use relay_config::RelayConfig;
pub use server_config::ServerConfig;
pub use stream_config::StreamConfig;

pub const CONFIG_DIR_ENV: &str = "PULSE_CONFIG_DIR";
pub const CONFIG_FILENAME: &str = "config.toml";
const DEFAULT_CONFIG_DIRECTORY: &str = ".pulse";

// Server
const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 5000;
const MIN_PORT: u16 = 1024;
const DEFAULT_INTERACTIVE: bool = true;
const DEFAULT_SHUTDOWN_TIMEOUT_SECS: u64 = 5;
const MIN_SHUTDOWN_TIMEOUT_SECS: u64 = 1;
const MAX_SHUTDOWN_TIMEOUT_SECS: u64 = 60;

// Logging
const DEFAULT_LOG_LEVEL_STRING: &str = "info";
const DEFAULT_LOG_LEVEL: log::LevelFilter = log::LevelFilter::Info;
const DEFAULT_LOG_DIRECTORY: &str = "log";
const DEFAULT_LOG_COLORED: bool = true;
