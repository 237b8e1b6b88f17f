use crate::{ConfigError, ConfigErrorResult};

use std::time::Duration;

use serde::Deserialize;

pub const DEFAULT_RELAY_HOST: &str = "127.0.0.1";
pub const DEFAULT_RELAY_PORT: u16 = 1883;
pub const DEFAULT_SUBSCRIBE_TOPIC: &str = "measures";
pub const DEFAULT_PUBLISH_TOPIC: &str = "motor";
pub const DEFAULT_CLIENT_ID_PREFIX: &str = "publish";

// Keep-alive constraints (seconds)
pub const MIN_KEEP_ALIVE_SECS: u64 = 5;
pub const MAX_KEEP_ALIVE_SECS: u64 = 3600;
pub const DEFAULT_KEEP_ALIVE_SECS: u64 = 60;

// Connect timeout constraints (seconds)
pub const MIN_CONNECT_TIMEOUT_SECS: u64 = 1;
pub const MAX_CONNECT_TIMEOUT_SECS: u64 = 120;
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 5;

/// MQTT relay settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RelayConfig {
    pub enabled: bool,
    pub host: String,
    pub port: u16,
    /// Topic whose messages are printed to the console
    pub subscribe_topic: String,
    /// Topic every streamed value is published to
    pub publish_topic: String,
    /// Client id is `<prefix>-<random suffix>`
    pub client_id_prefix: String,
    pub keep_alive_secs: u64,
    pub connect_timeout_secs: u64,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            host: String::from(DEFAULT_RELAY_HOST),
            port: DEFAULT_RELAY_PORT,
            subscribe_topic: String::from(DEFAULT_SUBSCRIBE_TOPIC),
            publish_topic: String::from(DEFAULT_PUBLISH_TOPIC),
            client_id_prefix: String::from(DEFAULT_CLIENT_ID_PREFIX),
            keep_alive_secs: DEFAULT_KEEP_ALIVE_SECS,
            connect_timeout_secs: DEFAULT_CONNECT_TIMEOUT_SECS,
        }
    }
}

impl RelayConfig {
    pub fn broker_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn keep_alive(&self) -> Duration {
        Duration::from_secs(self.keep_alive_secs)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    /// Validate broker address, topics and timers.
    ///
    /// Runs even when the relay is disabled so a bad file fails at startup
    /// rather than the day someone flips `enabled`.
    pub fn validate(&self) -> ConfigErrorResult<()> {
        if self.host.trim().is_empty() {
            return Err(ConfigError::relay("relay.host must not be empty"));
        }

        if self.port == 0 {
            return Err(ConfigError::relay("relay.port must not be 0"));
        }

        if self.subscribe_topic.is_empty() {
            return Err(ConfigError::relay("relay.subscribe_topic must not be empty"));
        }

        if self.publish_topic.is_empty() {
            return Err(ConfigError::relay("relay.publish_topic must not be empty"));
        }

        if self.publish_topic.contains(['+', '#']) {
            return Err(ConfigError::relay(format!(
                "relay.publish_topic must not contain wildcards, got '{}'",
                self.publish_topic
            )));
        }

        if self.client_id_prefix.trim().is_empty() {
            return Err(ConfigError::relay("relay.client_id_prefix must not be empty"));
        }

        if self.keep_alive_secs < MIN_KEEP_ALIVE_SECS || self.keep_alive_secs > MAX_KEEP_ALIVE_SECS
        {
            return Err(ConfigError::relay(format!(
                "relay.keep_alive_secs must be {}-{}, got {}",
                MIN_KEEP_ALIVE_SECS, MAX_KEEP_ALIVE_SECS, self.keep_alive_secs
            )));
        }

        if self.connect_timeout_secs < MIN_CONNECT_TIMEOUT_SECS
            || self.connect_timeout_secs > MAX_CONNECT_TIMEOUT_SECS
        {
            return Err(ConfigError::relay(format!(
                "relay.connect_timeout_secs must be {}-{}, got {}",
                MIN_CONNECT_TIMEOUT_SECS, MAX_CONNECT_TIMEOUT_SECS, self.connect_timeout_secs
            )));
        }

        Ok(())
    }
}
