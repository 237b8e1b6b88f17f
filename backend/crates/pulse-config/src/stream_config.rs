use crate::{ConfigError, ConfigErrorResult};

use std::time::Duration;

use serde::Deserialize;

// Per-subscriber queue capacity constraints
pub const MIN_QUEUE_CAPACITY: usize = 1;
pub const MAX_QUEUE_CAPACITY: usize = 10000;
pub const DEFAULT_QUEUE_CAPACITY: usize = 16;

// Tick interval constraints (milliseconds)
pub const MIN_TICK_INTERVAL_MS: u64 = 10;
pub const MAX_TICK_INTERVAL_MS: u64 = 60_000;
pub const DEFAULT_TICK_INTERVAL_MS: u64 = 1000;

// Liveness re-send interval constraints (milliseconds)
pub const MIN_RESEND_INTERVAL_MS: u64 = 10;
pub const MAX_RESEND_INTERVAL_MS: u64 = 60_000;
pub const DEFAULT_RESEND_INTERVAL_MS: u64 = 1000;

// HTTP send buffer constraints (frames)
pub const MIN_SEND_BUFFER_SIZE: usize = 1;
pub const MAX_SEND_BUFFER_SIZE: usize = 1000;
pub const DEFAULT_SEND_BUFFER_SIZE: usize = 8;

/// Value stream settings.
/// All values validated to be within reasonable operational ranges.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StreamConfig {
    /// Values buffered per subscriber before the oldest is evicted
    pub queue_capacity: usize,
    /// How often the value source is polled
    pub tick_interval_ms: u64,
    /// Re-emit the latest value when nothing new arrived for this long
    pub resend_interval_ms: u64,
    /// Frames buffered between a stream task and its HTTP response body
    pub send_buffer_size: usize,
}

impl Default for StreamConfig {
    fn default() -> Self {
        Self {
            queue_capacity: DEFAULT_QUEUE_CAPACITY,
            tick_interval_ms: DEFAULT_TICK_INTERVAL_MS,
            resend_interval_ms: DEFAULT_RESEND_INTERVAL_MS,
            send_buffer_size: DEFAULT_SEND_BUFFER_SIZE,
        }
    }
}

impl StreamConfig {
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    pub fn resend_interval(&self) -> Duration {
        Duration::from_millis(self.resend_interval_ms)
    }

    /// Validate all fields are within acceptable ranges.
    pub fn validate(&self) -> ConfigErrorResult<()> {
        if self.queue_capacity < MIN_QUEUE_CAPACITY || self.queue_capacity > MAX_QUEUE_CAPACITY {
            return Err(ConfigError::stream(format!(
                "stream.queue_capacity must be {}-{}, got {}",
                MIN_QUEUE_CAPACITY, MAX_QUEUE_CAPACITY, self.queue_capacity
            )));
        }

        if self.tick_interval_ms < MIN_TICK_INTERVAL_MS
            || self.tick_interval_ms > MAX_TICK_INTERVAL_MS
        {
            return Err(ConfigError::stream(format!(
                "stream.tick_interval_ms must be {}-{}, got {}",
                MIN_TICK_INTERVAL_MS, MAX_TICK_INTERVAL_MS, self.tick_interval_ms
            )));
        }

        if self.resend_interval_ms < MIN_RESEND_INTERVAL_MS
            || self.resend_interval_ms > MAX_RESEND_INTERVAL_MS
        {
            return Err(ConfigError::stream(format!(
                "stream.resend_interval_ms must be {}-{}, got {}",
                MIN_RESEND_INTERVAL_MS, MAX_RESEND_INTERVAL_MS, self.resend_interval_ms
            )));
        }

        if self.send_buffer_size < MIN_SEND_BUFFER_SIZE
            || self.send_buffer_size > MAX_SEND_BUFFER_SIZE
        {
            return Err(ConfigError::stream(format!(
                "stream.send_buffer_size must be {}-{}, got {}",
                MIN_SEND_BUFFER_SIZE, MAX_SEND_BUFFER_SIZE, self.send_buffer_size
            )));
        }

        Ok(())
    }
}
