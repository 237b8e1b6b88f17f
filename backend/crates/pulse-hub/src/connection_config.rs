use std::time::Duration;

/// Configuration for streaming connections
#[derive(Debug, Clone)]
pub struct ConnectionConfig {
    /// Frames buffered between the stream task and the response body
    pub send_buffer_size: usize,
    /// Re-emit the latest value when the queue stays empty this long
    pub resend_interval: Duration,
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        Self {
            send_buffer_size: 8,
            resend_interval: Duration::from_secs(1),
        }
    }
}
