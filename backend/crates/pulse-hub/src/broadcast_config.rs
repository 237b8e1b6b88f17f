/// Configuration for the value broadcaster
#[derive(Debug, Clone)]
pub struct BroadcastConfig {
    /// Values buffered per subscriber before the oldest is evicted
    pub queue_capacity: usize,
}

impl Default for BroadcastConfig {
    fn default() -> Self {
        Self { queue_capacity: 16 }
    }
}
