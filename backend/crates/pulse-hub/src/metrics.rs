use metrics::{counter, gauge};

/// Metrics collector for the value hub
#[derive(Clone)]
pub struct Metrics {
    prefix: &'static str,
}

impl Metrics {
    pub fn new() -> Self {
        Self { prefix: "pulse" }
    }

    /// Record a subscriber joining the broadcaster
    pub fn subscriber_added(&self) {
        counter!(format!("{}.subscribers.added", self.prefix)).increment(1);
        gauge!(format!("{}.subscribers.active", self.prefix)).increment(1.0);
    }

    /// Record a subscriber leaving the broadcaster
    pub fn subscriber_removed(&self, reason: &str) {
        counter!(format!("{}.subscribers.removed", self.prefix)).increment(1);
        counter!(format!("{}.subscribers.removed.{}", self.prefix, reason)).increment(1);
        gauge!(format!("{}.subscribers.active", self.prefix)).decrement(1.0);
    }

    /// Record a value fanned out to `subscriber_count` queues
    pub fn value_published(&self, subscriber_count: usize) {
        counter!(format!("{}.values.published", self.prefix)).increment(1);
        gauge!(format!("{}.broadcast.subscribers", self.prefix)).set(subscriber_count as f64);
    }

    /// Record values dropped from full subscriber queues
    pub fn values_evicted(&self, count: usize) {
        if count > 0 {
            counter!(format!("{}.values.evicted", self.prefix)).increment(count as u64);
        }
    }

    /// Record a frame written to a stream client
    pub fn frame_sent(&self, kind: &str) {
        counter!(format!("{}.frames.sent", self.prefix)).increment(1);
        counter!(format!("{}.frames.sent.{}", self.prefix, kind)).increment(1);
    }

    /// Record a value forwarded to the broker
    pub fn relay_published(&self) {
        counter!(format!("{}.relay.published", self.prefix)).increment(1);
    }

    /// Record a value the broker client refused
    pub fn relay_publish_failed(&self) {
        counter!(format!("{}.relay.publish_failed", self.prefix)).increment(1);
    }

    /// Record a message received from the broker
    pub fn relay_received(&self) {
        counter!(format!("{}.relay.received", self.prefix)).increment(1);
    }

    /// Record error occurrence
    pub fn error_occurred(&self, error_type: &str) {
        counter!(format!("{}.errors.total", self.prefix)).increment(1);
        counter!(format!("{}.errors.{}", self.prefix, error_type)).increment(1);
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}
