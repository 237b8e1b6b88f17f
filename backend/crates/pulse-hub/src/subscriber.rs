use crate::broadcaster::{BroadcasterInner, detach};
use crate::{Metrics, SubscriberId, SubscriberQueue};

use pulse_core::Value;

use std::sync::{Arc, Mutex, Weak};

use chrono::{DateTime, Utc};

/// Handle to one registration with a [`Broadcaster`](crate::Broadcaster).
///
/// Dropping the handle unsubscribes, so a cancelled stream task cannot leave
/// a stale entry behind.
pub struct Subscriber {
    subscriber_id: SubscriberId,
    connected_at: DateTime<Utc>,
    queue: Arc<SubscriberQueue>,
    registry: Weak<Mutex<BroadcasterInner>>,
    metrics: Metrics,
}

impl Subscriber {
    pub(crate) fn new(
        subscriber_id: SubscriberId,
        connected_at: DateTime<Utc>,
        queue: Arc<SubscriberQueue>,
        registry: Weak<Mutex<BroadcasterInner>>,
        metrics: Metrics,
    ) -> Self {
        Self {
            subscriber_id,
            connected_at,
            queue,
            registry,
            metrics,
        }
    }

    pub fn id(&self) -> SubscriberId {
        self.subscriber_id
    }

    pub fn connected_at(&self) -> DateTime<Utc> {
        self.connected_at
    }

    /// Wait for the next value. `None` once the subscription is closed and
    /// drained.
    pub async fn recv(&self) -> Option<Value> {
        self.queue.pop().await
    }

    pub fn try_recv(&self) -> Option<Value> {
        self.queue.try_pop()
    }

    /// Values waiting in the queue, oldest first
    pub fn pending(&self) -> Vec<Value> {
        self.queue.snapshot()
    }

    pub fn is_closed(&self) -> bool {
        self.queue.is_closed()
    }

    pub fn evicted_count(&self) -> u64 {
        self.queue.evicted_count()
    }

    /// Leave the broadcaster now rather than on drop
    pub fn unsubscribe(self) {
        drop(self);
    }
}

impl Drop for Subscriber {
    fn drop(&mut self) {
        self.queue.close();
        if let Some(registry) = self.registry.upgrade() {
            detach(&registry, self.subscriber_id, &self.metrics, "dropped");
        }
    }
}

impl std::fmt::Debug for Subscriber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscriber")
            .field("subscriber_id", &self.subscriber_id)
            .field("connected_at", &self.connected_at)
            .field("queued", &self.queue.len())
            .finish()
    }
}
