use crate::{BroadcastConfig, Metrics, PushOutcome, Subscriber, SubscriberId, SubscriberQueue};

use pulse_core::Value;

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use chrono::{DateTime, Utc};
use log::{debug, info};

/// Fans every published value out to all live subscribers.
///
/// Registration, removal and publishing all happen under one lock, so a value
/// is either enqueued for a subscriber or the subscriber does not exist yet.
/// That lock also serialises publishers, which keeps every queue in publish
/// order.
pub struct Broadcaster {
    inner: Arc<Mutex<BroadcasterInner>>,
    config: BroadcastConfig,
    metrics: Metrics,
}

pub(crate) struct BroadcasterInner {
    current: Option<Value>,
    subscribers: HashMap<SubscriberId, SubscriberEntry>,
    closed: bool,
}

struct SubscriberEntry {
    queue: Arc<SubscriberQueue>,
    connected_at: DateTime<Utc>,
}

impl BroadcasterInner {
    fn remove(&mut self, subscriber_id: SubscriberId) -> Option<SubscriberEntry> {
        let entry = self.subscribers.remove(&subscriber_id)?;
        entry.queue.close();
        Some(entry)
    }
}

pub(crate) fn lock_inner(inner: &Mutex<BroadcasterInner>) -> MutexGuard<'_, BroadcasterInner> {
    inner.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Remove `subscriber_id` from the registry. Returns whether it was present.
pub(crate) fn detach(
    inner: &Mutex<BroadcasterInner>,
    subscriber_id: SubscriberId,
    metrics: &Metrics,
    reason: &str,
) -> bool {
    let (removed, remaining) = {
        let mut inner = lock_inner(inner);
        let removed = inner.remove(subscriber_id);
        (removed, inner.subscribers.len())
    };

    match removed {
        Some(entry) => {
            let connected_for = Utc::now() - entry.connected_at;
            info!(
                "Unsubscribed {subscriber_id} after {}s ({remaining} remaining)",
                connected_for.num_seconds()
            );
            metrics.subscriber_removed(reason);
            true
        }
        None => false,
    }
}

impl Broadcaster {
    pub fn new(config: BroadcastConfig, metrics: Metrics) -> Self {
        Self {
            inner: Arc::new(Mutex::new(BroadcasterInner {
                current: None,
                subscribers: HashMap::new(),
                closed: false,
            })),
            config,
            metrics,
        }
    }

    fn lock(&self) -> MutexGuard<'_, BroadcasterInner> {
        lock_inner(&self.inner)
    }

    /// Register a new subscriber with an empty queue.
    ///
    /// The subscriber only sees values published after this call. After
    /// [`close`](Self::close) the handle comes back already closed.
    pub fn subscribe(&self) -> Subscriber {
        let subscriber_id = SubscriberId::new();
        let queue = Arc::new(SubscriberQueue::new(self.config.queue_capacity));
        let connected_at = Utc::now();

        let registered = {
            let mut inner = self.lock();
            if inner.closed {
                queue.close();
                false
            } else {
                inner.subscribers.insert(
                    subscriber_id,
                    SubscriberEntry {
                        queue: Arc::clone(&queue),
                        connected_at,
                    },
                );
                debug!(
                    "Subscribed {subscriber_id} ({} total)",
                    inner.subscribers.len()
                );
                true
            }
        };

        if registered {
            self.metrics.subscriber_added();
        } else {
            debug!("Broadcaster closed, subscriber {subscriber_id} not registered");
        }

        Subscriber::new(
            subscriber_id,
            connected_at,
            queue,
            Arc::downgrade(&self.inner),
            self.metrics.clone(),
        )
    }

    /// Remove a subscriber and close its queue. Unknown ids are ignored.
    pub fn unsubscribe(&self, subscriber_id: SubscriberId) {
        detach(&self.inner, subscriber_id, &self.metrics, "unsubscribed");
    }

    /// Record `value` as current and enqueue it for every subscriber.
    ///
    /// Never blocks on a consumer. Returns the number of subscribers the value
    /// was delivered to.
    pub fn publish(&self, value: Value) -> usize {
        let (delivered, evicted) = {
            let mut inner = self.lock();
            if inner.closed {
                debug!("Broadcaster closed, dropping value");
                return 0;
            }

            let mut evicted = 0;
            for (subscriber_id, entry) in &inner.subscribers {
                if entry.queue.push(value.clone()) == PushOutcome::EvictedOldest {
                    evicted += 1;
                    debug!("Subscriber {subscriber_id} is behind, dropped its oldest value");
                }
            }
            inner.current = Some(value);
            (inner.subscribers.len(), evicted)
        };

        self.metrics.value_published(delivered);
        self.metrics.values_evicted(evicted);
        delivered
    }

    /// Most recently published value
    pub fn current(&self) -> Option<Value> {
        self.lock().current.clone()
    }

    pub fn subscriber_count(&self) -> usize {
        self.lock().subscribers.len()
    }

    pub fn subscriber_ids(&self) -> Vec<SubscriberId> {
        self.lock().subscribers.keys().copied().collect()
    }

    pub fn contains(&self, subscriber_id: SubscriberId) -> bool {
        self.lock().subscribers.contains_key(&subscriber_id)
    }

    /// Stop accepting values and close every subscriber queue.
    ///
    /// Consumers drain what was already queued and then see end of stream.
    pub fn close(&self) {
        let drained = {
            let mut inner = self.lock();
            if inner.closed {
                return;
            }
            inner.closed = true;
            let ids: Vec<SubscriberId> = inner.subscribers.keys().copied().collect();
            for subscriber_id in &ids {
                inner.remove(*subscriber_id);
            }
            ids.len()
        };

        for _ in 0..drained {
            self.metrics.subscriber_removed("shutdown");
        }
        info!("Broadcaster closed ({drained} subscribers released)");
    }

    pub fn is_closed(&self) -> bool {
        self.lock().closed
    }
}

impl Clone for Broadcaster {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
            config: self.config.clone(),
            metrics: self.metrics.clone(),
        }
    }
}
