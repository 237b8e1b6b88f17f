use pulse_core::Value;

use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard, PoisonError};

use tokio::sync::Notify;

/// Result of pushing into a [`SubscriberQueue`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PushOutcome {
    Queued,
    /// Queue was full; the oldest value was dropped to make room
    EvictedOldest,
    /// Queue is closed; the value was discarded
    Closed,
}

#[derive(Debug, Default)]
struct QueueState {
    values: VecDeque<Value>,
    closed: bool,
    evicted: u64,
}

/// Bounded FIFO feeding one subscriber.
///
/// A full queue drops its oldest entry, so a slow consumer never blocks the
/// publisher and always catches up to the newest values.
#[derive(Debug)]
pub struct SubscriberQueue {
    state: Mutex<QueueState>,
    notify: Notify,
    capacity: usize,
}

impl SubscriberQueue {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            state: Mutex::new(QueueState {
                values: VecDeque::with_capacity(capacity),
                ..QueueState::default()
            }),
            notify: Notify::new(),
            capacity,
        }
    }

    fn lock(&self) -> MutexGuard<'_, QueueState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn push(&self, value: Value) -> PushOutcome {
        let outcome = {
            let mut state = self.lock();
            if state.closed {
                return PushOutcome::Closed;
            }
            let outcome = if state.values.len() >= self.capacity {
                state.values.pop_front();
                state.evicted += 1;
                PushOutcome::EvictedOldest
            } else {
                PushOutcome::Queued
            };
            state.values.push_back(value);
            outcome
        };
        self.notify.notify_one();
        outcome
    }

    /// Next value in publish order.
    ///
    /// Drains what is left after [`close`](Self::close), then yields `None`.
    /// Cancel safe: a dropped future never loses a value.
    pub async fn pop(&self) -> Option<Value> {
        loop {
            {
                let mut state = self.lock();
                if let Some(value) = state.values.pop_front() {
                    return Some(value);
                }
                if state.closed {
                    return None;
                }
            }
            self.notify.notified().await;
        }
    }

    pub fn try_pop(&self) -> Option<Value> {
        self.lock().values.pop_front()
    }

    pub fn close(&self) {
        self.lock().closed = true;
        self.notify.notify_waiters();
        self.notify.notify_one();
    }

    pub fn is_closed(&self) -> bool {
        self.lock().closed
    }

    pub fn len(&self) -> usize {
        self.lock().values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().values.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Values dropped so far because the queue was full
    pub fn evicted_count(&self) -> u64 {
        self.lock().evicted
    }

    /// Copy of the queued values, oldest first
    pub fn snapshot(&self) -> Vec<Value> {
        self.lock().values.iter().cloned().collect()
    }
}
