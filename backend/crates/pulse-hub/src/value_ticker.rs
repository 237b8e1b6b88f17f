use crate::{Broadcaster, ShutdownGuard};

use pulse_core::{Value, ValueSource};

use std::time::Duration;

use log::{debug, info};
use tokio::task::JoinHandle;
use tokio::time::{MissedTickBehavior, interval};

/// Samples a [`ValueSource`] on a fixed interval and publishes each sample.
pub struct ValueTicker<S: ValueSource> {
    source: S,
    broadcaster: Broadcaster,
    tick_interval: Duration,
}

impl<S: ValueSource> ValueTicker<S> {
    pub fn new(source: S, broadcaster: Broadcaster, tick_interval: Duration) -> Self {
        Self {
            source,
            broadcaster,
            tick_interval,
        }
    }

    pub fn spawn(self, shutdown_guard: ShutdownGuard) -> JoinHandle<u64> {
        tokio::spawn(self.run(shutdown_guard))
    }

    /// Tick until shutdown. The first sample is published immediately.
    /// Returns the number of values published.
    pub async fn run(mut self, mut shutdown_guard: ShutdownGuard) -> u64 {
        let mut ticker = interval(self.tick_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let mut ticks = 0u64;

        info!("Value ticker started ({:?} interval)", self.tick_interval);
        loop {
            tokio::select! {
                biased;

                _ = shutdown_guard.wait() => break,
                _ = ticker.tick() => {
                    let value = Value::now(self.source.next_payload());
                    let delivered = self.broadcaster.publish(value);
                    ticks += 1;
                    debug!("Tick {ticks} delivered to {delivered} subscribers");
                }
            }
        }
        info!("Value ticker stopped after {ticks} ticks");
        ticks
    }
}
