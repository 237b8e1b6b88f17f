use crate::{RelayError, RelayState, Result as RelayResult};

use pulse_core::{Value, print_line};
use pulse_hub::{Broadcaster, Metrics, ShutdownGuard};

use log::{info, warn};
use rumqttc::{AsyncClient, QoS};
use tokio::sync::watch;
use tokio::task::JoinHandle;

/// Publishes hub values to the relay's outbound topic at QoS 0.
#[derive(Clone)]
pub struct RelayPublisher {
    client: AsyncClient,
    topic: String,
    state: watch::Receiver<RelayState>,
    metrics: Metrics,
}

impl RelayPublisher {
    pub(crate) fn new(
        client: AsyncClient,
        topic: String,
        state: watch::Receiver<RelayState>,
        metrics: Metrics,
    ) -> Self {
        Self {
            client,
            topic,
            state,
            metrics,
        }
    }

    pub fn topic(&self) -> &str {
        &self.topic
    }

    /// Stringify the payload and hand it to the client without waiting.
    /// Returns the message that was sent.
    pub fn publish_value(&self, value: &Value) -> RelayResult<String> {
        let state = *self.state.borrow();
        if state != RelayState::Connected {
            return Err(RelayError::not_connected(self.topic.as_str(), state));
        }

        let message = value.payload().to_string();
        self.client
            .try_publish(
                self.topic.as_str(),
                QoS::AtMostOnce,
                false,
                message.clone().into_bytes(),
            )
            .map_err(|source| RelayError::publish(self.topic.as_str(), source))?;
        Ok(message)
    }

    pub fn on_value(&self, value: &Value) {
        match self.publish_value(value) {
            Ok(message) => {
                self.metrics.relay_published();
                print_line(format!("Sent `{message}` to topic `{}`", self.topic));
            }
            Err(e) => {
                self.metrics.relay_publish_failed();
                warn!("Dropping value: {e}");
            }
        }
    }

    /// Subscribe to `broadcaster` and publish every value it emits until
    /// shutdown or until the broadcaster closes. Returns the number of values
    /// handled.
    pub fn spawn_forwarder(
        self,
        broadcaster: &Broadcaster,
        mut shutdown_guard: ShutdownGuard,
    ) -> JoinHandle<u64> {
        let subscriber = broadcaster.subscribe();
        tokio::spawn(async move {
            let mut forwarded = 0u64;
            loop {
                tokio::select! {
                    biased;

                    _ = shutdown_guard.wait() => break,
                    next = subscriber.recv() => match next {
                        Some(value) => {
                            self.on_value(&value);
                            forwarded += 1;
                        }
                        None => break,
                    },
                }
            }
            info!("Relay forwarder stopped after {forwarded} values");
            forwarded
        })
    }
}
