use crate::{MessageHandler, RelayState};

use pulse_hub::{Metrics, ShutdownGuard};

use std::sync::Arc;
use std::time::Duration;

use log::{debug, info, warn};
use rumqttc::{AsyncClient, Event, EventLoop, Packet, SubAck, SubscribeReasonCode};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::timeout;

const DISCONNECT_FLUSH_TIMEOUT: Duration = Duration::from_millis(250);

/// Drives the broker connection and dispatches inbound publishes.
///
/// Ends on shutdown, a broker-initiated disconnect, or a network error. The
/// relay is left `Disconnected` and does not reconnect.
pub struct ReceiveLoop<H: MessageHandler> {
    client: AsyncClient,
    event_loop: EventLoop,
    handler: Arc<H>,
    state_tx: Arc<watch::Sender<RelayState>>,
    metrics: Metrics,
}

impl<H: MessageHandler> ReceiveLoop<H> {
    pub(crate) fn new(
        client: AsyncClient,
        event_loop: EventLoop,
        handler: Arc<H>,
        state_tx: Arc<watch::Sender<RelayState>>,
        metrics: Metrics,
    ) -> Self {
        Self {
            client,
            event_loop,
            handler,
            state_tx,
            metrics,
        }
    }

    pub fn spawn(self, shutdown_guard: ShutdownGuard) -> JoinHandle<()> {
        tokio::spawn(self.run(shutdown_guard))
    }

    pub async fn run(mut self, mut shutdown_guard: ShutdownGuard) {
        loop {
            tokio::select! {
                biased;

                _ = shutdown_guard.wait() => {
                    info!("Relay receive loop stopping for shutdown");
                    self.close_session().await;
                    break;
                }
                event = self.event_loop.poll() => match event {
                    Ok(Event::Incoming(Packet::Publish(publish))) => {
                        self.metrics.relay_received();
                        self.handler.on_message(&publish.topic, &publish.payload);
                    }
                    Ok(Event::Incoming(Packet::SubAck(ack))) => {
                        let rejected = rejected_filters(&ack);
                        if rejected > 0 {
                            warn!(
                                "Broker rejected {rejected} of {} subscription filters (pkid {}); inbound messages will not arrive",
                                ack.return_codes.len(),
                                ack.pkid
                            );
                            self.metrics.error_occurred("relay_subscribe");
                        } else {
                            debug!("Subscription {} acknowledged", ack.pkid);
                        }
                    }
                    Ok(Event::Incoming(Packet::Disconnect)) => {
                        warn!("Broker closed the session");
                        break;
                    }
                    Ok(event) => debug!("Broker event: {event:?}"),
                    Err(e) => {
                        warn!("Broker connection lost: {e}");
                        self.metrics.error_occurred("relay_connection");
                        break;
                    }
                },
            }
        }
        self.state_tx.send_replace(RelayState::Disconnected);
    }

    async fn close_session(&mut self) {
        if self.client.try_disconnect().is_err() {
            return;
        }
        let _ = timeout(DISCONNECT_FLUSH_TIMEOUT, self.event_loop.poll()).await;
    }
}

/// Number of filters in `ack` the broker refused.
pub(crate) fn rejected_filters(ack: &SubAck) -> usize {
    ack.return_codes
        .iter()
        .filter(|code| matches!(code, SubscribeReasonCode::Failure))
        .count()
}
