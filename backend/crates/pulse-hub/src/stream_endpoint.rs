use crate::{
    Broadcaster, ChartFrame, ConnectionConfig, FrameWriter, HubError, Metrics,
    Result as HubResult, ShutdownGuard, Subscriber,
};

use log::{debug, info, warn};
use tokio::time::timeout;

/// Streams broadcaster values to one client as chart frames.
///
/// Each value is written as soon as it is dequeued. When nothing arrives for
/// `resend_interval` the latest value is re-sent with a fresh timestamp so the
/// client keeps seeing traffic.
pub struct StreamEndpoint {
    broadcaster: Broadcaster,
    config: ConnectionConfig,
    metrics: Metrics,
    client_addr: String,
}

impl StreamEndpoint {
    pub fn new(
        broadcaster: Broadcaster,
        config: ConnectionConfig,
        metrics: Metrics,
        client_addr: impl Into<String>,
    ) -> Self {
        Self {
            broadcaster,
            config,
            metrics,
            client_addr: client_addr.into(),
        }
    }

    /// Subscribe and stream until shutdown, client close or a failed write.
    pub async fn run<W: FrameWriter>(
        self,
        writer: W,
        shutdown_guard: ShutdownGuard,
    ) -> HubResult<()> {
        let subscriber = self.broadcaster.subscribe();
        self.run_subscribed(subscriber, writer, shutdown_guard).await
    }

    /// Stream from an existing subscription. The subscription is released
    /// before returning.
    pub async fn run_subscribed<W: FrameWriter>(
        self,
        subscriber: Subscriber,
        mut writer: W,
        mut shutdown_guard: ShutdownGuard,
    ) -> HubResult<()> {
        let subscriber_id = subscriber.id();
        info!("Streaming to {} as {subscriber_id}", self.client_addr);

        let result = loop {
            let next = tokio::select! {
                biased;

                _ = shutdown_guard.wait() => {
                    info!("Stream {subscriber_id} stopping for shutdown");
                    break Ok(());
                }
                _ = writer.closed() => {
                    info!("Client {} closed stream {subscriber_id}", self.client_addr);
                    break Ok(());
                }
                next = timeout(self.config.resend_interval, subscriber.recv()) => next,
            };

            let (value, kind) = match next {
                Ok(Some(value)) => (value, "value"),
                Ok(None) => {
                    debug!("Subscription {subscriber_id} closed");
                    break Ok(());
                }
                Err(_) => match self.broadcaster.current() {
                    Some(latest) => (latest.restamped(), "resend"),
                    None => continue,
                },
            };

            let frame = match ChartFrame::encode(&value) {
                Ok(frame) => frame,
                Err(e) => {
                    warn!("Skipping value for {subscriber_id}: {e}");
                    self.metrics.error_occurred(e.kind());
                    continue;
                }
            };

            // A client that stops reading can stall the write indefinitely.
            let written = tokio::select! {
                biased;

                _ = shutdown_guard.wait() => {
                    info!("Stream {subscriber_id} abandoning pending write for shutdown");
                    break Ok(());
                }
                written = writer.write_frame(frame) => written,
            };

            if let Err(e) = written {
                break Err(HubError::subscriber_disconnected(
                    subscriber_id,
                    e.to_string(),
                ));
            }
            self.metrics.frame_sent(kind);
        };

        self.broadcaster.unsubscribe(subscriber_id);
        drop(subscriber);

        if let Err(e) = &result {
            self.metrics.error_occurred(e.kind());
        }
        result
    }
}
