use crate::{
    REQUEST_CHANNEL_CAPACITY, MessageHandler, ReceiveLoop, RelayError, RelayPublisher,
    RelayState, Result as RelayResult,
};

use pulse_config::RelayConfig;
use pulse_hub::Metrics;

use std::sync::Arc;

use log::{debug, info};
use rand::Rng;
use rumqttc::{
    AsyncClient, ConnectReturnCode, ConnectionError, Event, EventLoop, MqttOptions, Packet, QoS,
};
use tokio::sync::watch;
use tokio::time::timeout;

/// `<prefix>-<n>` with `n` drawn uniformly from `0..=1000`.
pub fn client_id(prefix: &str) -> String {
    format!("{prefix}-{}", rand::rng().random_range(0..=1000))
}

/// MQTT bridge: forwards hub values to `publish_topic` and hands messages
/// from `subscribe_topic` to a [`MessageHandler`].
pub struct RelayClient<H: MessageHandler> {
    config: RelayConfig,
    client_id: String,
    client: AsyncClient,
    event_loop: Option<EventLoop>,
    handler: Arc<H>,
    state_tx: Arc<watch::Sender<RelayState>>,
    metrics: Metrics,
}

impl<H: MessageHandler> RelayClient<H> {
    pub fn new(config: RelayConfig, handler: H, metrics: Metrics) -> Self {
        let client_id = client_id(&config.client_id_prefix);
        let mut options = MqttOptions::new(&client_id, &config.host, config.port);
        options.set_keep_alive(config.keep_alive());
        options.set_clean_session(true);

        let (client, event_loop) = AsyncClient::new(options, REQUEST_CHANNEL_CAPACITY);
        let (state_tx, _) = watch::channel(RelayState::Disconnected);

        Self {
            config,
            client_id,
            client,
            event_loop: Some(event_loop),
            handler: Arc::new(handler),
            state_tx: Arc::new(state_tx),
            metrics,
        }
    }

    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    pub fn state(&self) -> RelayState {
        *self.state_tx.borrow()
    }

    pub fn watch_state(&self) -> watch::Receiver<RelayState> {
        self.state_tx.subscribe()
    }

    /// Open the broker session and subscribe to `subscribe_topic`.
    ///
    /// Fails when the broker is unreachable, refuses the session, or sends no
    /// CONNACK within `connect_timeout`. A client gets one attempt.
    pub async fn connect(&mut self) -> RelayResult<ReceiveLoop<H>> {
        let broker = self.config.broker_addr();
        let Some(mut event_loop) = self.event_loop.take() else {
            return Err(RelayError::connection(broker, "connect was already attempted"));
        };

        self.state_tx.send_replace(RelayState::Connecting);
        info!("Connecting to broker {broker} as {}", self.client_id);

        let connect_timeout = self.config.connect_timeout();
        let outcome = match timeout(connect_timeout, wait_for_connack(&mut event_loop)).await {
            Ok(outcome) => outcome,
            Err(_) => Err(format!("no CONNACK within {connect_timeout:?}")),
        };
        if let Err(reason) = outcome {
            self.state_tx.send_replace(RelayState::Disconnected);
            return Err(RelayError::connection(broker, reason));
        }

        let topic = self.config.subscribe_topic.clone();
        if let Err(source) = self.client.subscribe(topic.as_str(), QoS::AtMostOnce).await {
            self.state_tx.send_replace(RelayState::Disconnected);
            return Err(RelayError::subscribe(topic, source));
        }

        self.state_tx.send_replace(RelayState::Connected);
        info!("Connected to broker {broker}, subscribed to `{topic}`");

        Ok(ReceiveLoop::new(
            self.client.clone(),
            event_loop,
            Arc::clone(&self.handler),
            Arc::clone(&self.state_tx),
            self.metrics.clone(),
        ))
    }

    /// Handle for publishing values to `publish_topic`
    pub fn publisher(&self) -> RelayPublisher {
        RelayPublisher::new(
            self.client.clone(),
            self.config.publish_topic.clone(),
            self.state_tx.subscribe(),
            self.metrics.clone(),
        )
    }

    /// Publish one value; failures are logged and the value dropped.
    pub fn on_value(&self, value: &pulse_core::Value) {
        self.publisher().on_value(value);
    }
}

async fn wait_for_connack(event_loop: &mut EventLoop) -> Result<(), String> {
    loop {
        match event_loop.poll().await {
            Ok(Event::Incoming(Packet::ConnAck(ack))) => {
                return match ack.code {
                    ConnectReturnCode::Success => Ok(()),
                    code => Err(format!("broker refused connection: {code:?}")),
                };
            }
            Ok(event) => debug!("Waiting for CONNACK, got {event:?}"),
            Err(ConnectionError::ConnectionRefused(code)) => {
                return Err(format!("broker refused connection: {code:?}"));
            }
            Err(e) => return Err(e.to_string()),
        }
    }
}
