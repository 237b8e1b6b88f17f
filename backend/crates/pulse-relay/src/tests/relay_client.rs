use super::{
    CONNACK_ACCEPTED, CONNACK_NOT_AUTHORIZED, fake_broker, publish_packet, relay_config,
    silent_broker,
};
use crate::{
    ConsoleMessageHandler, REQUEST_CHANNEL_CAPACITY, RelayClient, RelayError, RelayState,
    client_id,
};

use pulse_config::RelayConfig;
use pulse_core::Value;
use pulse_hub::{Metrics, ShutdownCoordinator};

use std::sync::{Arc, Mutex};

use tokio::time::{Duration, sleep, timeout};

type Seen = Arc<Mutex<Vec<(String, Vec<u8>)>>>;

fn recording_handler() -> (Seen, impl Fn(&str, &[u8]) + Send + Sync + 'static) {
    let seen: Seen = Arc::new(Mutex::new(Vec::new()));
    let handler = {
        let seen = Arc::clone(&seen);
        move |topic: &str, payload: &[u8]| {
            seen.lock().unwrap().push((topic.to_string(), payload.to_vec()));
        }
    };
    (seen, handler)
}

#[test]
fn given_prefix_when_client_id_generated_then_suffix_in_range() {
    for _ in 0..100 {
        let id = client_id("publish");
        let suffix = id.strip_prefix("publish-").unwrap();
        let n: u32 = suffix.parse().unwrap();
        assert!(n <= 1000, "suffix out of range: {id}");
    }
}

#[tokio::test]
async fn given_new_client_when_inspected_then_disconnected() {
    let client = RelayClient::new(RelayConfig::default(), ConsoleMessageHandler, Metrics::new());

    assert_eq!(client.state(), RelayState::Disconnected);
    assert!(client.client_id().starts_with("publish-"));
}

#[tokio::test]
async fn given_unreachable_broker_when_connecting_then_connection_error_and_disconnected() {
    let config = RelayConfig {
        enabled: true,
        host: "127.0.0.1".to_string(),
        port: 1,
        connect_timeout_secs: 2,
        ..RelayConfig::default()
    };
    let mut client = RelayClient::new(config, ConsoleMessageHandler, Metrics::new());

    let result = client.connect().await;

    assert!(matches!(result, Err(RelayError::Connection { .. })));
    assert_eq!(client.state(), RelayState::Disconnected);
}

#[tokio::test]
async fn given_failed_connect_when_connecting_again_then_connection_error() {
    let config = RelayConfig {
        port: 1,
        connect_timeout_secs: 1,
        ..RelayConfig::default()
    };
    let mut client = RelayClient::new(config, ConsoleMessageHandler, Metrics::new());
    let _ = client.connect().await;

    let again = client.connect().await;

    assert!(matches!(again, Err(RelayError::Connection { .. })));
}

#[tokio::test]
async fn given_broker_refuses_session_when_connecting_then_connection_error() {
    let (addr, _broker) = fake_broker(CONNACK_NOT_AUTHORIZED, Vec::new(), true).await;
    let mut client = RelayClient::new(relay_config(addr), ConsoleMessageHandler, Metrics::new());

    let result = client.connect().await;

    match result {
        Err(RelayError::Connection { reason, .. }) => {
            assert!(reason.contains("refused"), "unexpected reason: {reason}")
        }
        Err(other) => panic!("unexpected error: {other}"),
        Ok(_) => panic!("connect should fail"),
    }
    assert_eq!(client.state(), RelayState::Disconnected);
}

#[tokio::test]
async fn given_broker_never_acknowledges_when_connecting_then_times_out_disconnected() {
    let (addr, _broker) = silent_broker().await;
    let config = RelayConfig {
        connect_timeout_secs: 1,
        ..relay_config(addr)
    };
    let mut client = RelayClient::new(config, ConsoleMessageHandler, Metrics::new());

    let result = timeout(Duration::from_secs(3), client.connect())
        .await
        .expect("connect ignored its own timeout");

    match result {
        Err(RelayError::Connection { reason, .. }) => {
            assert!(reason.contains("no CONNACK"), "unexpected reason: {reason}")
        }
        Err(other) => panic!("unexpected error: {other}"),
        Ok(_) => panic!("connect should fail"),
    }
    assert_eq!(client.state(), RelayState::Disconnected);
}

#[tokio::test]
async fn given_request_channel_full_when_publishing_then_publish_error_and_value_dropped() {
    let (addr, _broker) = fake_broker(CONNACK_ACCEPTED, Vec::new(), true).await;
    let mut client = RelayClient::new(relay_config(addr), ConsoleMessageHandler, Metrics::new());
    // Not spawned: nothing drains the request channel.
    let _receive_loop = client.connect().await.unwrap();
    let publisher = client.publisher();

    let mut accepted = 0;
    let failure = loop {
        match publisher.publish_value(&Value::now(accepted as u32)) {
            Ok(_) => accepted += 1,
            Err(e) => break e,
        }
        assert!(accepted <= REQUEST_CHANNEL_CAPACITY, "request channel never filled");
    };

    assert!(matches!(failure, RelayError::Publish { .. }), "unexpected error: {failure}");
    client.on_value(&Value::now(99));
    assert_eq!(client.state(), RelayState::Connected);
}

#[tokio::test]
async fn given_not_connected_when_publishing_then_value_rejected() {
    let client = RelayClient::new(RelayConfig::default(), ConsoleMessageHandler, Metrics::new());

    let result = client.publisher().publish_value(&Value::now(3.5));

    assert!(matches!(
        result,
        Err(RelayError::NotConnected {
            state: RelayState::Disconnected,
            ..
        })
    ));
    client.on_value(&Value::now(3.5));
}

#[tokio::test]
async fn given_accepting_broker_when_connected_then_inbound_publish_reaches_handler() {
    let (addr, _broker) =
        fake_broker(CONNACK_ACCEPTED, publish_packet("measures", b"hello"), true).await;
    let (seen, handler) = recording_handler();
    let mut client = RelayClient::new(relay_config(addr), handler, Metrics::new());
    let coordinator = ShutdownCoordinator::new();

    let receive_loop = client.connect().await.unwrap();
    assert_eq!(client.state(), RelayState::Connected);
    let task = receive_loop.spawn(coordinator.subscribe_guard());

    timeout(Duration::from_secs(2), async {
        while seen.lock().unwrap().is_empty() {
            sleep(Duration::from_millis(10)).await;
        }
    })
    .await
    .unwrap();
    assert_eq!(
        seen.lock().unwrap()[0],
        ("measures".to_string(), b"hello".to_vec())
    );

    let sent = client.publisher().publish_value(&Value::now(12.5)).unwrap();
    assert_eq!(sent, "12.5");

    coordinator.shutdown();
    timeout(Duration::from_secs(2), task).await.unwrap().unwrap();
    assert_eq!(client.state(), RelayState::Disconnected);
}

#[tokio::test]
async fn given_broker_drops_connection_when_receiving_then_state_disconnected() {
    let (addr, broker) = fake_broker(CONNACK_ACCEPTED, Vec::new(), false).await;
    let mut client = RelayClient::new(relay_config(addr), ConsoleMessageHandler, Metrics::new());
    let coordinator = ShutdownCoordinator::new();
    let mut state = client.watch_state();

    let receive_loop = client.connect().await.unwrap();
    let task = receive_loop.spawn(coordinator.subscribe_guard());
    broker.await.unwrap();

    timeout(Duration::from_secs(2), task).await.unwrap().unwrap();
    assert_eq!(*state.borrow_and_update(), RelayState::Disconnected);
}

#[tokio::test]
async fn given_connected_relay_when_forwarding_then_hub_values_published() {
    let (addr, _broker) = fake_broker(CONNACK_ACCEPTED, Vec::new(), true).await;
    let mut client = RelayClient::new(relay_config(addr), ConsoleMessageHandler, Metrics::new());
    let coordinator = ShutdownCoordinator::new();
    let broadcaster = pulse_hub::Broadcaster::new(Default::default(), Metrics::new());

    let _receive_loop = client
        .connect()
        .await
        .unwrap()
        .spawn(coordinator.subscribe_guard());
    let forwarder = client
        .publisher()
        .spawn_forwarder(&broadcaster, coordinator.subscribe_guard());

    assert_eq!(broadcaster.publish(Value::now(1)), 1);
    assert_eq!(broadcaster.publish(Value::now(2)), 1);
    sleep(Duration::from_millis(50)).await;
    broadcaster.close();

    let forwarded = timeout(Duration::from_secs(2), forwarder)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(forwarded, 2);
}
