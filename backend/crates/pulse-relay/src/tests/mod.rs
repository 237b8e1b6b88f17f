mod message_handler;
mod relay_client;

use pulse_config::RelayConfig;

use std::net::SocketAddr;
use std::time::Duration;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

pub(crate) const CONNACK_ACCEPTED: u8 = 0x00;
pub(crate) const CONNACK_NOT_AUTHORIZED: u8 = 0x05;

/// Single-connection broker stand-in: answers CONNECT with a CONNACK carrying
/// `return_code`, writes `then_send`, and keeps the socket open while
/// `hold_open` is set.
pub(crate) async fn fake_broker(
    return_code: u8,
    then_send: Vec<u8>,
    hold_open: bool,
) -> (SocketAddr, JoinHandle<()>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let handle = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut buf = [0u8; 512];
        let _ = socket.read(&mut buf).await;
        socket
            .write_all(&[0x20, 0x02, 0x00, return_code])
            .await
            .unwrap();

        if !then_send.is_empty() {
            tokio::time::sleep(Duration::from_millis(50)).await;
            socket.write_all(&then_send).await.unwrap();
        }

        if hold_open {
            while let Ok(n) = socket.read(&mut buf).await {
                if n == 0 {
                    break;
                }
            }
        }
    });

    (addr, handle)
}

/// Accepts one connection, reads the CONNECT and never answers it.
pub(crate) async fn silent_broker() -> (SocketAddr, JoinHandle<()>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let handle = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut buf = [0u8; 512];
        while let Ok(n) = socket.read(&mut buf).await {
            if n == 0 {
                break;
            }
        }
    });

    (addr, handle)
}

/// SUBACK for packet id 1 carrying one return code per filter
pub(crate) fn suback_packet(return_codes: &[u8]) -> Vec<u8> {
    let mut packet = vec![0x90, 2 + return_codes.len() as u8, 0x00, 0x01];
    packet.extend_from_slice(return_codes);
    packet
}

/// QoS 0 PUBLISH packet
pub(crate) fn publish_packet(topic: &str, payload: &[u8]) -> Vec<u8> {
    let remaining = 2 + topic.len() + payload.len();
    let mut packet = vec![0x30, remaining as u8, 0x00, topic.len() as u8];
    packet.extend_from_slice(topic.as_bytes());
    packet.extend_from_slice(payload);
    packet
}

pub(crate) fn relay_config(addr: SocketAddr) -> RelayConfig {
    RelayConfig {
        enabled: true,
        host: addr.ip().to_string(),
        port: addr.port(),
        connect_timeout_secs: 2,
        ..RelayConfig::default()
    }
}
