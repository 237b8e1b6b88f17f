use crate::{
    Broadcaster, ChannelWriter, ConnectionConfig, Metrics, ShutdownCoordinator, StreamEndpoint,
};

use std::convert::Infallible;
use std::net::SocketAddr;

use axum::{
    body::Body,
    extract::{ConnectInfo, Request, State},
    http::{HeaderMap, HeaderName, header},
    response::{IntoResponse, Response},
};
use futures::stream;
use log::{debug, info};
use tokio::sync::mpsc;

const X_FORWARDED_FOR: HeaderName = HeaderName::from_static("x-forwarded-for");
const X_ACCEL_BUFFERING: HeaderName = HeaderName::from_static("x-accel-buffering");

/// Shared application state for HTTP handlers
#[derive(Clone)]
pub struct AppState {
    pub broadcaster: Broadcaster,
    pub metrics: Metrics,
    pub shutdown: ShutdownCoordinator,
    pub config: ConnectionConfig,
}

/// Server-sent event stream of chart frames
pub async fn chart_data(State(state): State<AppState>, request: Request) -> Response {
    let peer = request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| *addr);
    let client = client_addr(request.headers(), peer);
    info!("Client {client} connected");

    let (tx, rx) = mpsc::channel::<String>(state.config.send_buffer_size.max(1));
    let endpoint = StreamEndpoint::new(
        state.broadcaster.clone(),
        state.config.clone(),
        state.metrics.clone(),
        client.clone(),
    );
    let shutdown_guard = state.shutdown.subscribe_guard();

    tokio::spawn(async move {
        match endpoint.run(ChannelWriter::new(tx), shutdown_guard).await {
            Ok(()) => info!("Client {client} disconnected"),
            Err(e) => info!("Client {client} disconnected: {e}"),
        }
    });

    let body = Body::from_stream(stream::unfold(rx, |mut rx| async move {
        let frame = rx.recv().await?;
        Some((Ok::<_, Infallible>(frame), rx))
    }));

    debug!("Opened event stream");
    (
        [
            (header::CONTENT_TYPE, "text/event-stream"),
            (header::CACHE_CONTROL, "no-cache"),
            (X_ACCEL_BUFFERING, "no"),
        ],
        body,
    )
        .into_response()
}

/// Client address for logging: first `X-Forwarded-For` entry, else the peer
/// IP, else `"unknown"`.
pub fn client_addr(headers: &HeaderMap, peer: Option<SocketAddr>) -> String {
    headers
        .get(X_FORWARDED_FOR)
        .and_then(|h| h.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(String::from)
        .or_else(|| peer.map(|addr| addr.ip().to_string()))
        .unwrap_or_else(|| "unknown".to_string())
}
