use pulse_core::Value;
use pulse_hub::AppState;

use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

/// GET /health - Hub status and the latest value
pub async fn health(State(state): State<AppState>) -> Response {
    let status = if state.shutdown.is_shutdown() {
        "shutting_down"
    } else {
        "healthy"
    };

    let health = json!({
        "status": status,
        "version": env!("CARGO_PKG_VERSION"),
        "subscribers": state.broadcaster.subscriber_count(),
        "current": state.broadcaster.current().as_ref().map(current_json),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    });

    (StatusCode::OK, Json(health)).into_response()
}

fn current_json(value: &Value) -> serde_json::Value {
    json!({
        "time": value.time_of_day(),
        "value": value.payload(),
    })
}

/// GET /live - Liveness probe
pub async fn liveness() -> Response {
    (StatusCode::OK, "OK").into_response()
}

/// GET /ready - Readiness probe, fails once shutdown has started
pub async fn readiness(State(state): State<AppState>) -> Response {
    if state.shutdown.is_shutdown() || state.broadcaster.is_closed() {
        return (StatusCode::SERVICE_UNAVAILABLE, "Shutting down").into_response();
    }
    (StatusCode::OK, "Ready").into_response()
}
