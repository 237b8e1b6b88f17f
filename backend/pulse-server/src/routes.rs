use crate::{health, index, metrics_endpoint};

use pulse_hub::AppState;

use axum::{Router, routing::get};
use metrics_exporter_prometheus::PrometheusHandle;
use tower_http::cors::{Any, CorsLayer};

/// Build the application router with all endpoints
pub fn build_router(state: AppState, prometheus: Option<PrometheusHandle>) -> Router {
    let metrics = Router::new()
        .route("/metrics", get(metrics_endpoint::render))
        .with_state(prometheus);

    Router::new()
        .route("/", get(index::index))
        .route("/chart-data", get(pulse_hub::chart_data))
        // Health check endpoints
        .route("/health", get(health::health))
        .route("/live", get(health::liveness))
        .route("/ready", get(health::readiness))
        .with_state(state)
        .merge(metrics)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
}
