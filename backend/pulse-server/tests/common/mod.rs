#![allow(dead_code)]

//! Test infrastructure for pulse-server route tests

use pulse_hub::{
    AppState, BroadcastConfig, Broadcaster, ConnectionConfig, Metrics, ShutdownCoordinator,
};

use std::time::Duration;

/// Create AppState for testing
pub fn create_test_app_state() -> AppState {
    let metrics = Metrics::new();
    AppState {
        broadcaster: Broadcaster::new(BroadcastConfig::default(), metrics.clone()),
        metrics,
        shutdown: ShutdownCoordinator::new(),
        config: ConnectionConfig {
            send_buffer_size: 4,
            resend_interval: Duration::from_secs(10),
        },
    }
}
