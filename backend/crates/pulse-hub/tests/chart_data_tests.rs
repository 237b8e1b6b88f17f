use pulse_core::Value;
use pulse_hub::{
    AppState, BroadcastConfig, Broadcaster, ConnectionConfig, Metrics, ShutdownCoordinator,
    chart_data,
};

use std::time::Duration;

use axum::{Router, body::Body, http::Request, routing::get};
use http_body_util::BodyExt;
use tokio::time::{sleep, timeout};
use tower::ServiceExt;

fn state() -> AppState {
    let metrics = Metrics::new();
    AppState {
        broadcaster: Broadcaster::new(BroadcastConfig { queue_capacity: 4 }, metrics.clone()),
        metrics,
        shutdown: ShutdownCoordinator::new(),
        config: ConnectionConfig {
            send_buffer_size: 4,
            resend_interval: Duration::from_secs(10),
        },
    }
}

fn router(state: AppState) -> Router {
    Router::new()
        .route("/chart-data", get(chart_data))
        .with_state(state)
}

#[tokio::test]
async fn given_chart_request_when_value_published_then_event_stream_frame_received() {
    let state = state();
    let broadcaster = state.broadcaster.clone();

    let response = router(state.clone())
        .oneshot(
            Request::builder()
                .uri("/chart-data")
                .header("x-forwarded-for", "198.51.100.4")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), 200);
    assert_eq!(response.headers()["content-type"], "text/event-stream");
    assert_eq!(response.headers()["cache-control"], "no-cache");
    assert_eq!(response.headers()["x-accel-buffering"], "no");

    timeout(Duration::from_secs(1), async {
        while broadcaster.subscriber_count() == 0 {
            sleep(Duration::from_millis(5)).await;
        }
    })
    .await
    .unwrap();
    broadcaster.publish(Value::now(17.5));

    let mut body = response.into_body();
    let frame = timeout(Duration::from_secs(1), body.frame())
        .await
        .unwrap()
        .unwrap()
        .unwrap()
        .into_data()
        .unwrap();
    let text = String::from_utf8(frame.to_vec()).unwrap();

    assert!(text.starts_with("data:{\"time\":\""), "unexpected frame {text}");
    assert!(text.ends_with(",\"value\":17.5}\n\n"), "unexpected frame {text}");

    state.shutdown.shutdown();
}

#[tokio::test]
async fn given_open_stream_when_body_dropped_then_subscriber_released() {
    let state = state();
    let broadcaster = state.broadcaster.clone();

    let response = router(state)
        .oneshot(
            Request::builder()
                .uri("/chart-data")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    timeout(Duration::from_secs(1), async {
        while broadcaster.subscriber_count() == 0 {
            sleep(Duration::from_millis(5)).await;
        }
    })
    .await
    .unwrap();

    drop(response);

    timeout(Duration::from_secs(1), async {
        while broadcaster.subscriber_count() != 0 {
            sleep(Duration::from_millis(5)).await;
        }
    })
    .await
    .unwrap();
}
