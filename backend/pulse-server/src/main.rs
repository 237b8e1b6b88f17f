use pulse_server::error::ServerError;
use pulse_server::{NoiseSource, build_router, control, logger};

use pulse_config::Config;
use pulse_hub::{
    AppState, BroadcastConfig, Broadcaster, ConnectionConfig, Metrics, ShutdownCoordinator,
    ValueTicker,
};
use pulse_relay::{ConsoleMessageHandler, RelayClient};

use std::error::Error;
use std::io::BufReader;
use std::net::SocketAddr;

use log::{info, warn};
use metrics_exporter_prometheus::PrometheusBuilder;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    dotenvy::dotenv().ok();

    // Load and validate configuration
    let config = Config::load()?;
    config.validate()?;

    let log_file_path = config.log_file_path()?;
    if let Some(log_dir) = log_file_path.as_deref().and_then(|path| path.parent()) {
        std::fs::create_dir_all(log_dir)?;
    }

    // Initialize logger (before any other logging)
    logger::initialize(config.logging.level, log_file_path, config.logging.colored)?;

    info!("Starting pulse-server v{}", env!("CARGO_PKG_VERSION"));
    config.log_summary();

    let prometheus = PrometheusBuilder::new()
        .install_recorder()
        .map_err(|e| ServerError::Metrics {
            message: e.to_string(),
        })?;

    let metrics = Metrics::new();
    let shutdown = ShutdownCoordinator::new();
    let broadcaster = Broadcaster::new(
        BroadcastConfig {
            queue_capacity: config.stream.queue_capacity,
        },
        metrics.clone(),
    );

    let ticker = ValueTicker::new(
        NoiseSource::new(),
        broadcaster.clone(),
        config.stream.tick_interval(),
    )
    .spawn(shutdown.subscribe_guard());

    // Relay failures at startup are fatal
    let relay_tasks: Option<(JoinHandle<()>, JoinHandle<u64>)> = if config.relay.enabled {
        let mut relay =
            RelayClient::new(config.relay.clone(), ConsoleMessageHandler, metrics.clone());
        let receive_loop = relay.connect().await.map_err(ServerError::from)?;
        let receiver = receive_loop.spawn(shutdown.subscribe_guard());
        let forwarder = relay
            .publisher()
            .spawn_forwarder(&broadcaster, shutdown.subscribe_guard());
        Some((receiver, forwarder))
    } else {
        info!("MQTT relay disabled");
        None
    };

    let app_state = AppState {
        broadcaster: broadcaster.clone(),
        metrics,
        shutdown: shutdown.clone(),
        config: ConnectionConfig {
            send_buffer_size: config.stream.send_buffer_size,
            resend_interval: config.stream.resend_interval(),
        },
    };
    let app = build_router(app_state, Some(prometheus));

    let listener = TcpListener::bind(config.bind_addr()).await?;
    let actual_addr = listener.local_addr()?;
    info!("Server listening on {}", actual_addr);

    control::spawn_signal_listener(shutdown.clone());
    if config.server.interactive {
        control::spawn_enter_listener(BufReader::new(std::io::stdin()), shutdown.clone());
        control::print_status(actual_addr, config.relay.enabled);
    }

    let mut server_guard = shutdown.subscribe_guard();
    let server = tokio::spawn(async move {
        axum::serve(
            listener,
            app.into_make_service_with_connect_info::<SocketAddr>(),
        )
        .with_graceful_shutdown(async move { server_guard.wait().await })
        .await
    });

    shutdown.subscribe_guard().wait().await;
    broadcaster.close();

    let shutdown_timeout = config.server.shutdown_timeout();
    let drained = tokio::time::timeout(shutdown_timeout, async {
        match server.await {
            Ok(Ok(())) => info!("HTTP server stopped"),
            Ok(Err(e)) => warn!("HTTP server error during shutdown: {e}"),
            Err(e) => warn!("HTTP server task failed: {e}"),
        }
        if let Ok(ticks) = ticker.await {
            info!("Published {ticks} values");
        }
        if let Some((receiver, forwarder)) = relay_tasks {
            let _ = receiver.await;
            if let Ok(forwarded) = forwarder.await {
                info!("Relayed {forwarded} values");
            }
        }
    })
    .await;

    match drained {
        Ok(()) => info!("Graceful shutdown complete"),
        Err(_) => warn!("Shutdown did not finish within {shutdown_timeout:?}, exiting"),
    }

    Ok(())
}
