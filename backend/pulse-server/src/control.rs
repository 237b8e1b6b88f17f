use pulse_core::print_block;
use pulse_hub::ShutdownCoordinator;

use std::io::BufRead;
use std::net::SocketAddr;
use std::thread;

use log::{debug, error, info};
use tokio::task::JoinHandle;

/// Trigger shutdown on SIGINT (Ctrl+C)
pub fn spawn_signal_listener(shutdown: ShutdownCoordinator) -> JoinHandle<()> {
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                info!("Received SIGINT (Ctrl+C), initiating graceful shutdown");
                shutdown.shutdown();
            }
            Err(e) => {
                error!("Failed to listen for SIGINT: {}", e);
            }
        }
    })
}

/// Trigger shutdown when the operator presses Enter.
///
/// Runs on a plain thread so a pending read never holds up runtime shutdown.
/// End of input (stdin closed or redirected from an empty file) is not a
/// request to exit; the process then runs until a signal arrives.
pub fn spawn_enter_listener<R>(mut input: R, shutdown: ShutdownCoordinator) -> thread::JoinHandle<()>
where
    R: BufRead + Send + 'static,
{
    thread::spawn(move || {
        let mut line = String::new();
        match input.read_line(&mut line) {
            Ok(0) => debug!("Stdin closed, waiting for a signal to exit"),
            Ok(_) => {
                info!("Enter pressed, initiating graceful shutdown");
                shutdown.shutdown();
            }
            Err(e) => error!("Failed to read stdin: {e}"),
        }
    })
}

/// Operator status printed once the listener is bound
pub fn status_lines(addr: SocketAddr, relay_enabled: bool) -> Vec<String> {
    let mut lines = vec![format!("Streaming chart data on http://{addr}/")];
    if relay_enabled {
        lines.push("Relaying values to the MQTT broker".to_string());
    }
    lines.push("Press Enter to exit".to_string());
    lines
}

pub fn print_status(addr: SocketAddr, relay_enabled: bool) {
    print_block(&status_lines(addr, relay_enabled));
}
