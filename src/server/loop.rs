// Server loop module
// Accepts connections until shutdown, then drains in-flight connections

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;

use super::connection::accept_connection;
use super::signal::SignalHandler;
use crate::config::AppState;
use crate::logger;

const DRAIN_POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Accept loop
///
/// Runs until `signals` requests shutdown, then closes the listener and
/// waits up to `performance.shutdown_grace` seconds for active connections.
pub async fn start_server_loop(
    listener: TcpListener,
    state: Arc<AppState>,
    signals: Arc<SignalHandler>,
) {
    let active_connections = Arc::new(AtomicUsize::new(0));

    loop {
        tokio::select! {
            accept_result = listener.accept() => {
                match accept_result {
                    Ok((stream, peer_addr)) => {
                        accept_connection(stream, peer_addr, &state, &active_connections);
                    }
                    Err(e) => {
                        logger::log_error(&format!("Failed to accept connection: {e}"));
                    }
                }
            }

            () = signals.wait_for_shutdown() => break,
        }
    }

    drop(listener);
    logger::log_shutdown(active_connections.load(Ordering::SeqCst));

    let grace = Duration::from_secs(state.config.performance.shutdown_grace);
    if drain_connections(&active_connections, grace).await {
        logger::log_info("[Shutdown] All connections closed");
    } else {
        logger::log_warning(&format!(
            "[Shutdown] Grace period of {}s elapsed with {} connection(s) still active",
            grace.as_secs(),
            active_connections.load(Ordering::SeqCst)
        ));
    }
}

/// Wait until `counter` reaches zero or `grace` elapses
///
/// Returns whether all connections finished in time.
async fn drain_connections(counter: &AtomicUsize, grace: Duration) -> bool {
    let deadline = tokio::time::Instant::now() + grace;

    loop {
        if counter.load(Ordering::SeqCst) == 0 {
            return true;
        }
        if tokio::time::Instant::now() >= deadline {
            return false;
        }
        tokio::time::sleep(DRAIN_POLL_INTERVAL).await;
    }
}
