// Signal handling module
//
// Supported signals:
// - SIGTERM: Graceful shutdown
// - SIGINT:  Graceful shutdown (Ctrl+C)

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::Notify;

use crate::logger;

/// Signal handler state
pub struct SignalHandler {
    /// Shutdown signal (SIGTERM, SIGINT)
    pub shutdown: Notify,
    /// Whether shutdown has been requested
    pub shutdown_requested: AtomicBool,
}

impl SignalHandler {
    pub fn new() -> Self {
        Self {
            shutdown: Notify::new(),
            shutdown_requested: AtomicBool::new(false),
        }
    }

    /// Request shutdown; a later `wait_for_shutdown` returns immediately
    pub fn trigger_shutdown(&self) {
        self.shutdown_requested.store(true, Ordering::SeqCst);
        self.shutdown.notify_one();
    }

    pub fn is_shutdown_requested(&self) -> bool {
        self.shutdown_requested.load(Ordering::SeqCst)
    }

    pub async fn wait_for_shutdown(&self) {
        if self.is_shutdown_requested() {
            return;
        }
        self.shutdown.notified().await;
    }
}

impl Default for SignalHandler {
    fn default() -> Self {
        Self::new()
    }
}

/// Start signal handlers (Unix only)
///
/// | Signal  | Action        |
/// |---------|---------------|
/// | SIGTERM | Graceful stop |
/// | SIGINT  | Graceful stop |
#[cfg(unix)]
pub fn start_signal_handler(handler: Arc<SignalHandler>) {
    use tokio::signal::unix::{signal, SignalKind};

    tokio::spawn(async move {
        let (mut sigterm, mut sigint) =
            match (signal(SignalKind::terminate()), signal(SignalKind::interrupt())) {
                (Ok(term), Ok(int)) => (term, int),
                (Err(e), _) | (_, Err(e)) => {
                    logger::log_error(&format!("Failed to register signal handlers: {e}"));
                    return;
                }
            };

        logger::log_info(&format!(
            "[SIGNAL] SIGTERM/SIGINT trigger graceful shutdown (pid {})",
            std::process::id()
        ));

        let name = tokio::select! {
            _ = sigterm.recv() => "SIGTERM",
            _ = sigint.recv() => "SIGINT",
        };

        logger::log_info(&format!("[SIGNAL] {name} received, shutting down"));
        handler.trigger_shutdown();
    });
}

/// Non-Unix fallback - only handles Ctrl+C
#[cfg(not(unix))]
pub fn start_signal_handler(handler: Arc<SignalHandler>) {
    tokio::spawn(async move {
        if let Ok(()) = tokio::signal::ctrl_c().await {
            logger::log_info("[SIGNAL] Ctrl+C received, shutting down");
            handler.trigger_shutdown();
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_shutdown_before_wait_is_not_lost() {
        let handler = SignalHandler::new();
        handler.trigger_shutdown();
        assert!(handler.is_shutdown_requested());
        tokio::time::timeout(Duration::from_secs(1), handler.wait_for_shutdown())
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_wait_wakes_on_trigger() {
        let handler = Arc::new(SignalHandler::new());
        let waiter = {
            let handler = Arc::clone(&handler);
            tokio::spawn(async move { handler.wait_for_shutdown().await })
        };
        tokio::task::yield_now().await;
        handler.trigger_shutdown();
        tokio::time::timeout(Duration::from_secs(1), waiter)
            .await
            .unwrap()
            .unwrap();
    }
}
