// Signal handling module
//
// Supported signals:
// - SIGTERM: Graceful shutdown
// - SIGINT:  Graceful shutdown (Ctrl+C)

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::Notify;

use crate::logger;

/// Shutdown coordination shared between the signal task and the server loop
#[derive(Debug, Default)]
pub struct SignalHandler {
    shutdown: Notify,
    shutdown_requested: AtomicBool,
}

impl SignalHandler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request a graceful shutdown
    ///
    /// Safe to call more than once; the server loop is woken even if it was
    /// not waiting at the time.
    pub fn trigger(&self) {
        if !self.shutdown_requested.swap(true, Ordering::SeqCst) {
            self.shutdown.notify_one();
        }
    }

    pub fn is_shutdown_requested(&self) -> bool {
        self.shutdown_requested.load(Ordering::SeqCst)
    }

    /// Wait until shutdown has been requested
    pub async fn wait(&self) {
        if self.is_shutdown_requested() {
            return;
        }
        self.shutdown.notified().await;
    }
}

/// Start signal handlers (Unix)
///
/// Spawns a background task that turns SIGTERM and SIGINT into a graceful
/// shutdown request.
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
            "Signal handlers registered (SIGTERM, SIGINT), pid {}",
            std::process::id()
        ));

        tokio::select! {
            _ = sigterm.recv() => logger::log_info("SIGTERM received, shutting down gracefully"),
            _ = sigint.recv() => logger::log_info("SIGINT received, shutting down gracefully"),
        }
        handler.trigger();
    });
}

/// Non-Unix fallback - only handles Ctrl+C
#[cfg(not(unix))]
pub fn start_signal_handler(handler: Arc<SignalHandler>) {
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                logger::log_info("Ctrl+C received, shutting down gracefully");
                handler.trigger();
            }
            Err(e) => logger::log_error(&format!("Failed to listen for Ctrl+C: {e}")),
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_trigger_before_wait() {
        let handler = SignalHandler::new();
        handler.trigger();
        handler.trigger();
        assert!(handler.is_shutdown_requested());
        tokio::time::timeout(Duration::from_secs(1), handler.wait())
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_trigger_wakes_waiter() {
        let handler = Arc::new(SignalHandler::new());
        let waiter = {
            let handler = Arc::clone(&handler);
            tokio::spawn(async move { handler.wait().await })
        };
        tokio::task::yield_now().await;
        handler.trigger();
        tokio::time::timeout(Duration::from_secs(1), waiter)
            .await
            .unwrap()
            .unwrap();
    }
}
