// Server loop module
// Accepts connections until shutdown is requested, then drains

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;

use super::connection::accept_connection;
use super::signal::SignalHandler;
use crate::config::AppState;
use crate::error::SiteError;
use crate::logger;

/// Interval between checks of the active connection count while draining
const DRAIN_POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Serve the site on `listener` until `shutdown` is triggered.
///
/// Must run inside a `LocalSet`: each connection is a `spawn_local` task.
/// After shutdown is requested the listener is closed and in-flight
/// connections get up to `performance.shutdown_timeout` seconds to finish.
#[allow(clippy::ignored_unit_patterns)]
pub async fn serve(
    listener: TcpListener,
    state: Arc<AppState>,
    shutdown: Arc<SignalHandler>,
) -> Result<(), SiteError> {
    let active_connections = Arc::new(AtomicUsize::new(0));

    loop {
        tokio::select! {
            accept_result = listener.accept() => {
                match accept_result {
                    Ok((stream, peer_addr)) => {
                        accept_connection(stream, peer_addr, &state, &active_connections);
                    }
                    Err(e) => logger::log_error(&format!("Failed to accept connection: {e}")),
                }
            }

            _ = shutdown.wait() => break,
        }
    }

    drop(listener);
    drain_connections(
        &active_connections,
        Duration::from_secs(state.config.performance.shutdown_timeout),
    )
    .await;
    Ok(())
}

/// Wait for active connections to finish, giving up after `timeout`
async fn drain_connections(active: &AtomicUsize, timeout: Duration) {
    logger::log_shutdown_started(active.load(Ordering::SeqCst));

    let deadline = tokio::time::Instant::now() + timeout;
    while active.load(Ordering::SeqCst) > 0 && tokio::time::Instant::now() < deadline {
        tokio::time::sleep(DRAIN_POLL_INTERVAL).await;
    }

    logger::log_shutdown_complete(active.load(Ordering::SeqCst));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_drain_returns_when_idle() {
        let active = AtomicUsize::new(0);
        tokio::time::timeout(
            Duration::from_secs(1),
            drain_connections(&active, Duration::from_secs(30)),
        )
        .await
        .unwrap();
    }

    #[tokio::test]
    async fn test_drain_gives_up_after_timeout() {
        let active = AtomicUsize::new(2);
        let started = tokio::time::Instant::now();
        drain_connections(&active, Duration::from_millis(200)).await;
        assert!(started.elapsed() >= Duration::from_millis(200));
        assert_eq!(active.load(Ordering::SeqCst), 2);
    }
}
