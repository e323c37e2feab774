// Server module entry point
// Binds the listener, installs signal handling and runs the accept loop

pub mod connection;
pub mod listener;
pub mod signal;

// `loop` is a keyword, so the module is named server_loop
#[path = "loop.rs"]
pub mod server_loop;

use std::sync::Arc;

use crate::config::{AppState, Config};
use crate::error::SiteError;
use crate::logger;

// Re-export commonly used items
pub use listener::create_listener;
pub use server_loop::serve;
pub use signal::{start_signal_handler, SignalHandler};

/// Run the site until SIGTERM/SIGINT
///
/// Binds `server.host:server.port`, then serves connections on a `LocalSet`
/// until a shutdown signal arrives and in-flight requests have drained.
pub async fn run(cfg: Config) -> Result<(), SiteError> {
    let addr = cfg.get_socket_addr()?;
    let listener = create_listener(addr)?;
    let state = Arc::new(AppState::new(&cfg));

    logger::log_server_start(&listener.local_addr()?, &cfg);

    let shutdown = Arc::new(SignalHandler::new());
    start_signal_handler(Arc::clone(&shutdown));

    let local = tokio::task::LocalSet::new();
    local.run_until(serve(listener, state, shutdown)).await
}
