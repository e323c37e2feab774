// Connection handling module
// Accepts a single TCP connection and serves HTTP/1.1 on it

use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use http_body_util::Full;
use hyper::body::{Body, Bytes, Incoming};
use hyper::header::{REFERER, USER_AGENT};
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper::{Request, Response, Version};
use hyper_util::rt::{TokioIo, TokioTimer};

use crate::config::{AppState, PerformanceConfig};
use crate::handler;
use crate::logger::{self, AccessLogEntry};

/// Accept and process a connection, checking limits and logging.
///
/// # Arguments
///
/// * `stream` - The TCP stream to handle
/// * `peer_addr` - The peer's socket address
/// * `state` - Shared application state
/// * `conn_counter` - Active connection counter
pub fn accept_connection(
    stream: tokio::net::TcpStream,
    peer_addr: SocketAddr,
    state: &Arc<AppState>,
    conn_counter: &Arc<AtomicUsize>,
) {
    // Increment counter first, then check limit (prevents race condition)
    let prev_count = conn_counter.fetch_add(1, Ordering::SeqCst);

    if let Some(max_conn) = state.config.performance.max_connections {
        if prev_count >= usize::try_from(max_conn).unwrap_or(usize::MAX) {
            // Exceeded limit: rollback counter and reject
            conn_counter.fetch_sub(1, Ordering::SeqCst);
            logger::log_warning(&format!(
                "Max connections reached: {prev_count}/{max_conn}. Connection from {peer_addr} rejected."
            ));
            drop(stream);
            return;
        }
    }

    logger::log_connection_accepted(&peer_addr);

    handle_connection(
        stream,
        peer_addr,
        Arc::clone(state),
        Arc::clone(conn_counter),
    );
}

/// Handle a single connection in a spawned task.
///
/// This function:
/// 1. Wraps the TCP stream in `TokioIo`
/// 2. Configures HTTP/1.1 connection settings (keep-alive, header timeout)
/// 3. Serves the connection with the request handler
/// 4. Applies the overall connection deadline, if any
/// 5. Decrements connection counter when done
fn handle_connection(
    stream: tokio::net::TcpStream,
    peer_addr: SocketAddr,
    state: Arc<AppState>,
    conn_counter: Arc<AtomicUsize>,
) {
    tokio::task::spawn_local(async move {
        let io = TokioIo::new(stream);

        let perf = &state.config.performance;
        let deadline = connection_deadline(perf);

        let mut builder = http1::Builder::new();
        builder.keep_alive(perf.keep_alive_timeout > 0);
        if perf.read_timeout > 0 {
            builder
                .timer(TokioTimer::new())
                .header_read_timeout(Duration::from_secs(perf.read_timeout));
        }

        let service_state = Arc::clone(&state);
        let conn = builder.serve_connection(
            io,
            service_fn(move |req| serve_request(req, Arc::clone(&service_state), peer_addr)),
        );

        let result = match deadline {
            Some(limit) => tokio::time::timeout(limit, conn).await,
            None => Ok(conn.await),
        };
        match result {
            Ok(Ok(())) => {}
            Ok(Err(err)) => logger::log_connection_error(&err),
            Err(_) => {
                logger::log_debug(&format!(
                    "Connection from {peer_addr} closed after {} seconds",
                    deadline.map_or(0, |d| d.as_secs())
                ));
            }
        }

        conn_counter.fetch_sub(1, Ordering::SeqCst);
    });
}

/// Lifetime cap for a whole connection, keep-alive included
///
/// `max(read_timeout, write_timeout)` seconds. The cap ends idle keep-alive
/// connections even when `keep_alive_timeout` is longer. Zero means no cap.
fn connection_deadline(perf: &PerformanceConfig) -> Option<Duration> {
    match std::cmp::max(perf.read_timeout, perf.write_timeout) {
        0 => None,
        secs => Some(Duration::from_secs(secs)),
    }
}

/// Run one request through the router, writing an access log line if enabled
async fn serve_request(
    req: Request<Incoming>,
    state: Arc<AppState>,
    peer_addr: SocketAddr,
) -> Result<Response<Full<Bytes>>, Infallible> {
    if !state.access_log() {
        return handler::handle_request(req, state).await;
    }

    let started = Instant::now();
    let mut entry = access_entry(&req, peer_addr);

    let resp = handler::handle_request(req, Arc::clone(&state)).await?;

    entry.status = resp.status().as_u16();
    entry.body_bytes = resp.body().size_hint().exact().unwrap_or(0);
    entry.request_time_us = u64::try_from(started.elapsed().as_micros()).unwrap_or(u64::MAX);
    logger::log_access(&entry, &state.config.logging.access_log_format);

    Ok(resp)
}

fn access_entry<B>(req: &Request<B>, peer_addr: SocketAddr) -> AccessLogEntry {
    let header = |name| {
        req.headers()
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(ToString::to_string)
    };

    let mut entry = AccessLogEntry::new(
        peer_addr.ip().to_string(),
        req.method().to_string(),
        req.uri().path().to_string(),
    );
    entry.query = req.uri().query().map(ToString::to_string);
    entry.http_version = version_label(req.version()).to_string();
    entry.referer = header(REFERER);
    entry.user_agent = header(USER_AGENT);
    entry
}

fn version_label(version: Version) -> &'static str {
    match version {
        Version::HTTP_09 => "0.9",
        Version::HTTP_10 => "1.0",
        Version::HTTP_2 => "2",
        Version::HTTP_3 => "3",
        _ => "1.1",
    }
}
