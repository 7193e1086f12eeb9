// Connection handling module
// Accepts a single TCP connection and serves it with hyper

use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper_util::rt::TokioIo;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{watch, Notify};
use tokio::time::Instant;

use crate::config;
use crate::handler;
use crate::logger;

/// Accept and process a connection, checking limits and logging.
///
/// # Arguments
///
/// * `stream` - The TCP stream to handle
/// * `peer_addr` - The peer's socket address
/// * `state` - Shared application state
/// * `conn_counter` - Active connection counter
/// * `shutdown` - Flips to `true` when the server stops accepting
pub fn accept_connection(
    stream: tokio::net::TcpStream,
    peer_addr: std::net::SocketAddr,
    state: &Arc<config::AppState>,
    conn_counter: &Arc<AtomicUsize>,
    shutdown: watch::Receiver<bool>,
) {
    // Increment counter first, then check limit (prevents race condition)
    let prev_count = conn_counter.fetch_add(1, Ordering::SeqCst);

    if let Some(max_conn) = state.config.performance.max_connections {
        if prev_count >= usize::try_from(max_conn).unwrap_or(usize::MAX) {
            // Exceeded limit: rollback counter and reject
            conn_counter.fetch_sub(1, Ordering::SeqCst);
            logger::log_warning(&format!(
                "Max connections reached: {prev_count}/{max_conn}. Connection rejected."
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
        shutdown,
    );
}

/// Handle a single connection in a spawned task.
///
/// This function:
/// 1. Wraps the TCP stream in `TokioIo`
/// 2. Serves the connection with the request handler
/// 3. Closes the connection gracefully once it has been idle for
///    `keep_alive_timeout` or the server shuts down
/// 4. Drops the connection at the hard deadline (max of read/write timeout)
/// 5. Decrements connection counter when done
fn handle_connection(
    stream: tokio::net::TcpStream,
    peer_addr: std::net::SocketAddr,
    state: Arc<config::AppState>,
    conn_counter: Arc<AtomicUsize>,
    mut shutdown: watch::Receiver<bool>,
) {
    tokio::spawn(async move {
        let io = TokioIo::new(stream);

        let performance = &state.config.performance;
        let timeout_duration = Duration::from_secs(std::cmp::max(
            performance.read_timeout,
            performance.write_timeout,
        ));
        let keep_alive = performance.keep_alive_timeout > 0;
        // Without keep-alive hyper closes after one response; the idle timer stays parked
        let idle_timeout = if keep_alive {
            Duration::from_secs(performance.keep_alive_timeout)
        } else {
            timeout_duration
        };

        let mut builder = http1::Builder::new();
        builder.keep_alive(keep_alive);

        // Notified at the start of every request to push the idle deadline back
        let activity = Arc::new(Notify::new());
        let service_activity = Arc::clone(&activity);
        let service_state = Arc::clone(&state);
        let conn = builder.serve_connection(
            io,
            service_fn(move |req| {
                service_activity.notify_one();
                handler::handle_request(req, Arc::clone(&service_state), peer_addr)
            }),
        );
        tokio::pin!(conn);

        let hard_deadline = tokio::time::sleep(timeout_duration);
        let idle_deadline = tokio::time::sleep(idle_timeout);
        tokio::pin!(hard_deadline, idle_deadline);
        let mut closing = false;

        loop {
            tokio::select! {
                result = conn.as_mut() => {
                    if let Err(err) = result {
                        logger::log_connection_error(&err);
                    }
                    break;
                }

                () = activity.notified() => {
                    idle_deadline.as_mut().reset(Instant::now() + idle_timeout);
                }

                () = &mut idle_deadline, if !closing => {
                    tracing::debug!("Closing idle connection from {peer_addr}");
                    closing = true;
                    conn.as_mut().graceful_shutdown();
                }

                // A dropped sender also means the accept loop is gone
                _ = shutdown.changed(), if !closing => {
                    closing = true;
                    conn.as_mut().graceful_shutdown();
                }

                () = &mut hard_deadline => {
                    logger::log_warning(&format!(
                        "Connection from {peer_addr} timed out after {} seconds",
                        timeout_duration.as_secs()
                    ));
                    break;
                }
            }
        }

        conn_counter.fetch_sub(1, Ordering::SeqCst);
    });
}
