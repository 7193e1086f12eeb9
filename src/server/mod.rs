// Server module entry point
// Listener setup, connection handling, accept loop and shutdown signals

pub mod connection;
pub mod listener;
pub mod signal;

// `loop` is a keyword, so the module is named server_loop
#[path = "loop.rs"]
pub mod server_loop;

use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::Notify;

use crate::config::AppState;

// Re-export commonly used items
pub use listener::create_listener;
pub use server_loop::start_server_loop;

/// Serve requests on `listener` until `shutdown` is notified.
///
/// Open connections get up to the configured write timeout to finish
/// after shutdown is requested.
pub async fn serve(
    listener: TcpListener,
    state: Arc<AppState>,
    shutdown: Arc<Notify>,
) -> std::io::Result<()> {
    let grace = std::time::Duration::from_secs(state.config.performance.write_timeout);
    let active_connections = start_server_loop(listener, state, shutdown).await?;
    server_loop::wait_for_connections(&active_connections, grace).await;
    Ok(())
}
