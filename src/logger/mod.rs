//! Logger module
//!
//! Provides logging utilities for the HTTP server including:
//! - Subscriber installation (compact or JSON output)
//! - Server lifecycle logging
//! - Access logging with multiple formats

mod format;

pub use format::AccessLogEntry;

use crate::config::{Config, LogFormat, LoggingConfig};
use std::net::SocketAddr;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Target used for per-request access log lines
pub const ACCESS_TARGET: &str = "access";

/// Install the global tracing subscriber
///
/// Should be called once at application startup. `RUST_LOG` overrides
/// the configured level.
pub fn init(config: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.level.as_str()));

    let registry = tracing_subscriber::registry().with(filter);
    let fmt = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false);

    let result = match config.format {
        LogFormat::Compact => registry.with(fmt.compact()).try_init(),
        LogFormat::Json => registry.with(fmt.json()).try_init(),
    };
    if let Err(e) = result {
        eprintln!("[WARN] Logger already initialized: {e}");
    }
}

pub fn log_server_start(addr: &SocketAddr, config: &Config, explorers: usize) {
    tracing::info!("Travellers server started");
    tracing::info!("Listening on: http://{addr}");
    tracing::info!(
        level = %config.logging.level,
        explorers,
        match_mode = ?config.dataset.match_mode,
        max_body_size = config.http.max_body_size,
        max_connections = ?config.performance.max_connections,
        "Loaded configuration"
    );
    if let Some(workers) = config.server.workers {
        tracing::info!("Worker threads: {workers}");
    }
    if let Some(ref path) = config.dataset.path {
        tracing::info!("Dataset: {path}");
    }
}

pub fn log_shutdown(active_connections: usize) {
    tracing::info!(active_connections, "Shutdown requested, no longer accepting connections");
}

pub fn log_connection_accepted(peer_addr: &SocketAddr) {
    tracing::debug!("[Connection] Accepted from: {peer_addr}");
}

pub fn log_connection_error(err: &impl std::fmt::Debug) {
    tracing::error!("Failed to serve connection: {err:?}");
}

pub fn log_error(message: &str) {
    tracing::error!("{message}");
}

pub fn log_warning(message: &str) {
    tracing::warn!("{message}");
}

/// Log formatted access log entry
pub fn log_access(entry: &AccessLogEntry, format: &str) {
    tracing::info!(target: ACCESS_TARGET, "{}", entry.format(format));
}
