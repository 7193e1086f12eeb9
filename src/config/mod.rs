// Configuration module entry point
// Loads layered configuration and holds the shared runtime state

mod state;
mod types;

use std::net::SocketAddr;

use crate::error::{Result, ServerError};

// Re-export public types
pub use state::AppState;
pub use types::{
    Config, DatasetConfig, HealthConfig, HttpConfig, LogFormat, LoggingConfig, PerformanceConfig,
    ServerConfig,
};

/// Prefix for environment overrides, e.g. `TRAVELLERS_SERVER__PORT=3000`
pub const ENV_PREFIX: &str = "TRAVELLERS";

impl Config {
    /// Load configuration from specified file path (without extension)
    /// A missing file is not an error; defaults and environment apply.
    pub fn load_from(config_path: &str) -> Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(config_path).required(false))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__"),
            )
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 3000)?
            .set_default("logging.level", "info")?
            .set_default("logging.format", "compact")?
            .set_default("logging.access_log", true)?
            .set_default("logging.access_log_format", "combined")?
            .set_default("performance.keep_alive_timeout", 5)?
            .set_default("performance.read_timeout", 30)?
            .set_default("performance.write_timeout", 30)?
            .set_default("http.server_name", "travellers-server")?
            .set_default("http.enable_cors", false)?
            .set_default("http.max_body_size", 65_536)? // 64KB
            .set_default("health.enabled", true)?
            .set_default("health.liveness_path", "/healthz")?
            .set_default("health.readiness_path", "/readyz")?
            .set_default("dataset.match_mode", "exact")?
            .build()?;

        Ok(settings.try_deserialize()?)
    }

    pub fn socket_addr(&self) -> Result<SocketAddr> {
        let address = format!("{}:{}", self.server.host, self.server.port);
        address
            .parse()
            .map_err(|e: std::net::AddrParseError| ServerError::InvalidAddress {
                message: e.to_string(),
                address,
            })
    }
}
