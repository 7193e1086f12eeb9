//! Startup error types
//!
//! Request handling never fails; these errors only surface while loading
//! configuration, building the explorer table, or binding the listener.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid address '{address}': {message}")]
    InvalidAddress { address: String, message: String },

    #[error("Failed to parse dataset {path}: {source}")]
    DatasetParse {
        path: String,
        #[source]
        source: toml::de::Error,
    },

    #[error("Invalid dataset: {message}")]
    InvalidDataset { message: String },
}

pub type Result<T> = std::result::Result<T, ServerError>;
