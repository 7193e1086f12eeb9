//! Famous explorers lookup server
//!
//! A greeting endpoint and a surname → explorer lookup served as JSON or
//! as an HTML form page, on top of tokio and hyper.

pub mod config;
pub mod error;
pub mod explorers;
pub mod handler;
pub mod http;
pub mod logger;
pub mod server;

pub use error::{Result, ServerError};
