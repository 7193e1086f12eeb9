//! HTTP protocol layer module
//!
//! Provides HTTP protocol-related base functionality, decoupled from the
//! explorer lookup itself.

pub mod mime;
pub mod response;

// Re-export commonly used types
pub use mime::{accepts_html, BodyKind};
pub use response::{
    build_404_response, build_405_response, build_health_response, build_html_response,
    build_json_response, build_options_response, build_text_response,
};
