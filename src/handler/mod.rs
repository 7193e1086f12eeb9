//! Request handler module
//!
//! Responsible for request routing dispatch and the greeting and explorer
//! lookup endpoints.

pub mod greeting;
pub mod pages;
pub mod params;
pub mod router;
pub mod travellers;

// Re-export main entry point
pub use router::handle_request;
