//! Explorer lookup table
//!
//! Immutable mapping from surname to historical explorer, built once at
//! startup and shared read-only by every request.

mod record;
mod table;

pub use record::{ExplorerRecord, FALLBACK_NAME};
pub use table::{ExplorerTable, MatchMode};
