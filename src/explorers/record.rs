// Explorer record type

use serde::{Deserialize, Serialize};

/// First name reported when a surname is not in the table
pub const FALLBACK_NAME: &str = "unknown";

/// A historical explorer as served by `/travellers`
///
/// Serializes as `{"name", "surname", "dates"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExplorerRecord {
    #[serde(rename = "name")]
    pub first_name: String,
    pub surname: String,
    #[serde(default)]
    pub dates: String,
}

impl ExplorerRecord {
    pub fn new(
        first_name: impl Into<String>,
        surname: impl Into<String>,
        dates: impl Into<String>,
    ) -> Self {
        Self {
            first_name: first_name.into(),
            surname: surname.into(),
            dates: dates.into(),
        }
    }

    /// Placeholder for a surname the table does not know.
    ///
    /// The requested surname is echoed back unchanged.
    pub fn fallback(surname: &str) -> Self {
        Self::new(FALLBACK_NAME, surname, "")
    }
}
