//! OSRM Table service response types.
//!
//! See: <http://project-osrm.org/docs/v5.24.0/api/#table-service>

use serde::Deserialize;

/// OSRM Table API response.
///
/// Either a duration matrix (`code == "Ok"`) or an error message.
#[derive(Debug, Deserialize)]
pub struct TableResponse {
    /// Status code, e.g. `"Ok"`, `"InvalidQuery"` or `"NoTable"`.
    pub code: String,

    /// Error description when `code` is not `"Ok"`.
    pub message: Option<String>,

    /// Durations in seconds; `None` where no route exists.
    pub durations: Option<Vec<Vec<Option<f64>>>>,
}

impl TableResponse {
    /// Whether the service reported success.
    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.code == "Ok"
    }
}
