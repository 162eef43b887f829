//! Employee identity.

use serde::{Deserialize, Serialize};

/// The worker a salary is calculated for.
///
/// The engine only echoes these fields into the result; the store reference
/// is used by the API to look up the location's attendance thresholds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    /// Unique identifier for the employee.
    pub id: String,
    /// Display name.
    pub name: String,
    /// The store (work location) the employee belongs to.
    #[serde(default)]
    pub store_id: Option<String>,
}
