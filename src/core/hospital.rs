use serde::{Deserialize, Serialize};

use crate::core::types::HospitalId;

/// A transplant centre from the hospital directory
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hospital {
    pub id: HospitalId,

    /// Display name (e.g., "St. Mary's Transplant Centre")
    pub name: String,

    pub city: String,

    /// Free-form contact string (phone or email)
    pub contact: String,
}

impl std::fmt::Display for Hospital {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.name, self.city)
    }
}
