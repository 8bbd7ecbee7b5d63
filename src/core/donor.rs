use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::core::types::{BloodGroup, DonorId, OrganType};

/// A pledged donor.
///
/// The pledged set is kept ordered so that iteration, and therefore matching,
/// is deterministic. A donor whose set is empty is considered withdrawn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Donor {
    pub id: DonorId,

    /// Full name as entered on the pledge form
    #[serde(default)]
    pub name: String,

    pub blood_group: BloodGroup,

    /// Organs the donor has pledged
    pub organs: BTreeSet<OrganType>,

    /// When the pledge was submitted
    pub pledged_at: DateTime<Utc>,
}

impl Donor {
    pub fn new(id: impl Into<String>, blood_group: BloodGroup, pledged_at: DateTime<Utc>) -> Self {
        Self {
            id: DonorId::new(id),
            name: String::new(),
            blood_group,
            organs: BTreeSet::new(),
            pledged_at,
        }
    }

    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    #[must_use]
    pub fn with_organs(mut self, organs: impl IntoIterator<Item = OrganType>) -> Self {
        self.organs.extend(organs);
        self
    }

    #[must_use]
    pub fn has_pledged(&self, organ: OrganType) -> bool {
        self.organs.contains(&organ)
    }

    /// A donor with nothing left pledged must not be offered to the matcher
    #[must_use]
    pub fn is_withdrawn(&self) -> bool {
        self.organs.is_empty()
    }

    /// Remove a single organ from the pledge. Returns false if it was not pledged.
    pub fn withdraw(&mut self, organ: OrganType) -> bool {
        self.organs.remove(&organ)
    }
}
