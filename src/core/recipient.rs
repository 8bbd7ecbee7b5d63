use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::types::{
    BloodGroup, HospitalId, OrganType, RecipientId, RecipientStatus, Urgency,
};

/// A patient on the waitlist for exactly one organ
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recipient {
    pub id: RecipientId,

    /// Human-readable patient identifier, distinct from `id`
    pub patient_id: String,

    #[serde(default)]
    pub name: String,

    pub blood_group: BloodGroup,

    pub organ_needed: OrganType,

    pub urgency: Urgency,

    /// When the recipient joined the waitlist
    pub joined_at: DateTime<Utc>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hospital: Option<HospitalId>,

    #[serde(default)]
    pub status: RecipientStatus,
}

impl Recipient {
    pub fn new(
        id: impl Into<String>,
        patient_id: impl Into<String>,
        blood_group: BloodGroup,
        organ_needed: OrganType,
        urgency: Urgency,
        joined_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: RecipientId::new(id),
            patient_id: patient_id.into(),
            name: String::new(),
            blood_group,
            organ_needed,
            urgency,
            joined_at,
            hospital: None,
            status: RecipientStatus::Searching,
        }
    }

    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    #[must_use]
    pub fn with_hospital(mut self, hospital: HospitalId) -> Self {
        self.hospital = Some(hospital);
        self
    }

    #[must_use]
    pub fn is_searching(&self) -> bool {
        self.status == RecipientStatus::Searching
    }

    /// Move from Searching to Potential Match Found.
    ///
    /// The transition is one-way; there is no path back to Searching. Returns
    /// false if the recipient had already moved on.
    pub fn mark_potential_match(&mut self) -> bool {
        if self.is_searching() {
            self.status = RecipientStatus::PotentialMatchFound;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_transition_is_one_way() {
        let mut recipient = Recipient::new(
            "R-1",
            "PT-1001",
            BloodGroup::APos,
            OrganType::Kidney,
            Urgency::High,
            Utc::now(),
        );
        assert!(recipient.is_searching());
        assert!(recipient.mark_potential_match());
        assert_eq!(recipient.status, RecipientStatus::PotentialMatchFound);
        assert!(!recipient.mark_potential_match());
        assert_eq!(recipient.status, RecipientStatus::PotentialMatchFound);
    }

    #[test]
    fn test_deserialize_defaults_status_to_searching() {
        let json = r#"{
            "id": "R-7",
            "patient_id": "PT-7",
            "blood_group": "B-",
            "organ_needed": "liver",
            "urgency": "critical",
            "joined_at": "2025-01-01T00:00:00Z"
        }"#;
        let recipient: Recipient = serde_json::from_str(json).unwrap();
        assert_eq!(recipient.status, RecipientStatus::Searching);
        assert_eq!(recipient.hospital, None);
        assert_eq!(recipient.urgency, Urgency::Critical);
    }

    #[test]
    fn test_deserialize_rejects_unknown_urgency() {
        let json = r#"{
            "id": "R-8",
            "patient_id": "PT-8",
            "blood_group": "B-",
            "organ_needed": "liver",
            "urgency": "low",
            "joined_at": "2025-01-01T00:00:00Z"
        }"#;
        assert!(serde_json::from_str::<Recipient>(json).is_err());
    }
}
