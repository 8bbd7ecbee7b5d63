use serde::{Deserialize, Serialize};

use crate::core::donor::Donor;
use crate::core::notification::InterestNotification;
use crate::core::recipient::Recipient;
use crate::core::types::{DonorId, RecipientId};

/// The single source of truth for donors, recipients and notifications.
///
/// Owned by [`Registry`](crate::store::registry::Registry); views receive it
/// by reference and never mutate it directly.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppState {
    pub donors: Vec<Donor>,
    pub recipients: Vec<Recipient>,
    pub notifications: Vec<InterestNotification>,
}

impl AppState {
    pub fn donor(&self, id: &DonorId) -> Option<&Donor> {
        self.donors.iter().find(|d| &d.id == id)
    }

    pub fn recipient(&self, id: &RecipientId) -> Option<&Recipient> {
        self.recipients.iter().find(|r| &r.id == id)
    }

    pub(crate) fn donor_mut(&mut self, id: &DonorId) -> Option<&mut Donor> {
        self.donors.iter_mut().find(|d| &d.id == id)
    }

    pub(crate) fn recipient_mut(&mut self, id: &RecipientId) -> Option<&mut Recipient> {
        self.recipients.iter_mut().find(|r| &r.id == id)
    }

    /// Recipients still waiting for an organ
    pub fn waitlist(&self) -> impl Iterator<Item = &Recipient> {
        self.recipients.iter().filter(|r| r.is_searching())
    }

    pub fn has_patient_id(&self, patient_id: &str) -> bool {
        self.recipients
            .iter()
            .any(|r| r.patient_id.eq_ignore_ascii_case(patient_id))
    }
}

/// Next sequential identifier of the form `<prefix>-<n>`.
///
/// `n` is one past the largest numeric suffix already in use, so identifiers
/// stay unique after deletions.
pub(crate) fn next_id<'a>(prefix: &str, existing: impl Iterator<Item = &'a str>) -> String {
    format!("{prefix}-{}", next_number(prefix, existing))
}

/// Next free numeric suffix for `prefix`
pub(crate) fn next_number<'a>(prefix: &str, existing: impl Iterator<Item = &'a str>) -> u64 {
    let marker = format!("{prefix}-");
    existing
        .filter_map(|id| id.strip_prefix(marker.as_str()))
        .filter_map(|suffix| suffix.parse::<u64>().ok())
        .max()
        .unwrap_or(0)
        + 1
}
