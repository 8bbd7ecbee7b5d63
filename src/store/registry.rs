use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::catalog::hospitals::HospitalDirectory;
use crate::core::donor::Donor;
use crate::core::notification::InterestNotification;
use crate::core::recipient::Recipient;
use crate::core::types::{BloodGroup, DonorId, HospitalId, OrganType, RecipientId, Urgency};
use crate::matching::auto_match::auto_match_on_interest;
use crate::matching::engine::{MatchResult, MatchingConfig, MatchingEngine};
use crate::matching::scoring::PriorityScore;
use crate::store::buckets::{Bucket, JsonBuckets};
use crate::store::state::{next_id, next_number, AppState};
use crate::store::StoreError;
use crate::utils::validation::{check_simulation_limit, validate_name, validate_patient_id};

/// Registration form for a new waitlisted recipient
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewRecipient {
    pub name: String,
    pub patient_id: String,
    pub blood_group: BloodGroup,
    pub organ_needed: OrganType,
    pub urgency: Urgency,
    #[serde(default)]
    pub hospital: Option<HospitalId>,
}

/// What an organ withdrawal did to the donor record
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Withdrawal {
    /// The donor still has these organs pledged
    Updated { remaining: Vec<OrganType> },
    /// The last organ was withdrawn and the donor was removed
    DonorRemoved,
}

/// Result of a donor expressing interest in donating one organ
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InterestOutcome {
    /// Always recorded, whether or not a recipient was found
    pub notification: InterestNotification,

    /// Recipient moved to Potential Match Found, if any
    pub matched_recipient: Option<RecipientId>,
}

/// Application controller: owns the state, exposes the actions that mutate
/// it, and persists every bucket after each successful action.
#[derive(Debug)]
pub struct Registry {
    state: AppState,
    buckets: JsonBuckets,
    hospitals: HospitalDirectory,
}

impl Registry {
    /// Load all buckets from storage
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if a bucket exists but cannot be read or parsed.
    pub fn open(buckets: JsonBuckets, hospitals: HospitalDirectory) -> Result<Self, StoreError> {
        let state = AppState {
            donors: buckets.load(Bucket::Donors)?,
            recipients: buckets.load(Bucket::Recipients)?,
            notifications: buckets.load(Bucket::Notifications)?,
        };

        tracing::debug!(
            donors = state.donors.len(),
            recipients = state.recipients.len(),
            notifications = state.notifications.len(),
            "Loaded state from {}",
            buckets.dir().display()
        );

        Ok(Self {
            state,
            buckets,
            hospitals,
        })
    }

    #[must_use]
    pub fn state(&self) -> &AppState {
        &self.state
    }

    #[must_use]
    pub fn hospitals(&self) -> &HospitalDirectory {
        &self.hospitals
    }

    /// Write every bucket from `next`, then adopt it as the current state.
    ///
    /// The in-memory state is only replaced once every bucket is written, so a
    /// failed save leaves the registry as it was before the action.
    fn commit(&mut self, next: AppState) -> Result<(), StoreError> {
        self.buckets.save(Bucket::Donors, &next.donors)?;
        self.buckets.save(Bucket::Recipients, &next.recipients)?;
        self.buckets
            .save(Bucket::Notifications, &next.notifications)?;
        self.state = next;
        Ok(())
    }

    /// Record a new pledge
    ///
    /// # Errors
    ///
    /// Returns `StoreError::EmptyPledge` if no organs are given, or a
    /// validation error for a bad name.
    pub fn pledge(
        &mut self,
        name: &str,
        blood_group: BloodGroup,
        organs: impl IntoIterator<Item = OrganType>,
        now: DateTime<Utc>,
    ) -> Result<Donor, StoreError> {
        let name = validate_name(name)?;
        let organs: BTreeSet<OrganType> = organs.into_iter().collect();
        if organs.is_empty() {
            return Err(StoreError::EmptyPledge);
        }

        let id = next_id("D", self.state.donors.iter().map(|d| d.id.0.as_str()));
        let donor = Donor::new(id, blood_group, now)
            .with_name(name)
            .with_organs(organs);

        let mut next = self.state.clone();
        next.donors.push(donor.clone());
        self.commit(next)?;

        tracing::info!(
            "Donor {} pledged {} organ(s), blood group {}",
            donor.id,
            donor.organs.len(),
            donor.blood_group
        );
        Ok(donor)
    }

    /// Withdraw one organ from a pledge, removing the donor once nothing is left
    ///
    /// # Errors
    ///
    /// Returns `StoreError::DonorNotFound` or `StoreError::OrganNotPledged`.
    pub fn withdraw_organ(
        &mut self,
        donor_id: &DonorId,
        organ: OrganType,
    ) -> Result<Withdrawal, StoreError> {
        let mut next = self.state.clone();
        let donor = next
            .donor_mut(donor_id)
            .ok_or_else(|| StoreError::DonorNotFound(donor_id.clone()))?;

        if !donor.withdraw(organ) {
            return Err(StoreError::OrganNotPledged {
                donor: donor_id.clone(),
                organ,
            });
        }

        let outcome = if donor.is_withdrawn() {
            next.donors.retain(|d| &d.id != donor_id);
            Withdrawal::DonorRemoved
        } else {
            Withdrawal::Updated {
                remaining: donor.organs.iter().copied().collect(),
            }
        };

        self.commit(next)?;

        match &outcome {
            Withdrawal::DonorRemoved => {
                tracing::info!(
                    "Donor {} withdrew their last organ and was removed",
                    donor_id
                );
            }
            Withdrawal::Updated { .. } => {
                tracing::info!("Donor {} withdrew {}", donor_id, organ);
            }
        }
        Ok(outcome)
    }

    /// Add a recipient to the waitlist in Searching status
    ///
    /// # Errors
    ///
    /// Returns a validation error for a bad name or patient ID,
    /// `StoreError::DuplicatePatientId` if the patient ID is taken, or
    /// `StoreError::UnknownHospital` if the affiliation is not in the directory.
    pub fn register_recipient(
        &mut self,
        form: NewRecipient,
        now: DateTime<Utc>,
    ) -> Result<Recipient, StoreError> {
        let name = validate_name(&form.name)?;
        let patient_id = validate_patient_id(&form.patient_id)?;

        if self.state.has_patient_id(&patient_id) {
            return Err(StoreError::DuplicatePatientId(patient_id));
        }
        if let Some(hospital) = &form.hospital {
            if !self.hospitals.contains(hospital) {
                return Err(StoreError::UnknownHospital(hospital.clone()));
            }
        }

        let id = next_id("R", self.state.recipients.iter().map(|r| r.id.0.as_str()));
        let mut recipient = Recipient::new(
            id,
            patient_id,
            form.blood_group,
            form.organ_needed,
            form.urgency,
            now,
        )
        .with_name(name);
        recipient.hospital = form.hospital;

        let mut next = self.state.clone();
        next.recipients.push(recipient.clone());
        self.commit(next)?;

        tracing::info!(
            "Recipient {} ({}) waitlisted for {} at {} urgency",
            recipient.id,
            recipient.patient_id,
            recipient.organ_needed,
            recipient.urgency
        );
        Ok(recipient)
    }

    /// Change a recipient's urgency level
    ///
    /// # Errors
    ///
    /// Returns `StoreError::RecipientNotFound` if the ID is unknown.
    pub fn update_urgency(
        &mut self,
        recipient_id: &RecipientId,
        urgency: Urgency,
    ) -> Result<Recipient, StoreError> {
        let mut next = self.state.clone();
        let recipient = next
            .recipient_mut(recipient_id)
            .ok_or_else(|| StoreError::RecipientNotFound(recipient_id.clone()))?;

        let previous = recipient.urgency;
        recipient.urgency = urgency;
        let updated = recipient.clone();

        self.commit(next)?;

        tracing::info!(
            "Recipient {} urgency changed from {} to {}",
            recipient_id,
            previous,
            urgency
        );
        Ok(updated)
    }

    /// Delete a recipient from the waitlist
    ///
    /// # Errors
    ///
    /// Returns `StoreError::RecipientNotFound` if the ID is unknown.
    pub fn remove_recipient(
        &mut self,
        recipient_id: &RecipientId,
    ) -> Result<Recipient, StoreError> {
        let index = self
            .state
            .recipients
            .iter()
            .position(|r| &r.id == recipient_id)
            .ok_or_else(|| StoreError::RecipientNotFound(recipient_id.clone()))?;

        let mut next = self.state.clone();
        let removed = next.recipients.remove(index);
        self.commit(next)?;

        tracing::info!("Recipient {} removed from waitlist", recipient_id);
        Ok(removed)
    }

    /// Add `count` synthetic recipients.
    ///
    /// Values cycle deterministically through organs, blood groups, urgency
    /// levels and hospitals, with join times staggered over the last 120 days.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Validation` if `count` exceeds the batch limit.
    pub fn simulate_recipients(
        &mut self,
        count: usize,
        now: DateTime<Utc>,
    ) -> Result<Vec<Recipient>, StoreError> {
        const URGENCIES: [Urgency; 3] = [Urgency::Critical, Urgency::High, Urgency::Medium];

        check_simulation_limit(count)?;

        let first_seq = next_sim_number(&self.state);
        let first_number = next_number("R", self.state.recipients.iter().map(|r| r.id.0.as_str()));

        let mut created = Vec::with_capacity(count);
        for (seq, number) in (first_seq..).zip(first_number..).take(count) {
            let organ = OrganType::ALL[seq % OrganType::ALL.len()];
            let blood_group = BloodGroup::ALL[(seq * 3) % BloodGroup::ALL.len()];
            let urgency = URGENCIES[seq % URGENCIES.len()];
            let days_ago = i64::try_from((seq * 7) % 120).unwrap_or(0);

            let mut recipient = Recipient::new(
                format!("R-{number}"),
                format!("SIM-{seq:04}"),
                blood_group,
                organ,
                urgency,
                now - Duration::days(days_ago),
            )
            .with_name(format!("Simulated Patient {seq}"));

            if !self.hospitals.is_empty() {
                let hospital = &self.hospitals.hospitals[seq % self.hospitals.len()];
                recipient = recipient.with_hospital(hospital.id.clone());
            }

            created.push(recipient);
        }

        let mut next = self.state.clone();
        next.recipients.extend(created.iter().cloned());
        self.commit(next)?;

        tracing::info!("Simulated {} recipient(s)", created.len());
        Ok(created)
    }

    /// Run the matching engine over current donors and Searching recipients.
    ///
    /// Results are informational; state is not changed.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Matching` if stored state violates the engine's
    /// input contract.
    pub fn run_matching(&self, now: DateTime<Utc>) -> Result<Vec<MatchResult>, StoreError> {
        let engine = MatchingEngine::with_config(MatchingConfig {
            searching_only: true,
        });
        let matches = engine.run(&self.state.donors, &self.state.recipients, now)?;
        tracing::info!("Matching produced {} pairing(s)", matches.len());
        Ok(matches)
    }

    /// Priority breakdown for one recipient
    ///
    /// # Errors
    ///
    /// Returns `StoreError::RecipientNotFound` if the ID is unknown.
    pub fn score(
        &self,
        recipient_id: &RecipientId,
        now: DateTime<Utc>,
    ) -> Result<PriorityScore, StoreError> {
        let recipient = self
            .state
            .recipient(recipient_id)
            .ok_or_else(|| StoreError::RecipientNotFound(recipient_id.clone()))?;
        Ok(PriorityScore::calculate(recipient, now))
    }

    /// Record a donor's interest in donating `organ` and flip the top waiting
    /// recipient for that organ to Potential Match Found.
    ///
    /// The notification is recorded even when no recipient is waiting.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::DonorNotFound` or `StoreError::OrganNotPledged`;
    /// in both cases nothing is recorded.
    pub fn express_interest(
        &mut self,
        donor_id: &DonorId,
        organ: OrganType,
        now: DateTime<Utc>,
    ) -> Result<InterestOutcome, StoreError> {
        let donor = self
            .state
            .donor(donor_id)
            .ok_or_else(|| StoreError::DonorNotFound(donor_id.clone()))?;
        if !donor.has_pledged(organ) {
            return Err(StoreError::OrganNotPledged {
                donor: donor_id.clone(),
                organ,
            });
        }

        let mut next = self.state.clone();
        let id = next_id("N", next.notifications.iter().map(|n| n.id.0.as_str()));
        let notification = InterestNotification::new(id, donor_id.clone(), organ, now);
        next.notifications.push(notification.clone());

        let matched_recipient = auto_match_on_interest(organ, &next.recipients);
        if let Some(recipient) = matched_recipient
            .as_ref()
            .and_then(|id| next.recipient_mut(id))
        {
            recipient.mark_potential_match();
        }

        self.commit(next)?;

        match &matched_recipient {
            Some(recipient_id) => tracing::info!(
                "Donor {} offered {}; recipient {} has a potential match",
                donor_id,
                organ,
                recipient_id
            ),
            None => tracing::info!(
                "Donor {} offered {}; no recipient is waiting",
                donor_id,
                organ
            ),
        }
        Ok(InterestOutcome {
            notification,
            matched_recipient,
        })
    }

    /// Delete every interest notification, returning how many were removed
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Io` if the bucket cannot be written.
    pub fn clear_notifications(&mut self) -> Result<usize, StoreError> {
        let cleared = self.state.notifications.len();
        let mut next = self.state.clone();
        next.notifications.clear();
        self.commit(next)?;

        tracing::info!("Cleared {} notification(s)", cleared);
        Ok(cleared)
    }
}

/// Next free simulation sequence number, based on existing `SIM-` patient IDs
fn next_sim_number(state: &AppState) -> usize {
    state
        .recipients
        .iter()
        .filter_map(|r| r.patient_id.strip_prefix("SIM-"))
        .filter_map(|n| n.parse::<usize>().ok())
        .max()
        .unwrap_or(0)
        + 1
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::RecipientStatus;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 10, 1, 10, 0, 0).unwrap()
    }

    fn open(dir: &std::path::Path) -> Registry {
        Registry::open(
            JsonBuckets::new(dir),
            HospitalDirectory::load_embedded().unwrap(),
        )
        .unwrap()
    }

    fn form(patient_id: &str, organ: OrganType, urgency: Urgency) -> NewRecipient {
        NewRecipient {
            name: "Test Patient".to_string(),
            patient_id: patient_id.to_string(),
            blood_group: BloodGroup::APos,
            organ_needed: organ,
            urgency,
            hospital: Some(HospitalId::new("H001")),
        }
    }

    fn is_searching(registry: &Registry, id: &RecipientId) -> bool {
        registry.state().recipient(id).unwrap().is_searching()
    }

    #[test]
    fn test_pledge_assigns_sequential_ids_and_persists() {
        let dir = tempfile::tempdir().unwrap();
        let mut registry = open(dir.path());

        let first = registry
            .pledge("Asha", BloodGroup::ONeg, [OrganType::Kidney], now())
            .unwrap();
        let second = registry
            .pledge("Vikram", BloodGroup::BPos, [OrganType::Liver], now())
            .unwrap();
        assert_eq!(first.id, DonorId::new("D-1"));
        assert_eq!(second.id, DonorId::new("D-2"));

        let reopened = open(dir.path());
        assert_eq!(reopened.state().donors.len(), 2);
        assert_eq!(reopened.state().donors[0].name, "Asha");
    }

    #[test]
    fn test_empty_pledge_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let mut registry = open(dir.path());
        let result = registry.pledge("Asha", BloodGroup::ONeg, Vec::new(), now());
        assert!(matches!(result, Err(StoreError::EmptyPledge)));
        assert!(registry.state().donors.is_empty());
    }

    #[test]
    fn test_withdraw_last_organ_removes_donor() {
        let dir = tempfile::tempdir().unwrap();
        let mut registry = open(dir.path());
        let donor = registry
            .pledge(
                "Asha",
                BloodGroup::ONeg,
                [OrganType::Kidney, OrganType::Cornea],
                now(),
            )
            .unwrap();

        assert_eq!(
            registry
                .withdraw_organ(&donor.id, OrganType::Kidney)
                .unwrap(),
            Withdrawal::Updated {
                remaining: vec![OrganType::Cornea]
            }
        );
        assert!(matches!(
            registry.withdraw_organ(&donor.id, OrganType::Kidney),
            Err(StoreError::OrganNotPledged { .. })
        ));
        assert_eq!(
            registry
                .withdraw_organ(&donor.id, OrganType::Cornea)
                .unwrap(),
            Withdrawal::DonorRemoved
        );
        assert!(registry.state().donors.is_empty());
        assert!(open(dir.path()).state().donors.is_empty());
    }

    #[test]
    fn test_register_rejects_duplicate_patient_and_unknown_hospital() {
        let dir = tempfile::tempdir().unwrap();
        let mut registry = open(dir.path());
        registry
            .register_recipient(form("PT-1", OrganType::Kidney, Urgency::High), now())
            .unwrap();

        assert!(matches!(
            registry.register_recipient(form("pt-1", OrganType::Liver, Urgency::High), now()),
            Err(StoreError::DuplicatePatientId(_))
        ));

        let mut bad_hospital = form("PT-2", OrganType::Kidney, Urgency::High);
        bad_hospital.hospital = Some(HospitalId::new("H404"));
        assert!(matches!(
            registry.register_recipient(bad_hospital, now()),
            Err(StoreError::UnknownHospital(_))
        ));
        assert_eq!(registry.state().recipients.len(), 1);
    }

    #[test]
    fn test_update_urgency_and_remove() {
        let dir = tempfile::tempdir().unwrap();
        let mut registry = open(dir.path());
        let recipient = registry
            .register_recipient(form("PT-1", OrganType::Kidney, Urgency::Medium), now())
            .unwrap();

        let updated = registry
            .update_urgency(&recipient.id, Urgency::Critical)
            .unwrap();
        assert_eq!(updated.urgency, Urgency::Critical);
        assert_eq!(registry.score(&recipient.id, now()).unwrap().total, 150);

        registry.remove_recipient(&recipient.id).unwrap();
        assert!(matches!(
            registry.remove_recipient(&recipient.id),
            Err(StoreError::RecipientNotFound(_))
        ));
    }

    #[test]
    fn test_interest_records_notification_even_without_match() {
        let dir = tempfile::tempdir().unwrap();
        let mut registry = open(dir.path());
        let donor = registry
            .pledge("Asha", BloodGroup::ONeg, [OrganType::Heart], now())
            .unwrap();

        let outcome = registry
            .express_interest(&donor.id, OrganType::Heart, now())
            .unwrap();
        assert_eq!(outcome.matched_recipient, None);
        assert_eq!(registry.state().notifications.len(), 1);
        assert_eq!(outcome.notification.organ, OrganType::Heart);
    }

    #[test]
    fn test_interest_flips_top_recipient() {
        let dir = tempfile::tempdir().unwrap();
        let mut registry = open(dir.path());
        let donor = registry
            .pledge("Asha", BloodGroup::ONeg, [OrganType::Kidney], now())
            .unwrap();
        registry
            .register_recipient(form("PT-1", OrganType::Kidney, Urgency::High), now())
            .unwrap();
        let critical = registry
            .register_recipient(form("PT-2", OrganType::Kidney, Urgency::Critical), now())
            .unwrap();

        let outcome = registry
            .express_interest(&donor.id, OrganType::Kidney, now())
            .unwrap();
        assert_eq!(outcome.matched_recipient, Some(critical.id.clone()));
        assert_eq!(
            registry.state().recipient(&critical.id).unwrap().status,
            RecipientStatus::PotentialMatchFound
        );
        // Donor pledge is untouched
        let pledged = registry.state().donor(&donor.id).unwrap();
        assert!(pledged.has_pledged(OrganType::Kidney));
    }

    #[test]
    fn test_interest_in_unpledged_organ_records_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let mut registry = open(dir.path());
        let donor = registry
            .pledge("Asha", BloodGroup::ONeg, [OrganType::Kidney], now())
            .unwrap();

        assert!(matches!(
            registry.express_interest(&donor.id, OrganType::Liver, now()),
            Err(StoreError::OrganNotPledged { .. })
        ));
        assert!(registry.state().notifications.is_empty());
    }

    #[test]
    fn test_clear_notifications() {
        let dir = tempfile::tempdir().unwrap();
        let mut registry = open(dir.path());
        let donor = registry
            .pledge("Asha", BloodGroup::ONeg, [OrganType::Kidney], now())
            .unwrap();
        registry
            .express_interest(&donor.id, OrganType::Kidney, now())
            .unwrap();
        registry
            .express_interest(&donor.id, OrganType::Kidney, now())
            .unwrap();

        assert_eq!(registry.clear_notifications().unwrap(), 2);
        assert!(open(dir.path()).state().notifications.is_empty());
    }

    #[test]
    fn test_simulation_is_deterministic_and_unique() {
        let dir = tempfile::tempdir().unwrap();
        let mut registry = open(dir.path());

        let first = registry.simulate_recipients(10, now()).unwrap();
        let second = registry.simulate_recipients(5, now()).unwrap();
        assert_eq!(first.len(), 10);
        assert_eq!(first[0].patient_id, "SIM-0001");
        assert_eq!(second[0].patient_id, "SIM-0011");

        let mut patient_ids: Vec<_> = registry
            .state()
            .recipients
            .iter()
            .map(|r| r.patient_id.clone())
            .collect();
        patient_ids.sort();
        patient_ids.dedup();
        assert_eq!(patient_ids.len(), 15);
        assert!(registry
            .state()
            .recipients
            .iter()
            .all(|r| r.hospital.is_some() && r.is_searching()));

        assert!(matches!(
            registry.simulate_recipients(10_000, now()),
            Err(StoreError::Validation(_))
        ));
    }

    #[test]
    fn test_run_matching_ignores_matched_recipients() {
        let dir = tempfile::tempdir().unwrap();
        let mut registry = open(dir.path());
        let donor = registry
            .pledge("Asha", BloodGroup::ONeg, [OrganType::Kidney], now())
            .unwrap();
        let flipped = registry
            .register_recipient(form("PT-1", OrganType::Kidney, Urgency::Critical), now())
            .unwrap();
        let waiting = registry
            .register_recipient(form("PT-2", OrganType::Kidney, Urgency::Medium), now())
            .unwrap();
        registry
            .express_interest(&donor.id, OrganType::Kidney, now())
            .unwrap();
        assert!(!is_searching(&registry, &flipped.id));

        let matches = registry.run_matching(now()).unwrap();
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].recipient, waiting.id);
        assert_eq!(matches[0].donor, donor.id);
    }

    /// Replace the data directory with a regular file so every save fails
    fn break_data_dir(dir: &std::path::Path) {
        std::fs::remove_dir_all(dir).unwrap();
        std::fs::write(dir, "not a directory").unwrap();
    }

    #[test]
    fn test_failed_save_leaves_state_unchanged() {
        let root = tempfile::tempdir().unwrap();
        let data = root.path().join("data");
        let mut registry = open(&data);
        let donor = registry
            .pledge(
                "Asha",
                BloodGroup::ONeg,
                [OrganType::Kidney, OrganType::Cornea],
                now(),
            )
            .unwrap();
        let recipient = registry
            .register_recipient(form("PT-1", OrganType::Liver, Urgency::High), now())
            .unwrap();
        let before = registry.state().clone();

        break_data_dir(&data);

        assert!(matches!(
            registry.pledge("Vikram", BloodGroup::BPos, [OrganType::Liver], now()),
            Err(StoreError::Io { .. })
        ));
        assert!(matches!(
            registry.withdraw_organ(&donor.id, OrganType::Kidney),
            Err(StoreError::Io { .. })
        ));
        assert!(matches!(
            registry.register_recipient(form("PT-2", OrganType::Kidney, Urgency::Medium), now()),
            Err(StoreError::Io { .. })
        ));
        assert!(matches!(
            registry.update_urgency(&recipient.id, Urgency::Critical),
            Err(StoreError::Io { .. })
        ));
        assert!(matches!(
            registry.remove_recipient(&recipient.id),
            Err(StoreError::Io { .. })
        ));
        assert!(matches!(
            registry.simulate_recipients(5, now()),
            Err(StoreError::Io { .. })
        ));

        assert_eq!(registry.state(), &before);
        assert_eq!(registry.state().donors.len(), 1);
        assert_eq!(registry.state().recipients.len(), 1);
    }

    #[test]
    fn test_failed_save_keeps_notifications_and_status() {
        let root = tempfile::tempdir().unwrap();
        let data = root.path().join("data");
        let mut registry = open(&data);
        let donor = registry
            .pledge("Asha", BloodGroup::ONeg, [OrganType::Kidney], now())
            .unwrap();
        let flipped = registry
            .register_recipient(form("PT-1", OrganType::Kidney, Urgency::Critical), now())
            .unwrap();
        registry
            .express_interest(&donor.id, OrganType::Kidney, now())
            .unwrap();
        let second = registry
            .register_recipient(form("PT-2", OrganType::Kidney, Urgency::High), now())
            .unwrap();

        break_data_dir(&data);

        assert!(matches!(
            registry.clear_notifications(),
            Err(StoreError::Io { .. })
        ));
        assert_eq!(registry.state().notifications.len(), 1);

        assert!(matches!(
            registry.express_interest(&donor.id, OrganType::Kidney, now()),
            Err(StoreError::Io { .. })
        ));
        assert_eq!(registry.state().notifications.len(), 1);
        assert!(!is_searching(&registry, &flipped.id));
        assert!(is_searching(&registry, &second.id));
    }
}
