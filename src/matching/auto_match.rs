use crate::core::recipient::Recipient;
use crate::core::types::{OrganType, RecipientId};

/// Pick the recipient whose status should flip when a donor offers `organ`.
///
/// Candidates are Searching recipients needing `organ`, ordered by urgency
/// (Critical first) and then by earliest waitlist join. Returns `None` when no
/// one is waiting; that is an expected outcome, not an error. Donor state is
/// never consulted, so blood compatibility is left to the full matching run.
#[must_use]
pub fn auto_match_on_interest(organ: OrganType, recipients: &[Recipient]) -> Option<RecipientId> {
    recipients
        .iter()
        .filter(|r| r.organ_needed == organ && r.is_searching())
        .min_by(|a, b| {
            a.urgency
                .cmp(&b.urgency)
                .then_with(|| a.joined_at.cmp(&b.joined_at))
        })
        .map(|r| r.id.clone())
}
