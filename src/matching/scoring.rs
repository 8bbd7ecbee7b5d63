use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::core::recipient::Recipient;

/// Priority breakdown for one recipient at a given instant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PriorityScore {
    /// Contribution of the urgency level
    pub urgency_base: u32,

    /// Whole days on the waitlist, floored and never negative
    pub days_waiting: u32,

    /// `urgency_base + days_waiting`; higher is served first
    pub total: u32,
}

impl PriorityScore {
    #[must_use]
    pub fn calculate(recipient: &Recipient, now: DateTime<Utc>) -> Self {
        let urgency_base = recipient.urgency.base_score();
        let days_waiting = days_waiting(recipient.joined_at, now);

        Self {
            urgency_base,
            days_waiting,
            total: urgency_base.saturating_add(days_waiting),
        }
    }
}

/// Priority score for a recipient: urgency base plus whole days waiting
#[must_use]
pub fn compute_score(recipient: &Recipient, now: DateTime<Utc>) -> u32 {
    PriorityScore::calculate(recipient, now).total
}

/// Whole days between `joined` and `now`, clamped to zero when `now` is earlier.
fn days_waiting(joined: DateTime<Utc>, now: DateTime<Utc>) -> u32 {
    // num_days truncates toward zero, which equals floor for the non-negative case
    let days = (now - joined).num_days().max(0);
    u32::try_from(days).unwrap_or(u32::MAX)
}
