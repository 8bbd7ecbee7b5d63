use std::collections::{BTreeMap, HashSet};

use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;

use crate::core::donor::Donor;
use crate::core::recipient::Recipient;
use crate::core::types::{DonorId, OrganType, RecipientId};
use crate::matching::compatibility::is_compatible;
use crate::matching::scoring::compute_score;

/// Input-contract violations. These indicate a bug in the caller, not a
/// "no match" outcome.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MatchingError {
    #[error("Donor {0} has no pledged organs and must not be offered for matching")]
    WithdrawnDonor(DonorId),

    #[error("Donor {0} appears more than once in the input")]
    DuplicateDonor(DonorId),

    #[error("Recipient {0} appears more than once in the input")]
    DuplicateRecipient(RecipientId),
}

/// A single donor-recipient pairing produced by a matching run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchResult {
    pub recipient: RecipientId,
    pub donor: DonorId,

    /// Organ the donor supplies to this recipient
    pub organ: OrganType,

    /// Recipient priority score at the time of the run
    pub priority_score: u32,
}

/// A recipient paired with its priority score for the current run
#[derive(Debug, Clone, Copy)]
pub struct RankedRecipient<'a> {
    pub recipient: &'a Recipient,
    pub score: u32,
}

/// Assigns donors to recipients that have already been ranked.
///
/// `ranked` is in service order (highest priority first). Implementations must
/// never pair a recipient with a donor that has not pledged the needed organ
/// or is not blood-compatible.
pub trait AssignmentStrategy {
    fn name(&self) -> &'static str;

    fn assign(&self, donors: &[Donor], ranked: &[RankedRecipient<'_>]) -> Vec<MatchResult>;
}

/// Single-pass greedy assignment.
///
/// Each recipient, in ranked order, takes the first unassigned compatible
/// donor from the pool for its organ. A donor serves at most one recipient per
/// run, even if it pledged several organs. This does not maximise the number
/// of pairings.
#[derive(Debug, Clone, Copy, Default)]
pub struct GreedyAssignment;

impl AssignmentStrategy for GreedyAssignment {
    fn name(&self) -> &'static str {
        "greedy"
    }

    fn assign(&self, donors: &[Donor], ranked: &[RankedRecipient<'_>]) -> Vec<MatchResult> {
        // Per-organ candidate pools, in donor collection order
        let mut pools: BTreeMap<OrganType, Vec<&Donor>> = BTreeMap::new();
        for donor in donors {
            for organ in &donor.organs {
                pools.entry(*organ).or_default().push(donor);
            }
        }

        let mut assigned: HashSet<&DonorId> = HashSet::new();
        let mut results = Vec::new();

        for entry in ranked {
            let recipient = entry.recipient;
            let Some(pool) = pools.get_mut(&recipient.organ_needed) else {
                continue;
            };

            let position = pool.iter().position(|donor| {
                !assigned.contains(&donor.id)
                    && is_compatible(donor.blood_group, recipient.blood_group)
            });

            if let Some(idx) = position {
                let donor = pool.remove(idx);
                assigned.insert(&donor.id);
                results.push(MatchResult {
                    recipient: recipient.id.clone(),
                    donor: donor.id.clone(),
                    organ: recipient.organ_needed,
                    priority_score: entry.score,
                });
            }
        }

        results
    }
}

/// Configuration for the matching engine
#[derive(Debug, Clone, Default)]
pub struct MatchingConfig {
    /// Skip recipients that already have a potential match
    pub searching_only: bool,
}

/// Ranks recipients and delegates assignment to an [`AssignmentStrategy`].
///
/// Holds no state between runs; every call works on the collections it is
/// given and never mutates them.
pub struct MatchingEngine<S = GreedyAssignment> {
    strategy: S,
    config: MatchingConfig,
}

impl MatchingEngine<GreedyAssignment> {
    /// Create a greedy engine with default configuration
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(MatchingConfig::default())
    }

    /// Create a greedy engine with custom configuration
    #[must_use]
    pub fn with_config(config: MatchingConfig) -> Self {
        Self {
            strategy: GreedyAssignment,
            config,
        }
    }
}

impl Default for MatchingEngine<GreedyAssignment> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: AssignmentStrategy> MatchingEngine<S> {
    /// Create an engine around a different assignment algorithm
    pub fn with_strategy(strategy: S, config: MatchingConfig) -> Self {
        Self { strategy, config }
    }

    #[must_use]
    pub fn strategy_name(&self) -> &'static str {
        self.strategy.name()
    }

    /// Rank recipients by priority, highest first.
    ///
    /// The sort is stable so equal scores keep their collection order.
    #[must_use]
    pub fn rank<'a>(
        &self,
        recipients: &'a [Recipient],
        now: DateTime<Utc>,
    ) -> Vec<RankedRecipient<'a>> {
        let mut ranked: Vec<RankedRecipient<'a>> = recipients
            .iter()
            .filter(|r| !self.config.searching_only || r.is_searching())
            .map(|recipient| RankedRecipient {
                recipient,
                score: compute_score(recipient, now),
            })
            .collect();

        ranked.sort_by(|a, b| b.score.cmp(&a.score));
        ranked
    }

    /// Pair donors with recipients.
    ///
    /// Recipients with no compatible donor are simply absent from the output.
    ///
    /// # Errors
    ///
    /// Returns `MatchingError` if a donor has no pledged organs or an
    /// identifier is repeated.
    pub fn run(
        &self,
        donors: &[Donor],
        recipients: &[Recipient],
        now: DateTime<Utc>,
    ) -> Result<Vec<MatchResult>, MatchingError> {
        validate_input(donors, recipients)?;

        let ranked = self.rank(recipients, now);
        let results = self.strategy.assign(donors, &ranked);

        tracing::debug!(
            strategy = self.strategy.name(),
            donors = donors.len(),
            recipients = ranked.len(),
            matches = results.len(),
            "Matching run complete"
        );

        Ok(results)
    }
}

/// Run the default greedy engine over the full donor and recipient collections
///
/// # Errors
///
/// Returns `MatchingError` on input-contract violations.
pub fn run_matching(
    donors: &[Donor],
    recipients: &[Recipient],
    now: DateTime<Utc>,
) -> Result<Vec<MatchResult>, MatchingError> {
    MatchingEngine::new().run(donors, recipients, now)
}

fn validate_input(donors: &[Donor], recipients: &[Recipient]) -> Result<(), MatchingError> {
    let mut donor_ids = HashSet::new();
    for donor in donors {
        if donor.is_withdrawn() {
            return Err(MatchingError::WithdrawnDonor(donor.id.clone()));
        }
        if !donor_ids.insert(&donor.id) {
            return Err(MatchingError::DuplicateDonor(donor.id.clone()));
        }
    }

    let mut recipient_ids = HashSet::new();
    for recipient in recipients {
        if !recipient_ids.insert(&recipient.id) {
            return Err(MatchingError::DuplicateRecipient(recipient.id.clone()));
        }
    }

    Ok(())
}
