//! Application state and its persistence.
//!
//! [`registry::Registry`] owns an [`state::AppState`] holding every donor,
//! recipient and interest notification. All mutations go through its action
//! functions, and each action rewrites the affected buckets in full through
//! [`buckets::JsonBuckets`].
//!
//! ## Buckets
//!
//! | Bucket          | File                 | Contents                    |
//! |-----------------|----------------------|-----------------------------|
//! | `donors`        | `donors.json`        | JSON array of donors        |
//! | `recipients`    | `recipients.json`    | JSON array of recipients    |
//! | `notifications` | `notifications.json` | JSON array of notifications |

use thiserror::Error;

use crate::core::types::{DonorId, HospitalId, OrganType, RecipientId};
use crate::matching::engine::MatchingError;
use crate::utils::validation::ValidationError;

pub mod buckets;
pub mod registry;
pub mod state;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Failed to access {bucket} bucket: {source}")]
    Io {
        bucket: &'static str,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {bucket} bucket: {source}")]
    Parse {
        bucket: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("Donor '{0}' not found")]
    DonorNotFound(DonorId),

    #[error("Recipient '{0}' not found")]
    RecipientNotFound(RecipientId),

    #[error("A pledge must include at least one organ")]
    EmptyPledge,

    #[error("Donor '{donor}' has not pledged {organ}")]
    OrganNotPledged { donor: DonorId, organ: OrganType },

    #[error("Patient ID '{0}' is already on the waitlist")]
    DuplicatePatientId(String),

    #[error("Hospital '{0}' is not in the directory")]
    UnknownHospital(HospitalId),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Matching(#[from] MatchingError),
}
