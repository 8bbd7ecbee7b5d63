//! # organ-match
//!
//! Matching and prioritization for an organ-donation registry.
//!
//! Donors pledge one or more organs; recipients join a waitlist for a single
//! organ with an urgency level. The engine ranks recipients by a priority score
//! (urgency base plus whole days waiting) and greedily pairs each with the first
//! blood-compatible donor who pledged the needed organ. A donor serves at most
//! one recipient per run.
//!
//! ## Features
//!
//! - **Blood-type compatibility**: fixed ABO/Rh acceptance table
//! - **Priority scoring**: Critical 150, High 100, Medium 50, plus days waiting
//! - **Greedy matching**: deterministic, stable on score ties
//! - **Auto-match on interest**: a donor's offer flags the most urgent waiting recipient
//! - **Persistence**: donors, recipients and notifications kept as JSON buckets
//! - **CLI and JSON API** over the same registry actions
//!
//! ## Example
//!
//! ```rust
//! use chrono::{Duration, Utc};
//! use organ_match::{BloodGroup, Donor, OrganType, Recipient, Urgency};
//! use organ_match::matching::engine::run_matching;
//!
//! let now = Utc::now();
//! let donors = vec![Donor::new("D-1", BloodGroup::ONeg, now).with_organs([OrganType::Kidney])];
//! let recipients = vec![Recipient::new(
//!     "R-1",
//!     "PT-1",
//!     BloodGroup::APos,
//!     OrganType::Kidney,
//!     Urgency::Critical,
//!     now - Duration::days(30),
//! )];
//!
//! let matches = run_matching(&donors, &recipients, now).unwrap();
//! assert_eq!(matches[0].priority_score, 180);
//! ```
//!
//! ## Modules
//!
//! - [`core`]: Donor, recipient, notification and hospital types
//! - [`matching`]: Compatibility, scoring, the matching engine and auto-match
//! - [`catalog`]: Embedded hospital directory
//! - [`store`]: Registry actions and JSON bucket persistence
//! - [`cli`]: Command-line interface implementation
//! - [`web`]: JSON API server

pub mod catalog;
pub mod cli;
pub mod core;
pub mod matching;
pub mod store;
pub mod utils;
pub mod web;

// Re-export commonly used types for convenience
pub use catalog::hospitals::HospitalDirectory;
pub use core::donor::Donor;
pub use core::recipient::Recipient;
pub use core::types::*;
pub use matching::engine::{MatchResult, MatchingEngine};
pub use store::registry::Registry;
