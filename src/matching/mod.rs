//! Matching and prioritization engine.
//!
//! This module provides the core matching functionality:
//!
//! - [`compatibility`]: fixed ABO/Rh table, keyed by recipient group
//! - [`scoring`]: recipient priority score (urgency base + days waiting)
//! - [`engine`]: ranked, greedy donor-to-recipient assignment
//! - [`auto_match`]: single-candidate selection when a donor offers an organ
//!
//! ## Matching Algorithm
//!
//! 1. **Rank**: recipients sorted by priority score, highest first, stable on ties
//! 2. **Pool**: donors grouped per pledged organ, in collection order
//! 3. **Assign**: each recipient takes the first unassigned compatible donor
//!    from its organ's pool
//!
//! Recipients left without a donor are omitted from the result. The assignment
//! step sits behind [`engine::AssignmentStrategy`] so that a different
//! algorithm can replace the greedy pass without touching callers.
//!
//! ## Example
//!
//! ```rust
//! use chrono::Utc;
//! use organ_match::core::donor::Donor;
//! use organ_match::core::recipient::Recipient;
//! use organ_match::core::types::{BloodGroup, OrganType, Urgency};
//! use organ_match::matching::engine::run_matching;
//!
//! let now = Utc::now();
//! let donors = vec![Donor::new("D-1", BloodGroup::ONeg, now).with_organs([OrganType::Kidney])];
//! let recipients = vec![Recipient::new(
//!     "R-1", "PT-1", BloodGroup::APos, OrganType::Kidney, Urgency::Medium, now,
//! )];
//!
//! let matches = run_matching(&donors, &recipients, now).unwrap();
//! assert_eq!(matches.len(), 1);
//! ```

pub mod auto_match;
pub mod compatibility;
pub mod engine;
pub mod scoring;
