//! Core data types for donors, recipients and the waitlist.
//!
//! - [`Donor`]: a pledge of one or more organs under a single blood group
//! - [`Recipient`]: a waitlisted patient needing exactly one organ
//! - [`InterestNotification`]: log entry for a donor offering a specific organ
//! - [`Hospital`]: directory record used for display
//! - [`BloodGroup`], [`OrganType`], [`Urgency`], [`RecipientStatus`]: closed
//!   enumerations that fail loudly on unrecognised input
//!
//! ## Urgency ordering
//!
//! | Urgency  | Base score |
//! |----------|------------|
//! | Critical | 150        |
//! | High     | 100        |
//! | Medium   | 50         |
//!
//! [`Donor`]: donor::Donor
//! [`Recipient`]: recipient::Recipient
//! [`InterestNotification`]: notification::InterestNotification
//! [`Hospital`]: hospital::Hospital
//! [`BloodGroup`]: types::BloodGroup
//! [`OrganType`]: types::OrganType
//! [`Urgency`]: types::Urgency
//! [`RecipientStatus`]: types::RecipientStatus

pub mod donor;
pub mod hospital;
pub mod notification;
pub mod recipient;
pub mod types;
