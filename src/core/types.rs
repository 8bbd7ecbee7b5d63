use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

/// Errors raised when textual input does not name a known domain value.
///
/// These are caller contract violations: silently coercing them would corrupt
/// compatibility checks and priority ordering, so they always surface.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("Invalid blood group '{0}' (expected one of A+, A-, B+, B-, AB+, AB-, O+, O-)")]
    InvalidBloodGroup(String),

    #[error("Invalid organ type '{0}' (expected one of heart, lungs, liver, kidney, pancreas, intestine, cornea)")]
    InvalidOrganType(String),

    #[error("Invalid urgency '{0}' (expected critical, high or medium)")]
    InvalidUrgency(String),

    #[error("Invalid recipient status '{0}'")]
    InvalidStatus(String),
}

/// Unique identifier for a pledged donor
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DonorId(pub String);

impl DonorId {
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }
}

impl std::fmt::Display for DonorId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(&self.0)
    }
}

/// Internal identifier for a waitlisted recipient.
///
/// Distinct from the patient-facing identifier printed on hospital paperwork.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecipientId(pub String);

impl RecipientId {
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }
}

impl std::fmt::Display for RecipientId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(&self.0)
    }
}

/// Identifier for an interest notification log entry
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NotificationId(pub String);

impl NotificationId {
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }
}

impl std::fmt::Display for NotificationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(&self.0)
    }
}

/// Identifier for a hospital in the embedded directory
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HospitalId(pub String);

impl HospitalId {
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }
}

impl std::fmt::Display for HospitalId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(&self.0)
    }
}

/// ABO/Rh blood group
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum BloodGroup {
    #[serde(rename = "A+")]
    APos,
    #[serde(rename = "A-")]
    ANeg,
    #[serde(rename = "B+")]
    BPos,
    #[serde(rename = "B-")]
    BNeg,
    #[serde(rename = "AB+")]
    AbPos,
    #[serde(rename = "AB-")]
    AbNeg,
    #[serde(rename = "O+")]
    OPos,
    #[serde(rename = "O-")]
    ONeg,
}

impl BloodGroup {
    pub const ALL: [BloodGroup; 8] = [
        Self::APos,
        Self::ANeg,
        Self::BPos,
        Self::BNeg,
        Self::AbPos,
        Self::AbNeg,
        Self::OPos,
        Self::ONeg,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::APos => "A+",
            Self::ANeg => "A-",
            Self::BPos => "B+",
            Self::BNeg => "B-",
            Self::AbPos => "AB+",
            Self::AbNeg => "AB-",
            Self::OPos => "O+",
            Self::ONeg => "O-",
        }
    }
}

impl std::fmt::Display for BloodGroup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for BloodGroup {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_uppercase();
        Self::ALL
            .into_iter()
            .find(|group| group.as_str() == normalized)
            .ok_or_else(|| ParseError::InvalidBloodGroup(s.to_string()))
    }
}

/// Organ types that can be pledged or needed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrganType {
    Heart,
    Lungs,
    Liver,
    Kidney,
    Pancreas,
    Intestine,
    Cornea,
}

impl OrganType {
    pub const ALL: [OrganType; 7] = [
        Self::Heart,
        Self::Lungs,
        Self::Liver,
        Self::Kidney,
        Self::Pancreas,
        Self::Intestine,
        Self::Cornea,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Heart => "heart",
            Self::Lungs => "lungs",
            Self::Liver => "liver",
            Self::Kidney => "kidney",
            Self::Pancreas => "pancreas",
            Self::Intestine => "intestine",
            Self::Cornea => "cornea",
        }
    }
}

impl std::fmt::Display for OrganType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Heart => f.pad("Heart"),
            Self::Lungs => f.pad("Lungs"),
            Self::Liver => f.pad("Liver"),
            Self::Kidney => f.pad("Kidney"),
            Self::Pancreas => f.pad("Pancreas"),
            Self::Intestine => f.pad("Intestine"),
            Self::Cornea => f.pad("Cornea"),
        }
    }
}

impl FromStr for OrganType {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "heart" => Ok(Self::Heart),
            "lungs" | "lung" => Ok(Self::Lungs),
            "liver" => Ok(Self::Liver),
            "kidney" | "kidneys" => Ok(Self::Kidney),
            "pancreas" => Ok(Self::Pancreas),
            "intestine" | "intestines" => Ok(Self::Intestine),
            "cornea" | "corneas" => Ok(Self::Cornea),
            _ => Err(ParseError::InvalidOrganType(s.to_string())),
        }
    }
}

/// Clinical urgency, totally ordered with `Critical` as the highest priority.
///
/// Variant order is significant: the derived `Ord` sorts `Critical` first,
/// so ascending order is highest-priority-first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Urgency {
    Critical,
    High,
    Medium,
}

impl Urgency {
    /// Base priority contributed by the urgency level
    #[must_use]
    pub fn base_score(self) -> u32 {
        match self {
            Self::Critical => 150,
            Self::High => 100,
            Self::Medium => 50,
        }
    }
}

impl std::fmt::Display for Urgency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Critical => f.pad("Critical"),
            Self::High => f.pad("High"),
            Self::Medium => f.pad("Medium"),
        }
    }
}

impl FromStr for Urgency {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "critical" => Ok(Self::Critical),
            "high" => Ok(Self::High),
            "medium" => Ok(Self::Medium),
            _ => Err(ParseError::InvalidUrgency(s.to_string())),
        }
    }
}

/// Waitlist status of a recipient
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum RecipientStatus {
    #[default]
    Searching,
    PotentialMatchFound,
}

impl std::fmt::Display for RecipientStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Searching => f.pad("Searching"),
            Self::PotentialMatchFound => f.pad("Potential Match Found"),
        }
    }
}

impl FromStr for RecipientStatus {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace([' ', '-'], "_").as_str() {
            "searching" => Ok(Self::Searching),
            "potential_match_found" => Ok(Self::PotentialMatchFound),
            _ => Err(ParseError::InvalidStatus(s.to_string())),
        }
    }
}
