use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use thiserror::Error;

use crate::core::hospital::Hospital;
use crate::core::types::HospitalId;

#[derive(Error, Debug)]
pub enum DirectoryError {
    #[error("Failed to read hospital directory: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse hospital directory: {0}")]
    ParseError(#[from] serde_json::Error),
}

/// Directory version for compatibility checking
pub const DIRECTORY_VERSION: &str = "1.0.0";

/// Serializable directory format
#[derive(Debug, Clone, Deserialize)]
pub struct DirectoryData {
    pub version: String,
    pub hospitals: Vec<Hospital>,
}

/// Read-only lookup of transplant centres, used for display enrichment only
#[derive(Debug, Clone)]
pub struct HospitalDirectory {
    /// All hospitals, in file order
    pub hospitals: Vec<Hospital>,

    /// Index: hospital ID -> index in hospitals vec
    id_to_index: HashMap<HospitalId, usize>,
}

impl HospitalDirectory {
    /// Create an empty directory
    pub fn new() -> Self {
        Self {
            hospitals: Vec::new(),
            id_to_index: HashMap::new(),
        }
    }

    /// Load the embedded default directory
    pub fn load_embedded() -> Result<Self, DirectoryError> {
        // Validated at compile time via build.rs
        const EMBEDDED_DIRECTORY: &str = include_str!("../../catalogs/hospitals.json");
        Self::from_json(EMBEDDED_DIRECTORY)
    }

    /// Load directory from a JSON file
    pub fn load_from_file(path: &Path) -> Result<Self, DirectoryError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Parse directory from JSON string
    pub fn from_json(json: &str) -> Result<Self, DirectoryError> {
        let data: DirectoryData = serde_json::from_str(json)?;

        // Version check (warn but don't fail)
        if data.version != DIRECTORY_VERSION {
            tracing::warn!(
                "Hospital directory version mismatch (expected {}, found {})",
                DIRECTORY_VERSION,
                data.version
            );
        }

        let mut directory = Self::new();
        for hospital in data.hospitals {
            directory.add_hospital(hospital);
        }

        Ok(directory)
    }

    /// Add a hospital; a repeated ID replaces the earlier lookup entry
    fn add_hospital(&mut self, hospital: Hospital) {
        let index = self.hospitals.len();
        self.id_to_index.insert(hospital.id.clone(), index);
        self.hospitals.push(hospital);
    }

    /// Get a hospital by ID
    pub fn get(&self, id: &HospitalId) -> Option<&Hospital> {
        self.id_to_index.get(id).map(|&idx| &self.hospitals[idx])
    }

    pub fn contains(&self, id: &HospitalId) -> bool {
        self.id_to_index.contains_key(id)
    }

    /// Display label for an optional affiliation
    pub fn describe(&self, id: Option<&HospitalId>) -> String {
        match id {
            Some(id) => self
                .get(id)
                .map_or_else(|| format!("{id} (unknown)"), ToString::to_string),
            None => "-".to_string(),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Hospital> {
        self.hospitals.iter()
    }

    /// Number of hospitals in directory
    pub fn len(&self) -> usize {
        self.hospitals.len()
    }

    /// Check if directory is empty
    pub fn is_empty(&self) -> bool {
        self.hospitals.is_empty()
    }
}

impl Default for HospitalDirectory {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_embedded_directory() {
        let directory = HospitalDirectory::load_embedded().unwrap();
        assert!(!directory.is_empty());
        assert_eq!(directory.len(), 5);
    }

    #[test]
    fn test_get_by_id() {
        let directory = HospitalDirectory::load_embedded().unwrap();
        let hospital = directory.get(&HospitalId::new("H002")).unwrap();
        assert_eq!(hospital.name, "Apollo Transplant Centre");
        assert_eq!(hospital.city, "Chennai");
        assert!(directory.get(&HospitalId::new("H999")).is_none());
    }

    #[test]
    fn test_describe() {
        let directory = HospitalDirectory::load_embedded().unwrap();
        assert_eq!(
            directory.describe(Some(&HospitalId::new("H001"))),
            "City General Hospital (Mumbai)"
        );
        let unknown = HospitalId::new("X");
        assert_eq!(directory.describe(Some(&unknown)), "X (unknown)");
        assert_eq!(directory.describe(None), "-");
    }

    #[test]
    fn test_custom_directory_later_id_wins() {
        let json = r#"{
            "version": "1.0.0",
            "hospitals": [
                {"id": "T1", "name": "Old Wing", "city": "Pune", "contact": "old@example.org"},
                {"id": "T2", "name": "Lakeside", "city": "Nagpur", "contact": "lake@example.org"},
                {"id": "T1", "name": "New Wing", "city": "Pune", "contact": "new@example.org"}
            ]
        }"#;
        let directory = HospitalDirectory::from_json(json).unwrap();
        assert_eq!(directory.len(), 3);
        let replaced = directory.get(&HospitalId::new("T1")).unwrap();
        assert_eq!(replaced.name, "New Wing");
        assert!(directory.contains(&HospitalId::new("T2")));
        assert!(!directory.contains(&HospitalId::new("H001")));
    }

    #[test]
    fn test_malformed_json_is_error() {
        assert!(matches!(
            HospitalDirectory::from_json("{\"hospitals\": 3}"),
            Err(DirectoryError::ParseError(_))
        ));
    }
}
