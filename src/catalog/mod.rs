//! Hospital directory.
//!
//! The directory lists transplant centres with their city and contact details.
//! An embedded directory is compiled into the binary, but a custom directory can
//! also be loaded from a JSON file. It is used only to enrich displayed
//! records; matching never consults it.
//!
//! ## Example
//!
//! ```rust
//! use organ_match::catalog::hospitals::HospitalDirectory;
//! use organ_match::core::types::HospitalId;
//!
//! let directory = HospitalDirectory::load_embedded().unwrap();
//! let hospital = directory.get(&HospitalId::new("H001"));
//! assert!(hospital.is_some());
//! ```

pub mod hospitals;
