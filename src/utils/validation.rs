//! Centralized validation for form-level input.

/// Maximum recipients created by one simulation request (DOS protection)
pub const MAX_SIMULATED_RECIPIENTS: usize = 500;

pub const MAX_NAME_LENGTH: usize = 100;
pub const MAX_PATIENT_ID_LENGTH: usize = 32;

/// Input validation error types
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Name must not be empty")]
    EmptyName,
    #[error("Name too long: exceeds {MAX_NAME_LENGTH} characters")]
    NameTooLong,
    #[error("Name contains control characters")]
    InvalidName,
    #[error("Patient ID must not be empty")]
    EmptyPatientId,
    #[error("Patient ID too long: exceeds {MAX_PATIENT_ID_LENGTH} characters")]
    PatientIdTooLong,
    #[error("Patient ID may only contain letters, digits, '-' and '_'")]
    InvalidPatientId,
    #[error("Cannot simulate more than {MAX_SIMULATED_RECIPIENTS} recipients at once")]
    TooManySimulated,
}

/// Validate and trim a person's display name.
///
/// # Errors
///
/// Returns `ValidationError::EmptyName` if nothing remains after trimming,
/// `ValidationError::NameTooLong` if it exceeds the limit, or
/// `ValidationError::InvalidName` if it contains control characters.
pub fn validate_name(name: &str) -> Result<String, ValidationError> {
    let trimmed = name.trim();

    if trimmed.is_empty() {
        return Err(ValidationError::EmptyName);
    }

    if trimmed.chars().count() > MAX_NAME_LENGTH {
        return Err(ValidationError::NameTooLong);
    }

    if trimmed.chars().any(char::is_control) {
        return Err(ValidationError::InvalidName);
    }

    Ok(trimmed.to_string())
}

/// Validate a patient-facing identifier and normalise it to upper case.
///
/// # Examples
///
/// ```
/// use organ_match::utils::validation::validate_patient_id;
///
/// assert_eq!(validate_patient_id(" pt-1001 ").unwrap(), "PT-1001");
/// assert!(validate_patient_id("PT 1001").is_err());
/// ```
///
/// # Errors
///
/// Returns a `ValidationError` if the identifier is empty, too long, or
/// contains characters other than ASCII letters, digits, '-' and '_'.
pub fn validate_patient_id(patient_id: &str) -> Result<String, ValidationError> {
    let trimmed = patient_id.trim();

    if trimmed.is_empty() {
        return Err(ValidationError::EmptyPatientId);
    }

    if trimmed.len() > MAX_PATIENT_ID_LENGTH {
        return Err(ValidationError::PatientIdTooLong);
    }

    if !trimmed
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return Err(ValidationError::InvalidPatientId);
    }

    Ok(trimmed.to_ascii_uppercase())
}

/// Check that a simulation request stays within the allowed batch size.
///
/// # Errors
///
/// Returns `ValidationError::TooManySimulated` when `count` exceeds
/// [`MAX_SIMULATED_RECIPIENTS`].
pub fn check_simulation_limit(count: usize) -> Result<(), ValidationError> {
    if count > MAX_SIMULATED_RECIPIENTS {
        Err(ValidationError::TooManySimulated)
    } else {
        Ok(())
    }
}
