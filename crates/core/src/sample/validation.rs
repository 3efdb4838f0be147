//! Input validation for sample payloads.
//!
//! Pure functions, run before any storage access.

use super::error::ValidationError;
use super::types::{NewSample, SampleUpdate};

pub const PSEUDONYM_MIN_LEN: usize = 11;
pub const PSEUDONYM_MAX_LEN: usize = 63;

const EMAIL_MAX_LEN: usize = 254;
const EMAIL_LOCAL_MAX_LEN: usize = 64;
const EMAIL_DOMAIN_MAX_LEN: usize = 253;

/// Validates a creation request.
pub fn validate_new_sample(new: &NewSample) -> Result<(), ValidationError> {
    validate_pseudonym(&new.patient_pseudonym)?;
    validate_email(&new.submitter_email)?;
    validate_timestamp("collection_date", &new.collection_date)?;
    Ok(())
}

/// Validates an update request. The test date is mandatory here.
pub fn validate_update(update: &SampleUpdate) -> Result<(), ValidationError> {
    if update.sample_id.trim().is_empty() {
        return Err(ValidationError::MissingSampleId);
    }
    validate_timestamp("test_date", &update.test_date)?;
    Ok(())
}

/// Checks the pseudonym length in characters.
pub fn validate_pseudonym(pseudonym: &str) -> Result<(), ValidationError> {
    let len = pseudonym.chars().count();
    if !(PSEUDONYM_MIN_LEN..=PSEUDONYM_MAX_LEN).contains(&len) {
        return Err(ValidationError::PseudonymLength {
            min: PSEUDONYM_MIN_LEN,
            max: PSEUDONYM_MAX_LEN,
            len,
        });
    }
    Ok(())
}

/// Checks that a string is shaped like an email address.
pub fn validate_email(email: &str) -> Result<(), ValidationError> {
    if is_valid_email(email) {
        Ok(())
    } else {
        Err(ValidationError::InvalidEmail(email.to_string()))
    }
}

fn is_valid_email(email: &str) -> bool {
    if email.is_empty() || email.len() > EMAIL_MAX_LEN {
        return false;
    }
    if email.chars().any(|c| c.is_whitespace() || c.is_control()) {
        return false;
    }

    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if domain.contains('@') {
        return false;
    }
    if local.is_empty() || local.len() > EMAIL_LOCAL_MAX_LEN {
        return false;
    }
    if local.starts_with('.') || local.ends_with('.') || local.contains("..") {
        return false;
    }
    if domain.is_empty() || domain.len() > EMAIL_DOMAIN_MAX_LEN || !domain.contains('.') {
        return false;
    }

    domain.split('.').all(|label| {
        !label.is_empty()
            && !label.starts_with('-')
            && !label.ends_with('-')
            && label.chars().all(|c| c.is_alphanumeric() || c == '-')
    })
}

/// Checks `YYYY-MM-DDTHH:MM` with an optional trailing `Z` or `z`.
pub fn validate_timestamp(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if is_valid_timestamp(value) {
        Ok(())
    } else {
        Err(ValidationError::InvalidTimestamp {
            field,
            value: value.to_string(),
        })
    }
}

fn is_valid_timestamp(value: &str) -> bool {
    let bytes = value.as_bytes();
    let body = match bytes.len() {
        16 => bytes,
        17 if matches!(bytes[16], b'Z' | b'z') => &bytes[..16],
        _ => return false,
    };

    // 0123456789012345
    // YYYY-MM-DDTHH:MM
    body.iter().enumerate().all(|(i, b)| match i {
        4 | 7 => *b == b'-',
        10 => *b == b'T',
        13 => *b == b':',
        _ => b.is_ascii_digit(),
    })
}
