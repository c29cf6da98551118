//! Field normalization shared by the lifecycle services

use club_core::{is_valid_phone, normalize_email, DomainError};
use validator::ValidateEmail;

/// Normalized email, or `InvalidEmail`
pub(crate) fn checked_email(raw: &str) -> Result<String, DomainError> {
    let email = normalize_email(raw);
    if email.validate_email() {
        Ok(email)
    } else {
        Err(DomainError::InvalidEmail)
    }
}

/// Trimmed phone in `(XXX) XXX-XXXX` form, or `InvalidPhone`
pub(crate) fn checked_phone(raw: &str) -> Result<String, DomainError> {
    let phone = raw.trim();
    if is_valid_phone(phone) {
        Ok(phone.to_string())
    } else {
        Err(DomainError::InvalidPhone)
    }
}

pub(crate) fn normalize_subdomain(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Trimmed text, `None` when blank
pub(crate) fn non_blank(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}
