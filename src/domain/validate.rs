//! Input Validation Rules
//!
//! Field-level checks shared by both stores. Patterns match the forms
//! served by the portal: a generic email shape and mainland-CN mobile
//! numbers (11 digits, `1` followed by `3`-`9`).

use std::sync::LazyLock;

use regex::Regex;

use super::error::StoreError;

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("Invalid regex"));

static PHONE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^1[3-9]\d{9}$").expect("Invalid regex"));

/// Minimum accepted password length.
pub const MIN_PASSWORD_LEN: usize = 6;

/// Check email shape (`local@domain.tld`, no whitespace).
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

/// Check a mainland-CN mobile number.
pub fn is_valid_phone(phone: &str) -> bool {
    PHONE_RE.is_match(phone)
}

/// Reject blank (empty or whitespace-only) required fields, returning
/// the trimmed value on success.
pub fn require_non_blank<'a>(
    value: &'a str,
    field: &'static str,
) -> Result<&'a str, StoreError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(StoreError::MissingField(field));
    }
    Ok(trimmed)
}

/// Enforce the password length policy.
pub fn check_password_strength(password: &str) -> Result<(), StoreError> {
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(StoreError::Validation(format!(
            "password must be at least {MIN_PASSWORD_LEN} characters"
        )));
    }
    Ok(())
}
