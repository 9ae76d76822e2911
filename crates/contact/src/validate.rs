//! Contact validation for the listing form.

use crate::error::{ContactError, Result};
use crate::format::digits;
use once_cell::sync::Lazy;
use regex::Regex;

static EMAIL: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap());

/// Digits a phone number may carry once formatting is stripped.
const PHONE_DIGITS: std::ops::RangeInclusive<usize> = 10..=15;

/// Check an email address has the shape `local@domain.tld`.
pub fn validate_email(email: &str) -> Result<()> {
    if EMAIL.is_match(email) {
        Ok(())
    } else {
        Err(ContactError::InvalidEmail(email.to_string()))
    }
}

/// Check a phone number has 10 to 15 digits after stripping formatting.
pub fn validate_phone(phone: &str) -> Result<()> {
    let count = digits(phone).len();
    if PHONE_DIGITS.contains(&count) {
        Ok(())
    } else {
        Err(ContactError::InvalidPhone(format!(
            "{phone} has {count} digits, expected {}-{}",
            PHONE_DIGITS.start(),
            PHONE_DIGITS.end()
        )))
    }
}

/// True if [`validate_email`] accepts the address.
#[inline]
pub fn is_valid_email(email: &str) -> bool {
    validate_email(email).is_ok()
}

/// True if [`validate_phone`] accepts the number.
#[inline]
pub fn is_valid_phone(phone: &str) -> bool {
    validate_phone(phone).is_ok()
}
