//! Redaction of phone numbers and email addresses.

use crate::format::digits;

/// Shown instead of a phone number that is too short to mask.
pub const MASKED_PHONE: &str = "****";

/// Shown instead of an email address that cannot be split.
pub const MASKED_EMAIL: &str = "****@****";

/// Mask a phone number, keeping the first and last two digits.
///
/// Non-digits are dropped first; fewer than four digits yields [`MASKED_PHONE`].
///
/// ```
/// assert_eq!(reunite_contact::mask_phone("+1 (987) 654-3210"), "19****10");
/// ```
pub fn mask_phone(phone: &str) -> String {
    let digits = digits(phone);
    if digits.len() < 4 {
        return MASKED_PHONE.to_string();
    }

    // ASCII digits only, so byte slicing is on char boundaries
    format!("{}****{}", &digits[..2], &digits[digits.len() - 2..])
}

/// Mask an email address, keeping the first character and the domain.
///
/// The address is split on the first `@`. A missing `@`, an empty local
/// part or an empty domain yields [`MASKED_EMAIL`].
pub fn mask_email(email: &str) -> String {
    let Some((local, domain)) = email.split_once('@') else {
        return MASKED_EMAIL.to_string();
    };

    match local.chars().next() {
        Some(first) if !domain.is_empty() => format!("{first}****@{domain}"),
        _ => MASKED_EMAIL.to_string(),
    }
}
