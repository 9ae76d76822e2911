//! Error types for the contact crate.

use thiserror::Error;

/// Result type alias for contact operations.
pub type Result<T> = std::result::Result<T, ContactError>;

/// Errors raised when validating contact details.
///
/// Masking and formatting never return these.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContactError {
    /// Email address is not of the form `local@domain.tld`
    #[error("Invalid email address: {0}")]
    InvalidEmail(String),

    /// Phone number has too few or too many digits
    #[error("Invalid phone number: {0}")]
    InvalidPhone(String),
}

/// Error code for integration with reunite-core error handling.
/// Range: 12xxx for contact errors.
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactErrorCode {
    /// Email address is malformed
    InvalidEmail = 12001,
    /// Phone number is malformed
    InvalidPhone = 12002,
}

impl ContactError {
    /// Returns the error code for this error.
    pub fn code(&self) -> ContactErrorCode {
        match self {
            ContactError::InvalidEmail(_) => ContactErrorCode::InvalidEmail,
            ContactError::InvalidPhone(_) => ContactErrorCode::InvalidPhone,
        }
    }
}
