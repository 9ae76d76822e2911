//! Error types for the search crate.

use thiserror::Error;

/// Result type alias for search operations.
pub type Result<T> = std::result::Result<T, SearchError>;

/// Errors that can occur during search operations.
#[derive(Debug, Error)]
pub enum SearchError {
    /// Options outside their usable range
    #[error("Invalid search options: {0}")]
    InvalidOptions(String),

    /// Key list unusable for indexing
    #[error("Invalid search keys: {0}")]
    InvalidKeys(String),

    /// Record shape does not match the index keys
    #[error("Index error: {0}")]
    IndexError(String),
}

/// Error code for integration with reunite-core error handling.
/// Range: 11xxx for search errors.
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchErrorCode {
    /// Options outside their usable range
    InvalidOptions = 11001,
    /// Key list unusable for indexing
    InvalidKeys = 11002,
    /// Record shape does not match the index keys
    Index = 11003,
}

impl SearchError {
    /// Returns the error code for this error.
    pub fn code(&self) -> SearchErrorCode {
        match self {
            SearchError::InvalidOptions(_) => SearchErrorCode::InvalidOptions,
            SearchError::InvalidKeys(_) => SearchErrorCode::InvalidKeys,
            SearchError::IndexError(_) => SearchErrorCode::Index,
        }
    }
}
