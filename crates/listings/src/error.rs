//! Error types for the listings crate.

use crate::model::ItemStatus;
use reunite_core::{Error as CoreError, ErrorCode};
use reunite_search::SearchError;
use thiserror::Error;

/// Result type alias for listing operations.
pub type Result<T> = std::result::Result<T, ListingError>;

/// Errors that can occur while working with listings.
#[derive(Debug, Error)]
pub enum ListingError {
    /// Status change outside the allowed workflow
    #[error("Cannot move item from {from} to {to}")]
    InvalidTransition {
        /// Current status
        from: ItemStatus,
        /// Requested status
        to: ItemStatus,
    },

    /// Draft failed validation
    #[error("Invalid listing: {0}")]
    InvalidDraft(String),

    /// Unrecognized enum value in input
    #[error("Unknown {kind}: {value}")]
    UnknownValue {
        /// What was being parsed
        kind: &'static str,
        /// The rejected input
        value: String,
    },

    /// Fuzzy index could not be built
    #[error("Search error: {0}")]
    Search(#[from] SearchError),
}

/// Errors raised by item sources.
#[derive(Debug, Error)]
pub enum SourceError {
    /// Source could not be read
    #[error("Item source unavailable: {0}")]
    Unavailable(#[from] std::io::Error),

    /// Source content is not a list of items
    #[error("Item source returned malformed data: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Error code for integration with reunite-core error handling.
/// Range: 13xxx for listing errors.
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListingErrorCode {
    /// Status change outside the allowed workflow
    InvalidTransition = 13001,
    /// Draft failed validation
    InvalidDraft = 13002,
    /// Unrecognized enum value
    UnknownValue = 13003,
    /// Fuzzy index failure
    Search = 13004,
    /// Source unreadable
    SourceUnavailable = 13101,
    /// Source content malformed
    SourceMalformed = 13102,
}

impl ListingError {
    /// Returns the error code for this error.
    pub fn code(&self) -> ListingErrorCode {
        match self {
            ListingError::InvalidTransition { .. } => ListingErrorCode::InvalidTransition,
            ListingError::InvalidDraft(_) => ListingErrorCode::InvalidDraft,
            ListingError::UnknownValue { .. } => ListingErrorCode::UnknownValue,
            ListingError::Search(_) => ListingErrorCode::Search,
        }
    }
}

impl SourceError {
    /// Returns the error code for this error.
    pub fn code(&self) -> ListingErrorCode {
        match self {
            SourceError::Unavailable(_) => ListingErrorCode::SourceUnavailable,
            SourceError::Malformed(_) => ListingErrorCode::SourceMalformed,
        }
    }
}

impl From<ListingError> for CoreError {
    fn from(err: ListingError) -> Self {
        match &err {
            ListingError::InvalidTransition { from, to } => {
                CoreError::invalid_transition(from.as_str(), to.as_str())
            }
            ListingError::InvalidDraft(msg) => CoreError::validation(msg.clone()),
            ListingError::UnknownValue { .. } => CoreError::new(ErrorCode::InvalidInput, err.to_string()),
            ListingError::Search(_) => CoreError::new(ErrorCode::Internal, err.to_string()),
        }
    }
}

impl From<SourceError> for CoreError {
    fn from(err: SourceError) -> Self {
        match err {
            SourceError::Unavailable(e) => {
                CoreError::source_unavailable(e.to_string()).with_source(e)
            }
            SourceError::Malformed(e) => CoreError::from(e),
        }
    }
}
