//! Privacy-preserving contact details for ReUnite.
//!
//! This crate provides:
//! - Phone and email masking for viewers who may not see full details
//! - Phone formatting for viewers who may
//! - Contact validation used by the listing form
//! - [`ContactDisplay`], the per-viewer view of a listing's contact
//!
//! Masking never fails: malformed input degrades to a fixed placeholder.
//!
//! # Example
//!
//! ```
//! use reunite_contact::{mask_email, mask_phone, ContactDisplay, Viewer};
//!
//! assert_eq!(mask_phone("9876543210"), "98****10");
//! assert_eq!(mask_email("user@example.com"), "u****@example.com");
//!
//! let shown = ContactDisplay::for_viewer(Some("9876543210"), "user@example.com", Viewer::Anonymous);
//! assert!(shown.masked);
//! ```

mod display;
mod error;
mod format;
mod mask;
mod validate;

#[cfg(feature = "wasm")]
mod wasm;

pub use display::{ContactDisplay, Viewer};
pub use error::{ContactError, ContactErrorCode, Result};
pub use format::{digits, format_phone};
pub use mask::{mask_email, mask_phone, MASKED_EMAIL, MASKED_PHONE};
pub use validate::{is_valid_email, is_valid_phone, validate_email, validate_phone};
