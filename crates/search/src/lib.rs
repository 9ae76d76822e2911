//! Weighted fuzzy search for ReUnite.
//!
//! This crate provides:
//! - Approximate substring matching over chars or grapheme clusters
//! - Mismatch scoring with error rate and location penalty
//! - A multi-field index with normalized key weights
//! - WASM bindings for browser usage

mod error;
pub mod fuzzy;
mod index;
pub mod scoring;

#[cfg(feature = "wasm")]
mod wasm;

pub use error::{Result, SearchError, SearchErrorCode};
pub use fuzzy::{approximate_matches, ApproxMatch};
pub use index::{tokenize, FieldMatch, FuzzyIndex, SearchHit, SearchKey};
pub use scoring::{combine, field_score, SearchOptions};
