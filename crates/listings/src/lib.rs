//! Listings, categories and the browse engine for ReUnite.
//!
//! This crate provides:
//! - The [`Item`] model with its status workflow
//! - The [`CategoryRegistry`] shared by every consumer
//! - [`FilterState`] and the [`BrowseEngine`] that applies it
//! - Item sources with a sample-data fallback
//! - Post-item validation, statistics, map markers, share links and time helpers
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use reunite_listings::{fixture_items, BrowseEngine, CategoryRegistry, FilterState};
//!
//! let items = fixture_items();
//! let engine = BrowseEngine::new(Arc::new(CategoryRegistry::new()));
//!
//! let hits = engine.browse(&items, &FilterState::new().with_query("phone")).unwrap();
//! assert_eq!(hits[0].item.name, "iPhone 14 Pro");
//! ```

pub mod browse;
pub mod category;
pub mod draft;
mod error;
pub mod filter;
pub mod map;
pub mod model;
pub mod share;
pub mod source;
pub mod stats;
pub mod time;

#[cfg(feature = "wasm")]
mod wasm;

pub use browse::{BrowseEngine, BrowseHit, ItemIndex};
pub use category::{CategoryInfo, CategoryKey, CategoryRegistry};
pub use draft::{ImageAttachment, ItemDraft, MAX_IMAGE_BYTES};
pub use error::{ListingError, ListingErrorCode, Result, SourceError};
pub use filter::{FilterState, GeoRadius, SavedFilter, SavedFilters, TypeFilter};
pub use map::{map_points, MapPoint};
pub use model::{Item, ItemStatus, ItemType, Location};
pub use share::{share_url, telegram_link, whatsapp_link};
pub use source::{fixture_items, FallbackSource, FixtureSource, ItemSource, JsonFileSource};
pub use stats::ListingStats;
pub use time::{should_auto_archive, time_ago};
