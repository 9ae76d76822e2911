//! Where listings come from.
//!
//! Sources never hand a failure to the browse engine: [`FallbackSource`]
//! swaps in the embedded sample listings when its primary source fails.

use crate::error::SourceError;
use crate::model::Item;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

const FIXTURE_JSON: &str = include_str!("../data/fallback_items.json");

/// Something that can supply the listings to browse.
pub trait ItemSource: Send + Sync {
    /// Short name used in logs
    fn name(&self) -> &str;

    /// Fetch the current listings
    fn fetch(&self) -> Result<Vec<Item>, SourceError>;
}

/// Keep active listings, newest first.
fn active_newest_first(mut items: Vec<Item>) -> Vec<Item> {
    items.retain(Item::is_active);
    items.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    items
}

/// Listings exported from the backend as a JSON array.
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    /// Read listings from `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The file this source reads.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ItemSource for JsonFileSource {
    fn name(&self) -> &str {
        "json-file"
    }

    fn fetch(&self) -> Result<Vec<Item>, SourceError> {
        let content = std::fs::read_to_string(&self.path)?;
        let items: Vec<Item> = serde_json::from_str(&content)?;
        debug!(path = %self.path.display(), count = items.len(), "read listings");
        Ok(active_newest_first(items))
    }
}

/// The embedded sample listings.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixtureSource;

impl ItemSource for FixtureSource {
    fn name(&self) -> &str {
        "fixture"
    }

    fn fetch(&self) -> Result<Vec<Item>, SourceError> {
        let items: Vec<Item> = serde_json::from_str(FIXTURE_JSON)?;
        Ok(active_newest_first(items))
    }
}

/// The embedded sample listings, or an empty list if they cannot be parsed.
pub fn fixture_items() -> Vec<Item> {
    FixtureSource.fetch().unwrap_or_default()
}

/// A primary source backed by the sample listings.
pub struct FallbackSource<S> {
    primary: S,
}

impl<S: ItemSource> FallbackSource<S> {
    /// Wrap `primary`.
    pub fn new(primary: S) -> Self {
        Self { primary }
    }

    /// Listings from the primary source, or the sample listings if it fails.
    ///
    /// Also reports whether the fallback was used.
    pub fn fetch_or_fallback(&self) -> (Vec<Item>, bool) {
        match self.primary.fetch() {
            Ok(items) => (items, false),
            Err(e) => {
                warn!(
                    source = self.primary.name(),
                    error = %e,
                    "Item source failed, using sample listings"
                );
                (fixture_items(), true)
            }
        }
    }
}

impl<S: ItemSource> ItemSource for FallbackSource<S> {
    fn name(&self) -> &str {
        self.primary.name()
    }

    fn fetch(&self) -> Result<Vec<Item>, SourceError> {
        Ok(self.fetch_or_fallback().0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ItemStatus;
    use std::io::Write;

    struct Broken;

    impl ItemSource for Broken {
        fn name(&self) -> &str {
            "broken"
        }

        fn fetch(&self) -> Result<Vec<Item>, SourceError> {
            Err(std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "offline").into())
        }
    }

    #[test]
    fn test_fixture_items_parse() {
        let items = fixture_items();
        assert_eq!(items.len(), 6);
        assert_eq!(items[0].name, "iPhone 14 Pro");
        assert!(items.iter().all(|i| i.coordinate().is_some()));
    }

    #[test]
    fn test_fixture_is_newest_first() {
        let items = fixture_items();
        assert!(items.windows(2).all(|w| w[0].created_at >= w[1].created_at));
    }

    #[test]
    fn test_json_file_keeps_active_newest_first() {
        let mut items = fixture_items();
        items[0].status = ItemStatus::Resolved;
        items.reverse();

        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(serde_json::to_string(&items).unwrap().as_bytes()).unwrap();

        let loaded = JsonFileSource::new(file.path()).fetch().unwrap();
        assert_eq!(loaded.len(), 5);
        assert_eq!(loaded[0].id, "2");
        assert!(loaded.iter().all(Item::is_active));
    }

    #[test]
    fn test_json_file_errors() {
        let missing = JsonFileSource::new("/nonexistent/items.json").fetch().unwrap_err();
        assert!(matches!(missing, SourceError::Unavailable(_)));

        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"{\"not\": \"a list\"}").unwrap();
        let malformed = JsonFileSource::new(file.path()).fetch().unwrap_err();
        assert!(matches!(malformed, SourceError::Malformed(_)));
    }

    #[test]
    fn test_fallback_on_failure() {
        let source = FallbackSource::new(Broken);
        let (items, used_fallback) = source.fetch_or_fallback();
        assert!(used_fallback);
        assert_eq!(items.len(), 6);
        assert!(source.fetch().is_ok());
    }

    #[test]
    fn test_fallback_passes_primary_through() {
        let source = FallbackSource::new(FixtureSource);
        let (items, used_fallback) = source.fetch_or_fallback();
        assert!(!used_fallback);
        assert_eq!(items.len(), 6);
    }
}
