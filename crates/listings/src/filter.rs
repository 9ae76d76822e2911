//! Browse filter state and saved filters.

use crate::category::CategoryKey;
use crate::error::{ListingError, Result};
use crate::model::ItemType;
use reunite_geo::Coordinate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

/// Which item types to show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TypeFilter {
    /// Lost and found
    #[default]
    All,
    /// Lost only
    Lost,
    /// Found only
    Found,
}

impl TypeFilter {
    /// True if an item of type `item_type` passes.
    pub fn matches(self, item_type: ItemType) -> bool {
        match self {
            TypeFilter::All => true,
            TypeFilter::Lost => item_type == ItemType::Lost,
            TypeFilter::Found => item_type == ItemType::Found,
        }
    }

    /// Stable string form.
    pub fn as_str(&self) -> &'static str {
        match self {
            TypeFilter::All => "all",
            TypeFilter::Lost => "lost",
            TypeFilter::Found => "found",
        }
    }
}

impl fmt::Display for TypeFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TypeFilter {
    type Err = ListingError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(TypeFilter::All),
            "lost" => Ok(TypeFilter::Lost),
            "found" => Ok(TypeFilter::Found),
            _ => Err(ListingError::UnknownValue {
                kind: "type filter",
                value: s.to_string(),
            }),
        }
    }
}

impl From<ItemType> for TypeFilter {
    fn from(item_type: ItemType) -> Self {
        match item_type {
            ItemType::Lost => TypeFilter::Lost,
            ItemType::Found => TypeFilter::Found,
        }
    }
}

/// A circle to restrict results to.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoRadius {
    /// Circle center
    pub center: Coordinate,
    /// Radius in kilometers; non-positive matches nothing
    pub radius_km: f64,
}

impl GeoRadius {
    /// Create a radius filter.
    pub fn new(center: Coordinate, radius_km: f64) -> Self {
        Self { center, radius_km }
    }

    /// True if the radius can match anything.
    pub fn is_usable(&self) -> bool {
        self.radius_km > 0.0
    }
}

/// Everything the browse page filters on.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterState {
    /// Free-text query
    pub query: String,
    /// Lost, found or both
    #[serde(rename = "type")]
    pub item_type: TypeFilter,
    /// Selected categories; empty means all
    pub categories: BTreeSet<CategoryKey>,
    /// Distance restriction
    pub geo: Option<GeoRadius>,
}

impl FilterState {
    /// A filter that shows everything.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the query.
    #[must_use]
    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = query.into();
        self
    }

    /// Set the type filter.
    #[must_use]
    pub fn with_type(mut self, item_type: TypeFilter) -> Self {
        self.item_type = item_type;
        self
    }

    /// Add a category to the selection.
    #[must_use]
    pub fn with_category(mut self, key: CategoryKey) -> Self {
        self.categories.insert(key);
        self
    }

    /// Restrict to a circle.
    #[must_use]
    pub fn near(mut self, center: Coordinate, radius_km: f64) -> Self {
        self.geo = Some(GeoRadius::new(center, radius_km));
        self
    }

    /// Flip a category in or out of the selection; returns true if now selected.
    pub fn toggle_category(&mut self, key: CategoryKey) -> bool {
        if self.categories.remove(&key) {
            false
        } else {
            self.categories.insert(key);
            true
        }
    }

    /// Clear the category selection.
    pub fn clear_categories(&mut self) {
        self.categories.clear();
    }

    /// Drop the distance restriction.
    pub fn clear_geo(&mut self) {
        self.geo = None;
    }

    /// The query as used for search.
    pub fn trimmed_query(&self) -> &str {
        self.query.trim()
    }

    /// True if the filter lets every item through.
    pub fn is_empty(&self) -> bool {
        self.trimmed_query().is_empty()
            && self.item_type == TypeFilter::All
            && self.categories.is_empty()
            && self.geo.is_none()
    }

    /// Name used when saving this filter: `{type}-{categories}-{query}`.
    pub fn label(&self) -> String {
        let categories: Vec<&str> = self.categories.iter().map(CategoryKey::as_str).collect();
        format!("{}-{}-{}", self.item_type, categories.join(","), self.query)
    }
}

/// A named filter snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedFilter {
    /// Name shown in the saved list
    pub name: String,
    /// The filter as it was saved
    pub filter: FilterState,
}

/// Saved filters, unique by name, in save order.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SavedFilters {
    filters: Vec<SavedFilter>,
}

impl SavedFilters {
    /// An empty list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Save `filter` under its label. Returns false if that name already exists.
    pub fn save(&mut self, filter: &FilterState) -> bool {
        self.save_as(filter.label(), filter)
    }

    /// Save `filter` under `name`. Returns false if that name already exists.
    pub fn save_as(&mut self, name: impl Into<String>, filter: &FilterState) -> bool {
        let name = name.into();
        if self.get(&name).is_some() {
            return false;
        }
        self.filters.push(SavedFilter {
            name,
            filter: filter.clone(),
        });
        true
    }

    /// Look up a saved filter by name.
    pub fn get(&self, name: &str) -> Option<&FilterState> {
        self.filters.iter().find(|s| s.name == name).map(|s| &s.filter)
    }

    /// Remove a saved filter; returns it if it existed.
    pub fn remove(&mut self, name: &str) -> Option<SavedFilter> {
        let pos = self.filters.iter().position(|s| s.name == name)?;
        Some(self.filters.remove(pos))
    }

    /// Saved filters in save order.
    pub fn iter(&self) -> std::slice::Iter<'_, SavedFilter> {
        self.filters.iter()
    }

    /// Number of saved filters.
    pub fn len(&self) -> usize {
        self.filters.len()
    }

    /// True if nothing is saved.
    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }
}
