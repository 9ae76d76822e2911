//! Browse engine: exact filters plus weighted fuzzy ranking.
//!
//! Filters combine with logical AND. With a query the survivors come back in
//! ranking order (best first, ties in collection order); without one they keep
//! collection order.

use crate::category::CategoryRegistry;
use crate::error::Result;
use crate::filter::FilterState;
use crate::model::Item;
use reunite_core::config::{FieldWeights, SearchConfig};
use reunite_geo::haversine_distance;
use reunite_search::{FuzzyIndex, SearchKey, SearchOptions};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;
use tracing::debug;

/// One visible item.
#[derive(Debug, Clone, Serialize)]
pub struct BrowseHit<'a> {
    /// The item
    pub item: &'a Item,
    /// Position in the input collection
    pub index: usize,
    /// Search relevance in `[0, 1]` when a query was applied
    #[serde(skip_serializing_if = "Option::is_none")]
    pub relevance: Option<f64>,
    /// Distance from the filter center in km when a radius was applied
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance_km: Option<f64>,
}

/// Fuzzy index over one item collection.
///
/// Reusable across queries while the collection is unchanged. Hit positions
/// refer to the indexed order, so the index remembers which items it saw.
#[derive(Debug, Clone)]
pub struct ItemIndex {
    index: FuzzyIndex,
    // (id, updated_at) per indexed item, in collection order
    fingerprint: Vec<(String, DateTime<Utc>)>,
}

impl ItemIndex {
    /// Number of indexed items.
    pub fn len(&self) -> usize {
        self.index.len()
    }

    /// True if no items are indexed.
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// True if this index was built for exactly these items, in this order,
    /// with no edits since.
    pub fn is_current_for(&self, items: &[Item]) -> bool {
        self.fingerprint.len() == items.len()
            && self
                .fingerprint
                .iter()
                .zip(items)
                .all(|((id, updated_at), item)| *id == item.id && *updated_at == item.updated_at)
    }
}

/// Applies a [`FilterState`] to item collections.
#[derive(Debug, Clone)]
pub struct BrowseEngine {
    registry: Arc<CategoryRegistry>,
    keys: Vec<SearchKey>,
    options: SearchOptions,
}

impl BrowseEngine {
    /// Engine with the default search tuning.
    pub fn new(registry: Arc<CategoryRegistry>) -> Self {
        Self {
            registry,
            keys: search_keys(&FieldWeights::default()),
            options: SearchOptions::default(),
        }
    }

    /// Engine tuned from the `[search]` configuration section.
    pub fn from_config(registry: Arc<CategoryRegistry>, config: &SearchConfig) -> Result<Self> {
        let engine = Self {
            registry,
            keys: search_keys(&config.weights),
            options: SearchOptions {
                threshold: config.threshold,
                location: 0,
                distance: config.distance,
                ignore_location: config.ignore_location,
            },
        };
        // Rejects unusable weights or options
        FuzzyIndex::new(engine.keys.clone(), engine.options)?;
        Ok(engine)
    }

    /// The shared category registry.
    pub fn registry(&self) -> &Arc<CategoryRegistry> {
        &self.registry
    }

    /// Search tuning in use.
    pub fn options(&self) -> &SearchOptions {
        &self.options
    }

    /// Build a fuzzy index over `items`.
    ///
    /// Indexed fields are name, description, category label and city.
    pub fn build_index(&self, items: &[Item]) -> Result<ItemIndex> {
        let mut index = FuzzyIndex::new(self.keys.clone(), self.options)?;
        for item in items {
            index.add(&[
                item.name.as_str(),
                item.description.as_str(),
                self.registry.label(&item.category),
                item.location.city.as_str(),
            ])?;
        }
        debug!(items = items.len(), "built item index");
        Ok(ItemIndex {
            index,
            fingerprint: items.iter().map(|item| (item.id.clone(), item.updated_at)).collect(),
        })
    }

    /// Filter and rank `items`.
    pub fn browse<'a>(&self, items: &'a [Item], filter: &FilterState) -> Result<Vec<BrowseHit<'a>>> {
        self.browse_with_index(items, filter, None)
    }

    /// Filter and rank `items`, reusing `index` when it still fits.
    ///
    /// An index built for other items, another order, or older versions of
    /// them is ignored and a fresh one is built.
    pub fn browse_with_index<'a>(
        &self,
        items: &'a [Item],
        filter: &FilterState,
        index: Option<&ItemIndex>,
    ) -> Result<Vec<BrowseHit<'a>>> {
        if items.is_empty() {
            return Ok(Vec::new());
        }
        if let Some(geo) = &filter.geo {
            if !geo.is_usable() {
                debug!(radius_km = geo.radius_km, "radius matches nothing");
                return Ok(Vec::new());
            }
        }

        // Exact filters first; distances are kept for the hits
        let mut passing: Vec<Option<Option<f64>>> = items
            .iter()
            .map(|item| self.exact_filters(item, filter))
            .collect();

        let query = filter.trimmed_query();
        let hits: Vec<BrowseHit<'a>> = if query.is_empty() {
            passing
                .iter()
                .enumerate()
                .filter_map(|(i, pass)| {
                    pass.map(|distance_km| BrowseHit {
                        item: &items[i],
                        index: i,
                        relevance: None,
                        distance_km,
                    })
                })
                .collect()
        } else {
            let fresh;
            let index = match index {
                Some(index) if index.is_current_for(items) => index,
                stale => {
                    if stale.is_some() {
                        debug!(items = items.len(), "item index is stale, rebuilding");
                    }
                    fresh = self.build_index(items)?;
                    &fresh
                }
            };

            index
                .index
                .search(query)
                .into_iter()
                .filter_map(|hit| {
                    let distance_km = passing[hit.index].take()?;
                    Some(BrowseHit {
                        item: &items[hit.index],
                        index: hit.index,
                        relevance: Some(hit.relevance()),
                        distance_km,
                    })
                })
                .collect()
        };

        debug!(
            total = items.len(),
            visible = hits.len(),
            query,
            item_type = %filter.item_type,
            categories = filter.categories.len(),
            "browse complete"
        );
        Ok(hits)
    }

    /// `None` if the item is filtered out, else `Some(distance)` where the
    /// distance is only set under a radius filter.
    fn exact_filters(&self, item: &Item, filter: &FilterState) -> Option<Option<f64>> {
        if !filter.item_type.matches(item.item_type) {
            return None;
        }
        if !filter.categories.is_empty()
            && !filter.categories.contains(&self.registry.resolve(&item.category))
        {
            return None;
        }
        match &filter.geo {
            None => Some(None),
            Some(geo) => {
                let distance = haversine_distance(&geo.center, &item.coordinate()?);
                (distance <= geo.radius_km).then_some(Some(distance))
            }
        }
    }
}

fn search_keys(weights: &FieldWeights) -> Vec<SearchKey> {
    vec![
        SearchKey::new("name", weights.name),
        SearchKey::new("description", weights.description),
        SearchKey::new("category", weights.category),
        SearchKey::new("city", weights.city),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::category::CategoryKey;
    use crate::filter::TypeFilter;
    use crate::model::ItemType;
    use crate::source::fixture_items;
    use reunite_geo::Coordinate;

    const TIMES_SQUARE: Coordinate = Coordinate { latitude: 40.7580, longitude: -73.9855 };

    fn engine() -> BrowseEngine {
        BrowseEngine::new(Arc::new(CategoryRegistry::new()))
    }

    fn ids(hits: &[BrowseHit<'_>]) -> Vec<String> {
        hits.iter().map(|h| h.item.id.clone()).collect()
    }

    #[test]
    fn test_engine_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<BrowseEngine>();
        assert_send_sync::<ItemIndex>();
    }

    #[test]
    fn test_empty_filter_is_identity() {
        let items = fixture_items();
        let hits = engine().browse(&items, &FilterState::new()).unwrap();

        assert_eq!(hits.len(), items.len());
        assert!(hits.iter().enumerate().all(|(i, h)| h.index == i && h.item == &items[i]));
        assert!(hits.iter().all(|h| h.relevance.is_none() && h.distance_km.is_none()));
    }

    #[test]
    fn test_empty_collection() {
        let hits = engine().browse(&[], &FilterState::new().with_query("phone")).unwrap();
        assert!(hits.is_empty());
    }

    #[test]
    fn test_type_filter_partitions() {
        let items = fixture_items();
        let engine = engine();
        let lost = engine.browse(&items, &FilterState::new().with_type(TypeFilter::Lost)).unwrap();
        let found = engine.browse(&items, &FilterState::new().with_type(TypeFilter::Found)).unwrap();

        assert_eq!(lost.len() + found.len(), items.len());
        assert!(lost.iter().all(|h| h.item.item_type == ItemType::Lost));
        assert!(found.iter().all(|h| h.item.item_type == ItemType::Found));
    }

    #[test]
    fn test_category_filter_uses_resolved_category() {
        let items = fixture_items();
        let engine = engine();

        let filter = FilterState::new().with_category(CategoryKey::Electronics);
        assert_eq!(ids(&engine.browse(&items, &filter).unwrap()), vec!["1", "4"]);

        // "Bags" is not a known category
        let filter = FilterState::new().with_category(CategoryKey::Other);
        assert_eq!(ids(&engine.browse(&items, &filter).unwrap()), vec!["5"]);
    }

    #[test]
    fn test_phone_query() {
        let items = fixture_items();
        let hits = engine().browse(&items, &FilterState::new().with_query("phone")).unwrap();

        assert_eq!(ids(&hits), vec!["1"]);
        let relevance = hits[0].relevance.unwrap();
        assert!(relevance > 0.0 && relevance <= 1.0);
    }

    #[test]
    fn test_query_is_trimmed_and_typo_tolerant() {
        let items = fixture_items();
        let hits = engine().browse(&items, &FilterState::new().with_query("  bakpack ")).unwrap();
        assert_eq!(ids(&hits), vec!["5"]);

        let blank = engine().browse(&items, &FilterState::new().with_query("   ")).unwrap();
        assert_eq!(blank.len(), items.len());
    }

    #[test]
    fn test_query_combines_with_type() {
        let items = fixture_items();
        let filter = FilterState::new().with_query("phone").with_type(TypeFilter::Found);
        assert!(engine().browse(&items, &filter).unwrap().is_empty());
    }

    #[test]
    fn test_geo_radius() {
        let items = fixture_items();
        let engine = engine();

        let hits = engine.browse(&items, &FilterState::new().near(TIMES_SQUARE, 5.0)).unwrap();
        assert_eq!(ids(&hits), vec!["1", "2", "4", "5", "6"]);
        assert!(hits.iter().all(|h| h.distance_km.is_some_and(|d| d <= 5.0)));

        let hits = engine.browse(&items, &FilterState::new().near(TIMES_SQUARE, 1.0)).unwrap();
        assert_eq!(ids(&hits), vec!["2"]);
    }

    #[test]
    fn test_unusable_radius_matches_nothing() {
        let items = fixture_items();
        let engine = engine();
        for radius in [0.0, -3.0, f64::NAN] {
            let filter = FilterState::new().near(TIMES_SQUARE, radius);
            assert!(engine.browse(&items, &filter).unwrap().is_empty());
        }
    }

    #[test]
    fn test_items_without_coordinates_excluded_from_geo() {
        let mut items = fixture_items();
        items[1].location.latitude = None;

        let hits = engine().browse(&items, &FilterState::new().near(TIMES_SQUARE, 5.0)).unwrap();
        assert!(!ids(&hits).contains(&"2".to_string()));

        // Still visible without a radius
        assert_eq!(engine().browse(&items, &FilterState::new()).unwrap().len(), 6);
    }

    #[test]
    fn test_stale_index_is_rebuilt() {
        let items = fixture_items();
        let engine = engine();
        let stale = engine.build_index(&items[..5]).unwrap();
        assert!(!stale.is_current_for(&items));

        let hits = engine
            .browse_with_index(&items, &FilterState::new().with_query("ring"), Some(&stale))
            .unwrap();
        assert_eq!(hits.first().map(|h| h.item.id.as_str()), Some("6"));
    }

    #[test]
    fn test_index_not_reused_after_reorder() {
        let items = fixture_items();
        let engine = engine();
        let index = engine.build_index(&items).unwrap();

        let mut reversed = items.clone();
        reversed.reverse();
        assert!(!index.is_current_for(&reversed));

        let filter = FilterState::new().with_query("ring");
        let fresh = engine.browse(&reversed, &filter).unwrap();
        let reused = engine.browse_with_index(&reversed, &filter, Some(&index)).unwrap();
        assert_eq!(ids(&reused), ids(&fresh));
        assert_eq!(reused.first().map(|h| h.item.name.as_str()), Some("Diamond Ring"));
    }

    #[test]
    fn test_index_not_reused_after_edit() {
        let mut items = fixture_items();
        let engine = engine();
        let index = engine.build_index(&items).unwrap();
        assert!(index.is_current_for(&items));

        items[0].name = "Gold Ring".to_string();
        items[0].updated_at += chrono::Duration::minutes(5);
        assert!(!index.is_current_for(&items));

        let hits = engine
            .browse_with_index(&items, &FilterState::new().with_query("gold ring"), Some(&index))
            .unwrap();
        assert_eq!(hits.first().map(|h| h.item.id.as_str()), Some("1"));
    }

    #[test]
    fn test_reused_index_gives_same_results() {
        let items = fixture_items();
        let engine = engine();
        let index = engine.build_index(&items).unwrap();
        let filter = FilterState::new().with_query("wallet");

        let fresh = engine.browse(&items, &filter).unwrap();
        let reused = engine.browse_with_index(&items, &filter, Some(&index)).unwrap();
        assert_eq!(ids(&fresh), ids(&reused));
    }

    #[test]
    fn test_ties_keep_collection_order() {
        let mut items = fixture_items();
        let copy = items[1].clone();
        items.push(copy);

        let hits = engine().browse(&items, &FilterState::new().with_query("wallet")).unwrap();
        let wallets: Vec<usize> = hits.iter().filter(|h| h.item.id == "2").map(|h| h.index).collect();
        assert_eq!(wallets, vec![1, 6]);
    }

    #[test]
    fn test_from_config_rejects_bad_weights() {
        let mut config = SearchConfig::default();
        config.weights.city = -1.0;
        assert!(BrowseEngine::from_config(Arc::new(CategoryRegistry::new()), &config).is_err());

        let config = SearchConfig::default();
        assert!(BrowseEngine::from_config(Arc::new(CategoryRegistry::new()), &config).is_ok());
    }
}
