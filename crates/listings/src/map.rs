//! Map markers for listings.

use crate::category::{CategoryKey, CategoryRegistry};
use crate::model::{Item, ItemType};
use serde::{Deserialize, Serialize};

/// Marker color for found items.
pub const FOUND_COLOR: &str = "#10B981";
/// Marker color for lost items.
pub const LOST_COLOR: &str = "#EF4444";

/// One marker on the browse map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapPoint {
    /// Listing id
    pub id: String,
    /// Latitude
    pub lat: f64,
    /// Longitude
    pub lng: f64,
    /// Listing title
    pub title: String,
    /// `"{address or city}, {country}"`
    pub address: String,
    /// Marker color by item type
    pub color: String,
    /// Lost or found
    #[serde(rename = "type")]
    pub item_type: ItemType,
    /// Resolved category
    pub category: CategoryKey,
}

impl MapPoint {
    /// Marker for `item`, or `None` if it has no usable coordinates.
    pub fn from_item(item: &Item, registry: &CategoryRegistry) -> Option<Self> {
        let coord = item.coordinate()?;
        let place = if item.location.address.trim().is_empty() {
            &item.location.city
        } else {
            &item.location.address
        };

        Some(Self {
            id: item.id.clone(),
            lat: coord.latitude,
            lng: coord.longitude,
            title: item.name.clone(),
            address: format!("{}, {}", place, item.location.country),
            color: match item.item_type {
                ItemType::Found => FOUND_COLOR,
                ItemType::Lost => LOST_COLOR,
            }
            .to_string(),
            item_type: item.item_type,
            category: registry.resolve(&item.category),
        })
    }
}

/// Markers for every item that has coordinates, in input order.
pub fn map_points<'a, I>(items: I, registry: &CategoryRegistry) -> Vec<MapPoint>
where
    I: IntoIterator<Item = &'a Item>,
{
    items
        .into_iter()
        .filter_map(|item| MapPoint::from_item(item, registry))
        .collect()
}
