//! Listing records.
//!
//! Field names follow the backend's `items` row so that exports can be
//! deserialized directly.

use crate::error::{ListingError, Result};
use chrono::{DateTime, NaiveDate, Utc};
use reunite_contact::{ContactDisplay, Viewer};
use reunite_geo::Coordinate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Whether an item was lost or found.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemType {
    /// Someone lost it
    Lost,
    /// Someone found it
    Found,
}

impl ItemType {
    /// Stable string form.
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemType::Lost => "lost",
            ItemType::Found => "found",
        }
    }
}

impl fmt::Display for ItemType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ItemType {
    type Err = ListingError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "lost" => Ok(ItemType::Lost),
            "found" => Ok(ItemType::Found),
            _ => Err(ListingError::UnknownValue {
                kind: "item type",
                value: s.to_string(),
            }),
        }
    }
}

/// Lifecycle of a listing.
///
/// Allowed moves: `active -> resolved -> archived` and `active -> archived`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemStatus {
    /// Visible in browse
    #[default]
    Active,
    /// Returned to its owner; stored as `reunited` by older clients
    #[serde(alias = "reunited")]
    Resolved,
    /// Hidden from browse
    Archived,
}

impl ItemStatus {
    /// Stable string form.
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemStatus::Active => "active",
            ItemStatus::Resolved => "resolved",
            ItemStatus::Archived => "archived",
        }
    }

    /// True if the workflow allows moving from `self` to `next`.
    pub fn can_transition_to(self, next: ItemStatus) -> bool {
        matches!(
            (self, next),
            (ItemStatus::Active, ItemStatus::Resolved)
                | (ItemStatus::Active, ItemStatus::Archived)
                | (ItemStatus::Resolved, ItemStatus::Archived)
        )
    }
}

impl fmt::Display for ItemStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ItemStatus {
    type Err = ListingError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "active" => Ok(ItemStatus::Active),
            "resolved" | "reunited" => Ok(ItemStatus::Resolved),
            "archived" => Ok(ItemStatus::Archived),
            _ => Err(ListingError::UnknownValue {
                kind: "item status",
                value: s.to_string(),
            }),
        }
    }
}

/// Where an item was lost or found.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Location {
    /// Street address; may be empty
    #[serde(rename = "location_address", default, deserialize_with = "null_as_empty")]
    pub address: String,
    /// City
    #[serde(rename = "location_city", default, deserialize_with = "null_as_empty")]
    pub city: String,
    /// Country
    #[serde(rename = "location_country", default, deserialize_with = "null_as_empty")]
    pub country: String,
    /// Latitude in degrees
    #[serde(default)]
    pub latitude: Option<f64>,
    /// Longitude in degrees
    #[serde(default)]
    pub longitude: Option<f64>,
}

impl Location {
    /// The position, when both parts are present and in range.
    pub fn coordinate(&self) -> Option<Coordinate> {
        let coord = Coordinate::new(self.latitude?, self.longitude?);
        coord.is_valid().then_some(coord)
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// A lost or found listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    /// Listing identifier
    pub id: String,
    /// Poster's user id
    #[serde(default)]
    pub user_id: Option<String>,
    /// Lost or found
    #[serde(rename = "type")]
    pub item_type: ItemType,
    /// Title
    #[serde(rename = "item_name")]
    pub name: String,
    /// Free-text description
    #[serde(default, deserialize_with = "null_as_empty")]
    pub description: String,
    /// Category as stored; resolve through the registry before use
    #[serde(default, deserialize_with = "null_as_empty")]
    pub category: String,
    /// Where it happened
    #[serde(flatten)]
    pub location: Location,
    /// Day it was lost or found
    pub item_date: NaiveDate,
    /// Photo reference
    #[serde(default)]
    pub image_url: Option<String>,
    /// Contact person
    pub contact_name: String,
    /// Contact phone
    #[serde(default)]
    pub contact_phone: Option<String>,
    /// Contact email
    pub contact_email: String,
    /// Lifecycle state
    #[serde(default)]
    pub status: ItemStatus,
    /// When the listing was posted
    pub created_at: DateTime<Utc>,
    /// Last modification
    pub updated_at: DateTime<Utc>,
    /// When it was marked resolved
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resolved_at: Option<DateTime<Utc>>,
    /// When it was archived
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub archived_at: Option<DateTime<Utc>>,
}

impl Item {
    /// The item's position, if it has a valid one.
    pub fn coordinate(&self) -> Option<Coordinate> {
        self.location.coordinate()
    }

    /// True while the listing is visible in browse.
    pub fn is_active(&self) -> bool {
        self.status == ItemStatus::Active
    }

    /// True if `user_id` posted this listing.
    pub fn is_owned_by(&self, user_id: &str) -> bool {
        self.user_id.as_deref() == Some(user_id)
    }

    /// Contact details as `viewer` may see them.
    pub fn contact_for(&self, viewer: Viewer) -> ContactDisplay {
        ContactDisplay::for_viewer(self.contact_phone.as_deref(), &self.contact_email, viewer)
    }

    /// Move the listing to `next`, stamping the matching timestamp.
    pub fn transition(&mut self, next: ItemStatus, at: DateTime<Utc>) -> Result<()> {
        if !self.status.can_transition_to(next) {
            return Err(ListingError::InvalidTransition {
                from: self.status,
                to: next,
            });
        }

        match next {
            ItemStatus::Resolved => self.resolved_at = Some(at),
            ItemStatus::Archived => self.archived_at = Some(at),
            ItemStatus::Active => {}
        }
        self.status = next;
        self.updated_at = at;
        Ok(())
    }
}
