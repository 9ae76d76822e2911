//! The "post item" form before it becomes a listing.

use crate::category::CategoryKey;
use crate::error::{ListingError, Result};
use crate::model::{Item, ItemStatus, ItemType, Location};
use chrono::{DateTime, NaiveDate, Utc};
use reunite_contact::{is_valid_email, is_valid_phone};
use reunite_core::validation::{ValidationResult, Validator};
use serde::{Deserialize, Serialize};

/// Largest accepted photo upload.
pub const MAX_IMAGE_BYTES: u64 = 5 * 1024 * 1024;

const MAX_NAME_CHARS: usize = 120;
const MAX_DESCRIPTION_CHARS: usize = 2000;
const DATE_FORMAT: &str = "%Y-%m-%d";

/// An attached photo, already uploaded by the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageAttachment {
    /// Where the upload landed
    pub url: String,
    /// Size of the original file
    pub size_bytes: u64,
}

/// Form fields for a new listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemDraft {
    /// Lost or found
    #[serde(rename = "type")]
    pub item_type: ItemType,
    /// Title
    pub name: String,
    /// Free-text description
    pub description: String,
    /// Chosen category
    pub category: CategoryKey,
    /// Street address; optional
    #[serde(default)]
    pub address: String,
    /// City
    pub city: String,
    /// Country
    pub country: String,
    /// Picked latitude, if any
    #[serde(default)]
    pub latitude: Option<f64>,
    /// Picked longitude, if any
    #[serde(default)]
    pub longitude: Option<f64>,
    /// `YYYY-MM-DD`
    pub item_date: String,
    /// Uploaded photo
    #[serde(default)]
    pub image: Option<ImageAttachment>,
    /// Contact person
    pub contact_name: String,
    /// Contact phone; optional
    #[serde(default)]
    pub contact_phone: String,
    /// Contact email
    pub contact_email: String,
}

impl ItemDraft {
    /// Validate with the default image limit.
    pub fn validate(&self) -> ValidationResult {
        self.validate_with(MAX_IMAGE_BYTES)
    }

    /// Validate every field, collecting all problems.
    pub fn validate_with(&self, max_image_bytes: u64) -> ValidationResult {
        Validator::new()
            .required("item_name", &self.name)
            .max_length("item_name", &self.name, MAX_NAME_CHARS)
            .required("description", &self.description)
            .max_length("description", &self.description, MAX_DESCRIPTION_CHARS)
            .required("location_city", &self.city)
            .required("location_country", &self.country)
            .required("item_date", &self.item_date)
            .custom("item_date", || {
                let date = self.item_date.trim();
                (!date.is_empty() && NaiveDate::parse_from_str(date, DATE_FORMAT).is_err())
                    .then(|| "Must be a date like 2024-11-08".to_string())
            })
            .custom("coordinates", || match (self.latitude, self.longitude) {
                (None, None) => None,
                (Some(lat), Some(lng)) if reunite_geo::Coordinate::new(lat, lng).is_valid() => None,
                (Some(_), Some(_)) => Some("Latitude or longitude out of range".to_string()),
                _ => Some("Latitude and longitude must be given together".to_string()),
            })
            .required("contact_name", &self.contact_name)
            .required("contact_email", &self.contact_email)
            .custom("contact_email", || {
                let email = self.contact_email.trim();
                (!email.is_empty() && !is_valid_email(email))
                    .then(|| "Must be a valid email address".to_string())
            })
            .custom("contact_phone", || {
                let phone = self.contact_phone.trim();
                (!phone.is_empty() && !is_valid_phone(phone))
                    .then(|| "Must have 10 to 15 digits".to_string())
            })
            .custom("image", || {
                self.image
                    .as_ref()
                    .filter(|img| img.size_bytes > max_image_bytes)
                    .map(|img| {
                        format!(
                            "Image is {} bytes, the limit is {} bytes",
                            img.size_bytes, max_image_bytes
                        )
                    })
            })
            .warn_if(
                "image",
                self.image.is_none(),
                "Listings with a photo are found more often",
            )
            .validate()
    }

    /// Turn a valid draft into an active listing owned by `owner`, using the
    /// default image limit.
    pub fn into_item(self, id: impl Into<String>, owner: impl Into<String>, now: DateTime<Utc>) -> Result<Item> {
        self.into_item_with(id, owner, now, MAX_IMAGE_BYTES)
    }

    /// Turn a valid draft into an active listing owned by `owner`.
    ///
    /// `max_image_bytes` is usually `[listings] max_image_bytes` from the
    /// configuration.
    pub fn into_item_with(
        self,
        id: impl Into<String>,
        owner: impl Into<String>,
        now: DateTime<Utc>,
        max_image_bytes: u64,
    ) -> Result<Item> {
        let result = self.validate_with(max_image_bytes);
        if !result.is_valid() {
            let messages: Vec<String> = result.errors().iter().map(ToString::to_string).collect();
            return Err(ListingError::InvalidDraft(messages.join("; ")));
        }

        let item_date = NaiveDate::parse_from_str(self.item_date.trim(), DATE_FORMAT)
            .map_err(|e| ListingError::InvalidDraft(format!("item_date: {e}")))?;
        let phone = self.contact_phone.trim();

        Ok(Item {
            id: id.into(),
            user_id: Some(owner.into()),
            item_type: self.item_type,
            name: self.name.trim().to_string(),
            description: self.description.trim().to_string(),
            category: self.category.as_str().to_string(),
            location: Location {
                address: self.address.trim().to_string(),
                city: self.city.trim().to_string(),
                country: self.country.trim().to_string(),
                latitude: self.latitude,
                longitude: self.longitude,
            },
            item_date,
            image_url: self.image.map(|img| img.url),
            contact_name: self.contact_name.trim().to_string(),
            contact_phone: (!phone.is_empty()).then(|| phone.to_string()),
            contact_email: self.contact_email.trim().to_string(),
            status: ItemStatus::Active,
            created_at: now,
            updated_at: now,
            resolved_at: None,
            archived_at: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn draft() -> ItemDraft {
        ItemDraft {
            item_type: ItemType::Found,
            name: "Diamond Ring".into(),
            description: "Found in Washington Square Park".into(),
            category: CategoryKey::Jewelry,
            address: String::new(),
            city: "New York".into(),
            country: "USA".into(),
            latitude: Some(40.7308),
            longitude: Some(-73.9973),
            item_date: "2024-11-03".into(),
            image: Some(ImageAttachment {
                url: "https://cdn.example.com/ring.jpg".into(),
                size_bytes: 900_000,
            }),
            contact_name: "Lisa Thompson".into(),
            contact_phone: String::new(),
            contact_email: "lisa.thompson@email.com".into(),
        }
    }

    #[test]
    fn test_valid_draft() {
        let result = draft().validate();
        assert!(result.is_valid(), "{:?}", result.errors());
        assert!(result.warnings().is_empty());
    }

    #[test]
    fn test_required_fields() {
        let mut d = draft();
        d.name = "  ".into();
        d.city.clear();
        d.contact_email.clear();

        let result = d.validate();
        assert!(result.has_error_for("item_name"));
        assert!(result.has_error_for("location_city"));
        assert!(result.has_error_for("contact_email"));
        assert!(!result.has_error_for("contact_phone"));
    }

    #[test]
    fn test_contact_checks() {
        let mut d = draft();
        d.contact_email = "lisa@localhost".into();
        d.contact_phone = "555-0123".into();

        let result = d.validate();
        assert!(result.has_error_for("contact_email"));
        assert!(result.has_error_for("contact_phone"));
    }

    #[test]
    fn test_image_limit() {
        let mut d = draft();
        if let Some(img) = d.image.as_mut() {
            img.size_bytes = MAX_IMAGE_BYTES + 1;
        }
        assert!(d.validate().has_error_for("image"));
        assert!(d.validate_with(10 * 1024 * 1024).is_valid());

        d.image = None;
        let result = d.validate();
        assert!(result.is_valid());
        assert_eq!(result.warnings().len(), 1);
    }

    #[test]
    fn test_date_and_coordinates() {
        let mut d = draft();
        d.item_date = "03/11/2024".into();
        d.longitude = None;

        let result = d.validate();
        assert!(result.has_error_for("item_date"));
        assert!(result.has_error_for("coordinates"));
    }

    #[test]
    fn test_into_item() {
        let now = Utc.with_ymd_and_hms(2024, 11, 3, 13, 30, 0).unwrap();
        let item = draft().into_item("6", "user6", now).unwrap();

        assert_eq!(item.status, ItemStatus::Active);
        assert_eq!(item.category, "jewelry");
        assert_eq!(item.contact_phone, None);
        assert_eq!(item.created_at, now);
        assert!(item.is_owned_by("user6"));
        assert_eq!(item.image_url.as_deref(), Some("https://cdn.example.com/ring.jpg"));
        assert_eq!(item.item_date, NaiveDate::from_ymd_opt(2024, 11, 3).unwrap());
    }

    #[test]
    fn test_into_item_honours_configured_image_limit() {
        let limits = reunite_core::config::ListingsConfig {
            max_image_bytes: 8 * 1024 * 1024,
            ..Default::default()
        };
        let mut d = draft();
        if let Some(img) = d.image.as_mut() {
            img.size_bytes = 6 * 1024 * 1024;
        }
        let now = Utc.with_ymd_and_hms(2024, 11, 3, 13, 30, 0).unwrap();

        assert!(d.validate_with(limits.max_image_bytes).is_valid());
        assert!(d.clone().into_item("6", "user6", now).is_err());
        let item = d.into_item_with("6", "user6", now, limits.max_image_bytes).unwrap();
        assert_eq!(item.image_url.as_deref(), Some("https://cdn.example.com/ring.jpg"));
    }

    #[test]
    fn test_into_item_rejects_invalid() {
        let mut d = draft();
        d.contact_email = "nope".into();
        let err = d.into_item("7", "user7", Utc::now()).unwrap_err();
        assert!(matches!(err, ListingError::InvalidDraft(_)));
    }
}
