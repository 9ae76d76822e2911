//! Geocoding suggestions.
//!
//! Address lookups come back from a Nominatim-style service as loosely typed
//! JSON (coordinates as strings, optional nested address). They are converted
//! here into [`GeocodeSuggestion`]s with a validated [`Coordinate`] before any
//! other code sees them.
//!
//! Supported shape:
//! ```json
//! {"place_id": 123, "display_name": "Central Park, New York",
//!  "lat": "40.78", "lon": "-73.96",
//!  "address": {"city": "New York", "state": "NY", "country": "USA", "postcode": "10024"}}
//! ```

use crate::{Coordinate, GeoError, Result};
use serde::{Deserialize, Serialize};

/// A validated address suggestion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeocodeSuggestion {
    /// Provider place identifier
    pub id: String,
    /// Full display address
    pub address: String,
    /// Validated position
    pub coordinate: Coordinate,
    /// City, town or village; empty when unknown
    pub city: String,
    /// State or region; empty when unknown
    pub state: String,
    /// Country; empty when unknown
    pub country: String,
    /// Postal code; empty when unknown
    pub zip_code: String,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Scalar {
    Integer(i64),
    Number(f64),
    Text(String),
}

impl Scalar {
    fn as_f64(&self) -> Option<f64> {
        match self {
            #[allow(clippy::cast_precision_loss)]
            Scalar::Integer(n) => Some(*n as f64),
            Scalar::Number(n) => Some(*n),
            Scalar::Text(s) => s.trim().parse().ok(),
        }
    }

    fn into_string(self) -> String {
        match self {
            Scalar::Integer(n) => n.to_string(),
            Scalar::Number(n) => n.to_string(),
            Scalar::Text(s) => s,
        }
    }
}

#[derive(Debug, Deserialize)]
struct RawPlace {
    place_id: Option<Scalar>,
    #[serde(default)]
    display_name: String,
    lat: Option<Scalar>,
    lon: Option<Scalar>,
    address: Option<RawAddress>,
}

#[derive(Debug, Default, Deserialize)]
struct RawAddress {
    city: Option<String>,
    town: Option<String>,
    village: Option<String>,
    state: Option<String>,
    country: Option<String>,
    postcode: Option<String>,
}

impl TryFrom<RawPlace> for GeocodeSuggestion {
    type Error = GeoError;

    fn try_from(raw: RawPlace) -> Result<Self> {
        let lat = raw
            .lat
            .as_ref()
            .and_then(Scalar::as_f64)
            .ok_or_else(|| GeoError::InvalidSuggestion("missing or unparseable lat".into()))?;
        let lon = raw
            .lon
            .as_ref()
            .and_then(Scalar::as_f64)
            .ok_or_else(|| GeoError::InvalidSuggestion("missing or unparseable lon".into()))?;
        let coordinate = Coordinate::try_new(lat, lon)?;

        let address = raw.address.unwrap_or_default();
        Ok(Self {
            id: raw.place_id.map(Scalar::into_string).unwrap_or_default(),
            address: raw.display_name,
            coordinate,
            city: address
                .city
                .or(address.town)
                .or(address.village)
                .unwrap_or_default(),
            state: address.state.unwrap_or_default(),
            country: address.country.unwrap_or_default(),
            zip_code: address.postcode.unwrap_or_default(),
        })
    }
}

/// Parse a search response (JSON array) into suggestions.
///
/// Entries without usable coordinates are skipped; only malformed JSON is an
/// error.
pub fn parse_suggestions(json: &str) -> Result<Vec<GeocodeSuggestion>> {
    let raw: Vec<RawPlace> = serde_json::from_str(json)?;
    Ok(raw
        .into_iter()
        .filter_map(|place| GeocodeSuggestion::try_from(place).ok())
        .collect())
}

/// Parse a single reverse-geocoding response.
pub fn parse_place(json: &str) -> Result<GeocodeSuggestion> {
    let raw: RawPlace = serde_json::from_str(json)?;
    GeocodeSuggestion::try_from(raw)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::GeoErrorCode;

    #[test]
    fn test_parse_string_coordinates() {
        let json = r#"[{
            "place_id": 298216,
            "display_name": "Central Park, Manhattan, New York, USA",
            "lat": "40.7829",
            "lon": "-73.9654",
            "address": {"city": "New York", "state": "New York", "country": "USA", "postcode": "10024"}
        }]"#;

        let suggestions = parse_suggestions(json).unwrap();
        assert_eq!(suggestions.len(), 1);
        let s = &suggestions[0];
        assert_eq!(s.id, "298216");
        assert_eq!(s.city, "New York");
        assert_eq!(s.zip_code, "10024");
        assert!((s.coordinate.latitude - 40.7829).abs() < 1e-9);
        assert!((s.coordinate.longitude + 73.9654).abs() < 1e-9);
    }

    #[test]
    fn test_missing_address_defaults_to_empty() {
        let json = r#"[{"place_id": "a1", "display_name": "Somewhere", "lat": 1.5, "lon": 2.5}]"#;
        let s = &parse_suggestions(json).unwrap()[0];
        assert_eq!(s.id, "a1");
        assert!(s.city.is_empty());
        assert!(s.country.is_empty());
    }

    #[test]
    fn test_town_used_when_no_city() {
        let json = r#"[{"place_id": 1, "lat": "0", "lon": "0", "address": {"town": "Hoboken"}}]"#;
        assert_eq!(parse_suggestions(json).unwrap()[0].city, "Hoboken");
    }

    #[test]
    fn test_invalid_entries_skipped() {
        let json = r#"[
            {"place_id": 1, "display_name": "bad lat", "lat": "north", "lon": "0"},
            {"place_id": 2, "display_name": "out of range", "lat": "95", "lon": "0"},
            {"place_id": 3, "display_name": "no coords"},
            {"place_id": 4, "display_name": "ok", "lat": "10", "lon": "20"}
        ]"#;

        let suggestions = parse_suggestions(json).unwrap();
        assert_eq!(suggestions.len(), 1);
        assert_eq!(suggestions[0].id, "4");
    }

    #[test]
    fn test_malformed_json_is_error() {
        let err = parse_suggestions("{not json").unwrap_err();
        assert_eq!(err.code(), GeoErrorCode::JsonParsing);
    }

    #[test]
    fn test_parse_place_rejects_missing_coordinates() {
        let err = parse_place(r#"{"display_name": "nowhere"}"#).unwrap_err();
        assert_eq!(err.code(), GeoErrorCode::InvalidSuggestion);
    }
}
