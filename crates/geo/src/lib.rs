//! Geospatial utilities for ReUnite.
//!
//! This crate provides:
//! - Haversine distance and inclusive radius checks
//! - Batch distance processing with optional parallelism
//! - Validated geocoding suggestions converted from raw service JSON
//! - WASM bindings for browser usage
//!
//! # Example
//!
//! ```
//! use reunite_geo::{distance_km, within_radius};
//!
//! // Central Park to Times Square
//! let d = distance_km(40.7829, -73.9654, 40.7580, -73.9855);
//! assert!(d > 3.0 && d < 3.5);
//! assert!(within_radius(40.7580, -73.9855, 40.7829, -73.9654, 5.0));
//! ```

mod haversine;
mod geocode;
pub mod batch;
mod error;

#[cfg(feature = "wasm")]
mod wasm;

pub use haversine::{
    distance_km, haversine_distance, haversine_distance_meters,
    within_radius, EARTH_RADIUS_KM, EARTH_RADIUS_M,
};
pub use geocode::{parse_place, parse_suggestions, GeocodeSuggestion};
pub use batch::{calculate_distances, DistanceResult};
pub use error::{GeoError, GeoErrorCode, Result};

/// A geographic coordinate with latitude and longitude.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Coordinate {
    /// Latitude in degrees (-90 to 90)
    pub latitude: f64,
    /// Longitude in degrees (-180 to 180)
    pub longitude: f64,
}

impl Coordinate {
    /// Creates a new coordinate.
    ///
    /// # Arguments
    /// * `latitude` - Latitude in degrees (-90 to 90)
    /// * `longitude` - Longitude in degrees (-180 to 180)
    #[inline]
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }

    /// Creates a coordinate, rejecting out-of-range or non-finite values.
    pub fn try_new(latitude: f64, longitude: f64) -> Result<Self> {
        let coord = Self::new(latitude, longitude);
        if coord.is_valid() {
            Ok(coord)
        } else {
            Err(GeoError::InvalidCoordinate(format!("({latitude}, {longitude})")))
        }
    }

    /// Returns true if the coordinate has valid values.
    #[inline]
    pub fn is_valid(&self) -> bool {
        (-90.0..=90.0).contains(&self.latitude) && (-180.0..=180.0).contains(&self.longitude)
    }

    /// Great-circle distance to another coordinate in kilometers.
    #[inline]
    pub fn distance_to(&self, other: &Coordinate) -> f64 {
        haversine_distance(self, other)
    }

    /// True if `other` lies within `radius_km` of this coordinate (inclusive).
    #[inline]
    pub fn is_within(&self, other: &Coordinate, radius_km: f64) -> bool {
        self.distance_to(other) <= radius_km
    }

    /// Converts degrees to radians for internal calculations.
    #[inline]
    pub(crate) fn to_radians(self) -> (f64, f64) {
        (self.latitude.to_radians(), self.longitude.to_radians())
    }
}

impl From<(f64, f64)> for Coordinate {
    fn from((lat, lng): (f64, f64)) -> Self {
        Self::new(lat, lng)
    }
}
