//! WASM bindings for the geo crate.

use crate::{batch, calculate_distances, distance_km, parse_suggestions, within_radius, Coordinate};
use serde::Deserialize;
use wasm_bindgen::prelude::*;

/// Distance in kilometers between two latitude/longitude pairs.
#[wasm_bindgen]
pub fn distance(lat1: f64, lng1: f64, lat2: f64, lng2: f64) -> f64 {
    distance_km(lat1, lng1, lat2, lng2)
}

/// True if the point lies within `radius_km` of the center (inclusive).
#[wasm_bindgen(js_name = isWithinRadius)]
pub fn is_within_radius(center_lat: f64, center_lng: f64, lat: f64, lng: f64, radius_km: f64) -> bool {
    within_radius(center_lat, center_lng, lat, lng, radius_km)
}

#[derive(Deserialize)]
struct Point {
    latitude: Option<f64>,
    longitude: Option<f64>,
}

fn parse_points(points_json: &str) -> Result<Vec<Option<Coordinate>>, JsValue> {
    let points: Vec<Point> = serde_json::from_str(points_json)
        .map_err(|e| JsValue::from_str(&format!("JSON parse error: {}", e)))?;
    Ok(points
        .into_iter()
        .map(|p| match (p.latitude, p.longitude) {
            (Some(lat), Some(lng)) => Some(Coordinate::new(lat, lng)),
            _ => None,
        })
        .collect())
}

/// Distances from a center to a JSON array of `{latitude, longitude}` points.
///
/// Returns a JSON array of `{index, distance}`; `distance` is null for points
/// without coordinates.
#[wasm_bindgen(js_name = calculateDistances)]
pub fn calculate_distances_json(center_lat: f64, center_lng: f64, points_json: &str) -> Result<String, JsValue> {
    let points = parse_points(points_json)?;
    let results = calculate_distances(&Coordinate::new(center_lat, center_lng), &points);
    serde_json::to_string(&results)
        .map_err(|e| JsValue::from_str(&format!("JSON serialize error: {}", e)))
}

/// Points within a radius, nearest first, as a JSON array of `{index, distance}`.
#[wasm_bindgen(js_name = pointsWithinRadius)]
pub fn points_within_radius(
    center_lat: f64,
    center_lng: f64,
    points_json: &str,
    radius_km: f64,
) -> Result<String, JsValue> {
    let points = parse_points(points_json)?;
    let results = batch::calculate_distances_within_radius(
        &Coordinate::new(center_lat, center_lng),
        &points,
        radius_km,
    );
    serde_json::to_string(&results)
        .map_err(|e| JsValue::from_str(&format!("JSON serialize error: {}", e)))
}

/// Convert a raw geocoding response into validated suggestions (JSON).
#[wasm_bindgen(js_name = parseGeocodeSuggestions)]
pub fn parse_geocode_suggestions(response_json: &str) -> Result<String, JsValue> {
    let suggestions = parse_suggestions(response_json).map_err(|e| JsValue::from_str(&e.to_string()))?;
    serde_json::to_string(&suggestions)
        .map_err(|e| JsValue::from_str(&format!("JSON serialize error: {}", e)))
}
