//! WASM bindings for the browse page.

use crate::{BrowseEngine, CategoryRegistry, FilterState, Item};
use serde::Serialize;
use std::sync::Arc;
use wasm_bindgen::prelude::*;

#[derive(Serialize)]
struct Hit<'a> {
    id: &'a str,
    relevance: Option<f64>,
    distance_km: Option<f64>,
}

/// Filter and rank items.
///
/// # Arguments
/// * `items_json` - JSON array of item rows
/// * `filter_json` - JSON filter `{query, type, categories, geo}`; missing fields mean "all"
///
/// # Returns
/// JSON array of `{id, relevance, distance_km}` in display order
#[wasm_bindgen(js_name = browseItems)]
pub fn browse_items(items_json: &str, filter_json: &str) -> Result<String, JsValue> {
    let items: Vec<Item> = serde_json::from_str(items_json)
        .map_err(|e| JsValue::from_str(&format!("JSON parse error: {}", e)))?;
    let filter: FilterState = serde_json::from_str(filter_json)
        .map_err(|e| JsValue::from_str(&format!("JSON parse error: {}", e)))?;

    let engine = BrowseEngine::new(Arc::new(CategoryRegistry::new()));
    let hits = engine
        .browse(&items, &filter)
        .map_err(|e| JsValue::from_str(&e.to_string()))?;

    let hits: Vec<Hit<'_>> = hits
        .iter()
        .map(|h| Hit {
            id: &h.item.id,
            relevance: h.relevance,
            distance_km: h.distance_km,
        })
        .collect();

    serde_json::to_string(&hits).map_err(|e| JsValue::from_str(&format!("JSON serialize error: {}", e)))
}

/// Category keys and display metadata as JSON, in display order.
#[wasm_bindgen(js_name = categories)]
pub fn categories() -> Result<String, JsValue> {
    let registry = CategoryRegistry::new();
    let entries: Vec<_> = registry.iter().collect();
    serde_json::to_string(&entries).map_err(|e| JsValue::from_str(&format!("JSON serialize error: {}", e)))
}

/// Relative age of an RFC 3339 timestamp, e.g. "3 days ago".
#[wasm_bindgen(js_name = timeAgo)]
pub fn time_ago(timestamp: &str) -> Result<String, JsValue> {
    let then = chrono::DateTime::parse_from_rfc3339(timestamp)
        .map_err(|e| JsValue::from_str(&format!("invalid timestamp: {}", e)))?;
    Ok(crate::time_ago(then.with_timezone(&chrono::Utc), chrono::Utc::now()))
}
