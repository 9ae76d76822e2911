//! WASM bindings for search utilities.

use crate::{FuzzyIndex, SearchKey, SearchOptions};
use serde::{Deserialize, Serialize};
use wasm_bindgen::prelude::*;

#[derive(Deserialize)]
struct Record {
    id: String,
    fields: Vec<String>,
}

#[derive(Serialize)]
struct Hit {
    id: String,
    score: f64,
    relevance: f64,
}

/// Search records and return ranked results as JSON.
///
/// # Arguments
/// * `query` - Search query
/// * `records_json` - JSON array of `{id, fields}`; `fields` lines up with the keys
/// * `keys_json` - JSON array of `{name, weight}`
/// * `max_results` - Maximum results to return (0 for all)
///
/// # Returns
/// JSON array of `{id, score, relevance}`, best first
#[wasm_bindgen(js_name = searchRecords)]
pub fn search_records(
    query: &str,
    records_json: &str,
    keys_json: &str,
    max_results: usize,
) -> Result<String, JsValue> {
    let records: Vec<Record> = serde_json::from_str(records_json)
        .map_err(|e| JsValue::from_str(&format!("JSON parse error: {}", e)))?;
    let keys: Vec<SearchKey> = serde_json::from_str(keys_json)
        .map_err(|e| JsValue::from_str(&format!("JSON parse error: {}", e)))?;

    let mut index = FuzzyIndex::new(keys, SearchOptions::default())
        .map_err(|e| JsValue::from_str(&e.to_string()))?;
    for record in &records {
        index
            .add(&record.fields)
            .map_err(|e| JsValue::from_str(&format!("{}: {}", record.id, e)))?;
    }

    let mut hits: Vec<Hit> = index
        .search(query)
        .into_iter()
        .map(|hit| Hit {
            id: records[hit.index].id.clone(),
            score: hit.score,
            relevance: hit.relevance(),
        })
        .collect();

    if max_results > 0 {
        hits.truncate(max_results);
    }

    serde_json::to_string(&hits).map_err(|e| JsValue::from_str(&format!("JSON serialize error: {}", e)))
}
