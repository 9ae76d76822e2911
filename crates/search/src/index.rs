//! Weighted multi-field fuzzy index.
//!
//! Records are stored as pre-tokenized, lower-cased grapheme clusters, one
//! slot per key. A query is scored against every field of every record; a
//! record is a hit when at least one field matches within the threshold.

use crate::error::{Result, SearchError};
use crate::scoring::{combine, field_score, SearchOptions};
use serde::{Deserialize, Serialize};
use unicode_segmentation::UnicodeSegmentation;

/// A searchable field and its relative weight.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchKey {
    /// Field name, used for reporting matches
    pub name: String,
    /// Relative weight; normalized across all keys by the index
    pub weight: f64,
}

impl SearchKey {
    /// Create a key.
    pub fn new(name: impl Into<String>, weight: f64) -> Self {
        Self {
            name: name.into(),
            weight,
        }
    }
}

/// A field that matched the query.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FieldMatch {
    /// Position of the key in the index key list
    pub key: usize,
    /// Field mismatch in `[0, threshold]`
    pub mismatch: f64,
}

/// A record that matched the query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchHit {
    /// Position of the record in insertion order
    pub index: usize,
    /// Combined score, lower is better
    pub score: f64,
    /// Fields that matched, in key order
    pub matches: Vec<FieldMatch>,
}

impl SearchHit {
    /// Relevance in `[0, 1]`, higher is better.
    #[inline]
    pub fn relevance(&self) -> f64 {
        1.0 - self.score
    }
}

type Units = Vec<String>;

/// Split text into lower-cased grapheme clusters.
pub fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .graphemes(true)
        .map(str::to_owned)
        .collect()
}

/// In-memory fuzzy index over records with a fixed set of keys.
///
/// # Example
/// ```
/// use reunite_search::{FuzzyIndex, SearchKey, SearchOptions};
///
/// let keys = vec![SearchKey::new("name", 0.7), SearchKey::new("city", 0.3)];
/// let mut index = FuzzyIndex::new(keys, SearchOptions::default()).unwrap();
/// index.add(&["iPhone 14 Pro", "New York"]).unwrap();
/// index.add(&["Gold Ring", "Boston"]).unwrap();
///
/// let hits = index.search("phone");
/// assert_eq!(hits.len(), 1);
/// assert_eq!(hits[0].index, 0);
/// ```
#[derive(Debug, Clone)]
pub struct FuzzyIndex {
    keys: Vec<SearchKey>,
    options: SearchOptions,
    records: Vec<Vec<Units>>,
}

impl FuzzyIndex {
    /// Create an empty index.
    ///
    /// Weights must be positive and finite; they are normalized to sum to 1.
    pub fn new(keys: Vec<SearchKey>, options: SearchOptions) -> Result<Self> {
        options.validate()?;

        if keys.is_empty() {
            return Err(SearchError::InvalidKeys("at least one key is required".into()));
        }
        if let Some(bad) = keys.iter().find(|k| !(k.weight.is_finite() && k.weight > 0.0)) {
            return Err(SearchError::InvalidKeys(format!(
                "key '{}' has non-positive weight {}",
                bad.name, bad.weight
            )));
        }

        let total: f64 = keys.iter().map(|k| k.weight).sum();
        let keys = keys
            .into_iter()
            .map(|k| SearchKey {
                weight: k.weight / total,
                ..k
            })
            .collect();

        Ok(Self {
            keys,
            options,
            records: Vec::new(),
        })
    }

    /// Keys with their normalized weights.
    pub fn keys(&self) -> &[SearchKey] {
        &self.keys
    }

    /// Options the index scores with.
    pub fn options(&self) -> &SearchOptions {
        &self.options
    }

    /// Number of indexed records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// True if no records are indexed.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Append a record; `fields` must line up with the keys.
    pub fn add<S: AsRef<str>>(&mut self, fields: &[S]) -> Result<()> {
        if fields.len() != self.keys.len() {
            return Err(SearchError::IndexError(format!(
                "expected {} fields, got {}",
                self.keys.len(),
                fields.len()
            )));
        }
        self.records
            .push(fields.iter().map(|f| tokenize(f.as_ref())).collect());
        Ok(())
    }

    /// Search all records, best first.
    ///
    /// The query is trimmed; an empty query matches nothing. Equal scores keep
    /// insertion order.
    pub fn search(&self, query: &str) -> Vec<SearchHit> {
        let pattern = tokenize(query.trim());
        if pattern.is_empty() {
            return Vec::new();
        }

        #[cfg(feature = "parallel")]
        let mut hits: Vec<SearchHit> = {
            use rayon::prelude::*;
            self.records
                .par_iter()
                .enumerate()
                .filter_map(|(index, record)| self.score_record(index, record, &pattern))
                .collect()
        };

        #[cfg(not(feature = "parallel"))]
        let mut hits: Vec<SearchHit> = self
            .records
            .iter()
            .enumerate()
            .filter_map(|(index, record)| self.score_record(index, record, &pattern))
            .collect();

        hits.sort_by(|a, b| a.score.total_cmp(&b.score).then(a.index.cmp(&b.index)));
        hits
    }

    fn score_record(&self, index: usize, record: &[Units], pattern: &[String]) -> Option<SearchHit> {
        let matches: Vec<FieldMatch> = record
            .iter()
            .enumerate()
            .filter_map(|(key, units)| {
                field_score(units, pattern, &self.options).map(|mismatch| FieldMatch { key, mismatch })
            })
            .collect();

        let score = combine(
            matches
                .iter()
                .map(|m| (m.mismatch, self.keys[m.key].weight)),
        )?;

        Some(SearchHit {
            index,
            score,
            matches,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SearchErrorCode;

    fn item_keys() -> Vec<SearchKey> {
        vec![
            SearchKey::new("name", 0.4),
            SearchKey::new("description", 0.3),
            SearchKey::new("category", 0.2),
            SearchKey::new("city", 0.1),
        ]
    }

    fn index_of(records: &[[&str; 4]]) -> FuzzyIndex {
        let mut index = FuzzyIndex::new(item_keys(), SearchOptions::default()).unwrap();
        for record in records {
            index.add(record).unwrap();
        }
        index
    }

    #[test]
    fn test_phone_query_ranks_phones_and_skips_wallet() {
        let index = index_of(&[
            ["iPhone 14 Pro", "Black iPhone with a cracked case", "Electronics", "New York"],
            ["Brown Leather Wallet", "Contains cards and cash", "Wallet", "New York"],
            ["Phone charger", "White USB-C cable", "Electronics", "Boston"],
        ]);

        let hits = index.search("phone");
        let order: Vec<usize> = hits.iter().map(|h| h.index).collect();

        assert_eq!(order, vec![2, 0]);
        assert!(hits.iter().all(|h| h.relevance() > 0.0 && h.relevance() <= 1.0));
    }

    #[test]
    fn test_weights_are_normalized() {
        let keys = vec![SearchKey::new("a", 2.0), SearchKey::new("b", 6.0)];
        let index = FuzzyIndex::new(keys, SearchOptions::default()).unwrap();
        assert!((index.keys()[0].weight - 0.25).abs() < 1e-12);
        assert!((index.keys()[1].weight - 0.75).abs() < 1e-12);
    }

    #[test]
    fn test_rejects_bad_keys() {
        let err = FuzzyIndex::new(Vec::new(), SearchOptions::default()).unwrap_err();
        assert_eq!(err.code(), SearchErrorCode::InvalidKeys);

        let err = FuzzyIndex::new(vec![SearchKey::new("name", 0.0)], SearchOptions::default()).unwrap_err();
        assert_eq!(err.code(), SearchErrorCode::InvalidKeys);

        let options = SearchOptions { threshold: 2.0, ..SearchOptions::default() };
        let err = FuzzyIndex::new(item_keys(), options).unwrap_err();
        assert_eq!(err.code(), SearchErrorCode::InvalidOptions);
    }

    #[test]
    fn test_field_count_must_match_keys() {
        let mut index = FuzzyIndex::new(item_keys(), SearchOptions::default()).unwrap();
        let err = index.add(&["only a name"]).unwrap_err();
        assert_eq!(err.code(), SearchErrorCode::Index);
        assert!(index.is_empty());
    }

    #[test]
    fn test_ties_keep_insertion_order() {
        let record = ["Car keys", "Toyota fob", "Keys", "Denver"];
        let index = index_of(&[record, record, record]);

        let order: Vec<usize> = index.search("keys").iter().map(|h| h.index).collect();
        assert_eq!(order, vec![0, 1, 2]);
    }

    #[test]
    fn test_query_is_case_insensitive_and_trimmed() {
        let index = index_of(&[["Café Umbrella", "Left at the café", "Other Items", "Paris"]]);

        assert_eq!(index.search("  CAFÉ ").len(), 1);
        assert!(index.search("   ").is_empty());
    }

    #[test]
    fn test_typo_still_matches() {
        let index = index_of(&[["Blue Backpack", "Navy school bag", "Luggage", "New York"]]);
        let hits = index.search("bakpack");

        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].matches[0].key, 0);
    }

    #[test]
    fn test_more_fields_matched_scores_better() {
        let index = index_of(&[
            ["Wallet", "Found near the station", "Accessories", "Chicago"],
            ["Wallet", "Brown wallet with cards", "Wallet", "Chicago"],
        ]);

        let hits = index.search("wallet");
        assert_eq!(hits[0].index, 1);
        assert!(hits[0].score < hits[1].score);
    }
}
