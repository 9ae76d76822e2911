//! Match scoring.
//!
//! A field score is a mismatch in `[0, 1]`: `0.0` is a perfect match at the
//! expected location, anything above the threshold is not a match. It is the
//! error rate of the best approximate occurrence plus a proximity penalty for
//! how far from the expected location that occurrence starts.

use crate::error::{Result, SearchError};
use crate::fuzzy::approximate_matches;
use serde::{Deserialize, Serialize};

/// Tuning knobs shared by every field of an index.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SearchOptions {
    /// Maximum mismatch for a field to count as matched
    pub threshold: f64,
    /// Where in a field a match is expected to start
    pub location: usize,
    /// Distance from `location` at which the proximity penalty reaches 1.0
    pub distance: usize,
    /// Skip the proximity penalty entirely
    pub ignore_location: bool,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            threshold: 0.3,
            location: 0,
            distance: 100,
            ignore_location: false,
        }
    }
}

impl SearchOptions {
    /// Check the options are usable.
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.threshold) {
            return Err(SearchError::InvalidOptions(format!(
                "threshold {} is outside 0.0..=1.0",
                self.threshold
            )));
        }
        Ok(())
    }

    /// Mismatch for a span with `errors` edits starting at `start`.
    #[allow(clippy::cast_precision_loss)]
    pub fn mismatch(&self, errors: usize, pattern_len: usize, start: usize) -> f64 {
        let accuracy = errors as f64 / pattern_len as f64;
        if self.ignore_location {
            return accuracy;
        }

        let proximity = start.abs_diff(self.location);
        if self.distance == 0 {
            return if proximity == 0 { accuracy } else { 1.0 };
        }

        accuracy + proximity as f64 / self.distance as f64
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
    fn max_errors(&self, pattern_len: usize) -> usize {
        (self.threshold * pattern_len as f64).floor() as usize
    }
}

/// Score `pattern` against `text`.
///
/// Returns the lowest mismatch over all approximate occurrences, or `None`
/// if nothing is within the threshold.
pub fn field_score<T: PartialEq>(text: &[T], pattern: &[T], options: &SearchOptions) -> Option<f64> {
    if pattern.is_empty() || text.is_empty() {
        return None;
    }
    if text == pattern {
        return Some(0.0);
    }

    approximate_matches(text, pattern, options.max_errors(pattern.len()))
        .into_iter()
        .map(|m| options.mismatch(m.errors, pattern.len(), m.start))
        .filter(|score| *score <= options.threshold)
        .min_by(f64::total_cmp)
}

/// Combine per-field mismatches into one item score (lower is better).
///
/// Each matched field contributes `mismatch ^ weight`; a perfect field match
/// counts as `f64::EPSILON` so it still dominates the product.
pub fn combine<I>(field_scores: I) -> Option<f64>
where
    I: IntoIterator<Item = (f64, f64)>,
{
    let mut total: Option<f64> = None;
    for (mismatch, weight) in field_scores {
        let base = if mismatch == 0.0 { f64::EPSILON } else { mismatch };
        *total.get_or_insert(1.0) *= base.powf(weight);
    }
    total
}
