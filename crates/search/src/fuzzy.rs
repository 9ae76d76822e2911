//! Approximate substring matching.
//!
//! Works on slices of comparable units so callers can match on chars or on
//! grapheme clusters.

/// An approximate occurrence of a pattern inside a text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ApproxMatch {
    /// Edits needed to turn the matched span into the pattern
    pub errors: usize,
    /// Index of the first matched unit in the text
    pub start: usize,
    /// Index one past the last matched unit in the text
    pub end: usize,
}

/// Find approximate occurrences of `pattern` anywhere in `text`.
///
/// Runs the Sellers variant of the edit-distance table (free start and end
/// in the text) and reports, for every end position, the cheapest span ending
/// there whose error count is at most `max_errors`. Spans are reported in
/// increasing `end` order.
pub fn approximate_matches<T: PartialEq>(
    text: &[T],
    pattern: &[T],
    max_errors: usize,
) -> Vec<ApproxMatch> {
    let m = pattern.len();
    let n = text.len();
    let mut found = Vec::new();

    if m == 0 || n == 0 {
        return found;
    }

    // Column j-1 and column j of the table, with the span start carried along.
    let mut prev_cost: Vec<usize> = (0..=m).collect();
    let mut prev_start: Vec<usize> = vec![0; m + 1];
    let mut cost = vec![0usize; m + 1];
    let mut start = vec![0usize; m + 1];

    for j in 1..=n {
        cost[0] = 0;
        start[0] = j;

        for i in 1..=m {
            let substitution = usize::from(pattern[i - 1] != text[j - 1]);

            let mut best = prev_cost[i - 1] + substitution;
            let mut from = prev_start[i - 1];

            if prev_cost[i] + 1 < best {
                best = prev_cost[i] + 1;
                from = prev_start[i];
            }
            if cost[i - 1] + 1 < best {
                best = cost[i - 1] + 1;
                from = start[i - 1];
            }

            cost[i] = best;
            start[i] = from;
        }

        if cost[m] <= max_errors {
            found.push(ApproxMatch {
                errors: cost[m],
                start: start[m],
                end: j,
            });
        }

        std::mem::swap(&mut prev_cost, &mut cost);
        std::mem::swap(&mut prev_start, &mut start);
    }

    found
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chars(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    #[test]
    fn test_exact_substring_found_at_position() {
        let matches = approximate_matches(&chars("black iphone 14"), &chars("phone"), 0);
        assert_eq!(matches, vec![ApproxMatch { errors: 0, start: 7, end: 12 }]);
    }

    #[test]
    fn test_one_typo_tolerated() {
        let matches = approximate_matches(&chars("blue backpack"), &chars("bakpack"), 1);
        assert!(matches.iter().any(|m| m.errors == 1 && m.start == 5));

        let strict = approximate_matches(&chars("blue backpack"), &chars("bakpack"), 0);
        assert!(strict.is_empty());
    }

    #[test]
    fn test_transposition_costs_two() {
        let best = approximate_matches(&chars("wallet"), &chars("wlalet"), 2)
            .into_iter()
            .map(|m| m.errors)
            .min();
        assert_eq!(best, Some(2));
    }

    #[test]
    fn test_misspelling_inside_longer_text() {
        let text = chars("golden retriever");
        let pattern = chars("retreiver");
        let best = approximate_matches(&text, &pattern, pattern.len())
            .into_iter()
            .map(|m| m.errors)
            .min()
            .unwrap();
        assert_eq!(best, 2);
    }

    #[test]
    fn test_empty_inputs() {
        assert!(approximate_matches(&chars(""), &chars("ring"), 4).is_empty());
        assert!(approximate_matches(&chars("ring"), &chars(""), 4).is_empty());
    }
}
