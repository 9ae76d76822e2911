//! Batch distance calculations with optional parallelism.
//!
//! Points are addressed by their index in the input slice so callers can map
//! results back onto their own records. Points without a location produce a
//! result with no distance and never match a radius.

use crate::{haversine_distance, Coordinate};
use serde::{Deserialize, Serialize};

/// Result of a distance calculation for a single point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DistanceResult {
    /// Position of the point in the input slice
    pub index: usize,
    /// Distance in kilometers, `None` when the point has no location
    pub distance: Option<f64>,
}

impl DistanceResult {
    /// True if the point has a location within `radius_km` (inclusive).
    #[inline]
    pub fn is_within(&self, radius_km: f64) -> bool {
        self.distance.is_some_and(|d| d <= radius_km)
    }
}

/// Calculate distances from a center to many optional points.
///
/// # Example
/// ```
/// use reunite_geo::{calculate_distances, Coordinate};
///
/// let center = Coordinate::new(40.7580, -73.9855);
/// let points = [Some(Coordinate::new(40.7829, -73.9654)), None];
///
/// let results = calculate_distances(&center, &points);
/// assert_eq!(results.len(), 2);
/// assert!(results[1].distance.is_none());
/// ```
pub fn calculate_distances(center: &Coordinate, points: &[Option<Coordinate>]) -> Vec<DistanceResult> {
    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;
        points
            .par_iter()
            .enumerate()
            .map(|(index, point)| single_distance(center, index, point.as_ref()))
            .collect()
    }

    #[cfg(not(feature = "parallel"))]
    {
        points
            .iter()
            .enumerate()
            .map(|(index, point)| single_distance(center, index, point.as_ref()))
            .collect()
    }
}

/// Calculate distances and return them nearest first.
///
/// Points without a location sort last, in input order.
pub fn calculate_distances_sorted(
    center: &Coordinate,
    points: &[Option<Coordinate>],
    max_results: Option<usize>,
) -> Vec<DistanceResult> {
    let mut results = calculate_distances(center, points);

    results.sort_by(|a, b| match (a.distance, b.distance) {
        (Some(x), Some(y)) => x.total_cmp(&y),
        (Some(_), None) => std::cmp::Ordering::Less,
        (None, Some(_)) => std::cmp::Ordering::Greater,
        (None, None) => std::cmp::Ordering::Equal,
    });

    if let Some(max) = max_results {
        results.truncate(max);
    }

    results
}

/// Calculate distances for points inside a radius, nearest first.
///
/// A non-positive radius matches nothing.
pub fn calculate_distances_within_radius(
    center: &Coordinate,
    points: &[Option<Coordinate>],
    radius_km: f64,
) -> Vec<DistanceResult> {
    if !(radius_km > 0.0) {
        return Vec::new();
    }

    let mut results = calculate_distances_sorted(center, points, None);
    results.retain(|r| r.is_within(radius_km));
    results
}

#[inline]
fn single_distance(center: &Coordinate, index: usize, point: Option<&Coordinate>) -> DistanceResult {
    DistanceResult {
        index,
        distance: point.map(|p| haversine_distance(center, p)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TIMES_SQUARE: Coordinate = Coordinate { latitude: 40.7580, longitude: -73.9855 };

    fn test_points() -> Vec<Option<Coordinate>> {
        vec![
            // Central Park (~3.2 km)
            Some(Coordinate::new(40.7829, -73.9654)),
            // Brooklyn Bridge Park (~6.3 km)
            Some(Coordinate::new(40.7024, -73.9969)),
            // No location
            None,
            // Penn Station (~1.1 km)
            Some(Coordinate::new(40.7505, -73.9934)),
        ]
    }

    #[test]
    fn test_batch_distances() {
        let results = calculate_distances(&TIMES_SQUARE, &test_points());

        assert_eq!(results.len(), 4);
        assert!(results.iter().enumerate().all(|(i, r)| r.index == i));

        let park = results[0].distance.unwrap();
        assert!(park > 3.0 && park < 3.5);
        assert!(results[2].distance.is_none());
    }

    #[test]
    fn test_sorted_distances() {
        let results = calculate_distances_sorted(&TIMES_SQUARE, &test_points(), None);

        let order: Vec<usize> = results.iter().map(|r| r.index).collect();
        assert_eq!(order, vec![3, 0, 1, 2]);
    }

    #[test]
    fn test_radius_filter() {
        let results = calculate_distances_within_radius(&TIMES_SQUARE, &test_points(), 5.0);

        let order: Vec<usize> = results.iter().map(|r| r.index).collect();
        assert_eq!(order, vec![3, 0]);
    }

    #[test]
    fn test_non_positive_radius_matches_nothing() {
        let mut points = test_points();
        points.push(Some(TIMES_SQUARE));

        assert!(calculate_distances_within_radius(&TIMES_SQUARE, &points, 0.0).is_empty());
        assert!(calculate_distances_within_radius(&TIMES_SQUARE, &points, -1.0).is_empty());
        assert!(calculate_distances_within_radius(&TIMES_SQUARE, &points, f64::NAN).is_empty());
    }

    #[test]
    fn test_max_results() {
        let results = calculate_distances_sorted(&TIMES_SQUARE, &test_points(), Some(2));
        assert_eq!(results.len(), 2);
    }

    #[test]
    fn test_missing_location_never_within() {
        let missing = DistanceResult { index: 0, distance: None };
        assert!(!missing.is_within(f64::INFINITY));
    }
}
