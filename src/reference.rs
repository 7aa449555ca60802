//! Reference cities and the latitude-analog match
//!
//! The detail overlay hints that an occurrence site is "climatically
//! similar to city X" by picking the reference city with the closest
//! latitude. Latitude only, no longitude, no great-circle distance: the
//! hint is a coarse climatic analog, not a geospatial match.

use serde::{Deserialize, Serialize};

/// A reference point hinted at in the detail overlay
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReferencePoint {
    pub name: String,
    pub lat: f64,
}

/// The chosen reference for a target latitude
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReferenceMatch {
    pub name: String,
    pub lat: f64,
    /// Absolute latitude difference to the target, degrees
    pub delta_deg: f64,
    /// Whether the difference is small enough to display as "similar"
    pub similar: bool,
}

/// Latitude difference below which the overlay calls the match "similar"
pub const SIMILARITY_THRESHOLD_DEG: f64 = 2.0;

/// The fixed reference city table, ordered north to south
pub fn reference_cities() -> Vec<ReferencePoint> {
    [
        ("Harbin", 45.8),
        ("Changchun", 43.8),
        ("Shenyang", 41.8),
        ("Beijing", 39.9),
        ("Jinan", 36.6),
        ("Zhengzhou", 34.7),
        ("Nanjing", 32.0),
        ("Shanghai", 31.2),
        ("Wuhan", 30.5),
        ("Hangzhou", 30.2),
        ("Changsha", 28.2),
        ("Fuzhou", 26.0),
        ("Taipei", 25.0),
        ("Guangzhou", 23.1),
        ("Nanning", 22.8),
        ("Hong Kong", 22.3),
        ("Haikou", 20.0),
    ]
    .into_iter()
    .map(|(name, lat)| ReferencePoint {
        name: name.to_string(),
        lat,
    })
    .collect()
}

/// Pick the reference point closest in latitude to the target
///
/// Strict left fold: the first element is the initial best, and a later
/// candidate wins only with a strictly smaller absolute difference, so
/// equidistant candidates resolve to the earlier entry. `None` only for
/// an empty list.
pub fn nearest_reference(points: &[ReferencePoint], target_lat: f64) -> Option<&ReferencePoint> {
    points.iter().reduce(|best, candidate| {
        if (candidate.lat - target_lat).abs() < (best.lat - target_lat).abs() {
            candidate
        } else {
            best
        }
    })
}

/// Match a target latitude against the fixed city table
pub fn match_reference(points: &[ReferencePoint], target_lat: f64) -> Option<ReferenceMatch> {
    nearest_reference(points, target_lat).map(|point| {
        let delta_deg = (point.lat - target_lat).abs();
        ReferenceMatch {
            name: point.name.clone(),
            lat: point.lat,
            delta_deg,
            similar: delta_deg < SIMILARITY_THRESHOLD_DEG,
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn point(name: &str, lat: f64) -> ReferencePoint {
        ReferencePoint {
            name: name.to_string(),
            lat,
        }
    }

    #[test]
    fn test_nearest_picks_smallest_latitude_difference() {
        // |32.0 - 31.5| = 0.5 beats |30.2 - 31.5| = 1.3 even though 30.2
        // is listed first
        let points = vec![point("Hangzhou", 30.2), point("Nanjing", 32.0)];
        let nearest = nearest_reference(&points, 31.5).unwrap();
        assert_eq!(nearest.name, "Nanjing");
    }

    #[test]
    fn test_equidistant_candidates_resolve_to_first_listed() {
        let points = vec![point("North", 32.5), point("South", 30.5)];
        let nearest = nearest_reference(&points, 31.5).unwrap();
        assert_eq!(nearest.name, "North");
    }

    #[test]
    fn test_empty_list_has_no_match() {
        assert!(nearest_reference(&[], 31.5).is_none());
        assert!(match_reference(&[], 31.5).is_none());
    }

    #[test]
    fn test_match_carries_similarity_flag() {
        let cities = reference_cities();

        // Shanghai at 31.2 is 0.3 degrees from 31.5
        let close = match_reference(&cities, 31.5).unwrap();
        assert_eq!(close.name, "Shanghai");
        assert_relative_eq!(close.delta_deg, 0.3, epsilon = 1e-9);
        assert!(close.similar);

        // Nothing in the table is within 2 degrees of the equator
        let far = match_reference(&cities, 0.0).unwrap();
        assert_eq!(far.name, "Haikou");
        assert!(!far.similar);
    }

    #[test]
    fn test_table_is_ordered_north_to_south() {
        let cities = reference_cities();
        assert_eq!(cities.len(), 17);
        for pair in cities.windows(2) {
            assert!(pair[0].lat > pair[1].lat);
        }
    }
}
