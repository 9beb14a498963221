//! Boundary membership: polygon first, circle as fallback.

use serde::{Deserialize, Serialize};

use crate::models::{GeoPoint, LocationBoundary};

/// Which part of a boundary decided a membership check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MembershipMethod {
    /// A ring with at least 3 vertices was present.
    Polygon,
    /// No usable ring, but a complete circle was present.
    Circle,
    /// Neither; the point is never inside.
    Unverifiable,
}

impl std::fmt::Display for MembershipMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MembershipMethod::Polygon => write!(f, "polygon"),
            MembershipMethod::Circle => write!(f, "circle"),
            MembershipMethod::Unverifiable => write!(f, "unverifiable"),
        }
    }
}

/// Decide membership and report the branch taken.
///
/// A usable polygon always wins over a circle on the same boundary. The
/// circle edge is inclusive.
pub fn classify(point: &GeoPoint, boundary: &LocationBoundary) -> (bool, MembershipMethod) {
    if let Some(ring) = boundary.usable_ring() {
        return (ring.contains(point), MembershipMethod::Polygon);
    }

    if let Some(circle) = &boundary.circle {
        let inside = point.distance_to(&circle.center) <= circle.radius_meters;
        return (inside, MembershipMethod::Circle);
    }

    (false, MembershipMethod::Unverifiable)
}

pub fn is_within_boundary(point: &GeoPoint, boundary: &LocationBoundary) -> bool {
    classify(point, boundary).0
}

/// Whether the user's position lies inside `boundary`.
///
/// A missing boundary, or one with no usable polygon or circle, gives `false`.
pub fn is_within_location_boundary(
    user_lat: f64,
    user_lng: f64,
    boundary: Option<&LocationBoundary>,
) -> bool {
    boundary.is_some_and(|b| is_within_boundary(&GeoPoint::new(user_lat, user_lng), b))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fence::distance::distance_meters;
    use crate::models::Ring;

    fn square() -> Ring {
        Ring::from(vec![[0.0, 0.0], [0.0, 10.0], [10.0, 10.0], [10.0, 0.0]])
    }

    #[test]
    fn test_absent_boundary() {
        assert!(!is_within_location_boundary(0.0, 0.0, None));
    }

    #[test]
    fn test_empty_boundary() {
        let empty = LocationBoundary::default();
        for &(lat, lng) in &[(0.0, 0.0), (33.6844, 73.0479), (-90.0, 180.0)] {
            assert!(!is_within_location_boundary(lat, lng, Some(&empty)));
        }
        assert_eq!(
            classify(&GeoPoint::new(0.0, 0.0), &empty),
            (false, MembershipMethod::Unverifiable)
        );
    }

    #[test]
    fn test_polygon_branch() {
        let b = LocationBoundary::polygon(square());
        assert_eq!(
            classify(&GeoPoint::new(5.0, 5.0), &b),
            (true, MembershipMethod::Polygon)
        );
        assert_eq!(
            classify(&GeoPoint::new(15.0, 15.0), &b),
            (false, MembershipMethod::Polygon)
        );
    }

    #[test]
    fn test_circle_edge_is_inclusive() {
        let radius = distance_meters(0.0, 0.0, 0.0, 1.0);
        let b = LocationBoundary::circle(GeoPoint::new(0.0, 0.0), radius);
        assert!(is_within_location_boundary(0.0, 1.0, Some(&b)));
        assert!(!is_within_location_boundary(0.0, 1.001, Some(&b)));
    }

    #[test]
    fn test_polygon_takes_precedence_over_circle() {
        // Ring excludes (15, 15); circle of 5000 km around it includes it.
        let b = LocationBoundary::polygon(square()).with_circle(GeoPoint::new(15.0, 15.0), 5_000_000.0);
        assert_eq!(
            classify(&GeoPoint::new(15.0, 15.0), &b),
            (false, MembershipMethod::Polygon)
        );
    }

    #[test]
    fn test_degenerate_ring_falls_back_to_circle() {
        let ring = Ring::from(vec![[0.0, 0.0], [1.0, 1.0]]);
        let b = LocationBoundary::polygon(ring).with_circle(GeoPoint::new(0.0, 0.0), 1_000.0);
        assert_eq!(
            classify(&GeoPoint::new(0.001, 0.001), &b),
            (true, MembershipMethod::Circle)
        );
    }

    #[test]
    fn test_degenerate_ring_without_circle() {
        let b = LocationBoundary::polygon(Ring::from(vec![[0.0, 0.0]]));
        assert!(!is_within_location_boundary(0.0, 0.0, Some(&b)));
    }

    #[test]
    fn test_clock_in_scenario() {
        let b: LocationBoundary = serde_json::from_str(
            r#"{"boundaries": null, "centerLat": 33.6844, "centerLng": 73.0479, "radiusMeters": 500}"#,
        )
        .unwrap();

        let near = GeoPoint::new(33.6850, 73.0480);
        let d = near.distance_to(&GeoPoint::new(33.6844, 73.0479));
        assert!(d > 50.0 && d < 90.0, "got {}", d);
        assert!(is_within_location_boundary(near.lat, near.lng, Some(&b)));

        let far = GeoPoint::new(33.7000, 73.0600);
        assert!(!is_within_location_boundary(far.lat, far.lng, Some(&b)));
    }

    #[test]
    fn test_negative_radius_contains_nothing() {
        let b = LocationBoundary::circle(GeoPoint::new(0.0, 0.0), -1.0);
        assert!(!is_within_location_boundary(0.0, 0.0, Some(&b)));
    }
}
