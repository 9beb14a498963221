//! Even-odd ray casting on the (lng, lat) plane.
//!
//! Longitude is x and latitude is y. This is a flat approximation, fine for
//! zones a few kilometers across; it is not geodesic and does not handle
//! rings that cross the antimeridian or enclose a pole.

use crate::models::Vertex;

/// Rings with fewer vertices than this contain nothing.
pub const MIN_RING_VERTICES: usize = 3;

/// Whether (`point_lat`, `point_lng`) lies inside `ring`.
///
/// Points exactly on an edge or vertex get whatever the crossing test
/// yields; there is no special-casing.
pub fn point_in_polygon(point_lat: f64, point_lng: f64, ring: &[Vertex]) -> bool {
    if ring.len() < MIN_RING_VERTICES {
        return false;
    }

    let (x, y) = (point_lng, point_lat);
    let mut inside = false;

    let mut j = ring.len() - 1;
    for i in 0..ring.len() {
        let (xi, yi) = (ring[i].lng, ring[i].lat);
        let (xj, yj) = (ring[j].lng, ring[j].lat);

        // Strict comparison: horizontal edges never toggle.
        if (yi > y) != (yj > y) && x < (xj - xi) * (y - yi) / (yj - yi) + xi {
            inside = !inside;
        }
        j = i;
    }

    inside
}
