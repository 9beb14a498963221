//! Location boundary records.

use serde::{Deserialize, Serialize};

use super::{GeoPoint, Ring};

/// A circular zone: center plus radius in meters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Circle {
    pub center: GeoPoint,
    pub radius_meters: f64,
}

impl Circle {
    pub fn new(center: GeoPoint, radius_meters: f64) -> Self {
        Self {
            center,
            radius_meters,
        }
    }
}

/// Boundary of an operating area: an optional polygon ring and an optional circle.
///
/// On the wire this uses the flat record shape
/// `{ boundaries, centerLat, centerLng, radiusMeters }`, any of which may be
/// null. The circle only exists when all three circle fields are set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "BoundaryRecord", into = "BoundaryRecord")]
pub struct LocationBoundary {
    pub ring: Option<Ring>,
    pub circle: Option<Circle>,
}

impl LocationBoundary {
    pub fn polygon(ring: Ring) -> Self {
        Self {
            ring: Some(ring),
            circle: None,
        }
    }

    pub fn circle(center: GeoPoint, radius_meters: f64) -> Self {
        Self {
            ring: None,
            circle: Some(Circle::new(center, radius_meters)),
        }
    }

    pub fn with_circle(mut self, center: GeoPoint, radius_meters: f64) -> Self {
        self.circle = Some(Circle::new(center, radius_meters));
        self
    }

    /// Ring with at least 3 vertices, if any.
    pub fn usable_ring(&self) -> Option<&Ring> {
        self.ring.as_ref().filter(|r| !r.is_degenerate())
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BoundaryRecord {
    #[serde(default)]
    boundaries: Option<Ring>,
    #[serde(default)]
    center_lat: Option<f64>,
    #[serde(default)]
    center_lng: Option<f64>,
    #[serde(default)]
    radius_meters: Option<f64>,
}

impl From<BoundaryRecord> for LocationBoundary {
    fn from(rec: BoundaryRecord) -> Self {
        let circle = match (rec.center_lat, rec.center_lng, rec.radius_meters) {
            (Some(lat), Some(lng), Some(radius)) => {
                Some(Circle::new(GeoPoint::new(lat, lng), radius))
            }
            _ => None,
        };
        Self {
            ring: rec.boundaries,
            circle,
        }
    }
}

impl From<LocationBoundary> for BoundaryRecord {
    fn from(b: LocationBoundary) -> Self {
        Self {
            boundaries: b.ring,
            center_lat: b.circle.map(|c| c.center.lat),
            center_lng: b.circle.map(|c| c.center.lng),
            radius_meters: b.circle.map(|c| c.radius_meters),
        }
    }
}

/// A named operating area, as supplied by the location repository.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub id: String,

    #[serde(default)]
    pub name: String,

    #[serde(flatten)]
    pub boundary: LocationBoundary,
}

impl Location {
    pub fn new(id: impl Into<String>, name: impl Into<String>, boundary: LocationBoundary) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            boundary,
        }
    }
}
