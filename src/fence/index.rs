//! Spatial index for fast "which zones contain this point" lookups.

use rstar::{RTree, RTreeObject, AABB};
use std::sync::Arc;
use tracing::{debug, info};

use super::distance::EARTH_RADIUS_M;
use super::membership::is_within_boundary;
use crate::models::{Circle, GeoPoint, Location, LocationBoundary};

/// Wrapper for R-tree indexing of locations
#[derive(Clone)]
pub struct IndexedLocation {
    pub location: Arc<Location>,
    envelope: AABB<[f64; 2]>,
}

impl RTreeObject for IndexedLocation {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        self.envelope
    }
}

impl IndexedLocation {
    /// `None` when the location has no usable polygon or circle.
    pub fn new(location: Arc<Location>) -> Option<Self> {
        let envelope = boundary_envelope(&location.boundary)?;
        Some(Self { location, envelope })
    }
}

/// (lng, lat) envelope covering every point the boundary can contain.
fn boundary_envelope(boundary: &LocationBoundary) -> Option<AABB<[f64; 2]>> {
    if let Some(ring) = boundary.usable_ring() {
        let rect = ring.bounding_rect()?;
        return Some(AABB::from_corners(
            [rect.min().x, rect.min().y],
            [rect.max().x, rect.max().y],
        ));
    }
    boundary.circle.as_ref().and_then(circle_envelope)
}

fn circle_envelope(circle: &Circle) -> Option<AABB<[f64; 2]>> {
    let GeoPoint { lat, lng } = circle.center;
    let radius = circle.radius_meters;
    if radius.is_nan() || radius < 0.0 || !lat.is_finite() || !lng.is_finite() {
        return None;
    }

    // Small pad so points exactly on the circle survive rounding.
    let d_lat = (radius / EARTH_RADIUS_M).to_degrees() * 1.001 + 1e-9;
    let min_lat = lat - d_lat;
    let max_lat = lat + d_lat;

    let all_lngs = AABB::from_corners([-180.0, min_lat], [180.0, max_lat]);
    if min_lat <= -90.0 || max_lat >= 90.0 {
        return Some(all_lngs);
    }

    // Widest longitude spread occurs at the latitude nearest a pole.
    let extreme_lat = min_lat.abs().max(max_lat.abs()).to_radians();
    let d_lng = d_lat / extreme_lat.cos();
    if lng - d_lng < -180.0 || lng + d_lng > 180.0 {
        return Some(all_lngs);
    }

    Some(AABB::from_corners(
        [lng - d_lng, min_lat],
        [lng + d_lng, max_lat],
    ))
}

/// Spatial index over locations using an R-tree
pub struct LocationIndex {
    tree: RTree<IndexedLocation>,
    /// Locations with no usable boundary, kept for reporting
    unindexed: Vec<Arc<Location>>,
}

impl LocationIndex {
    /// Build spatial index from locations
    pub fn build(locations: impl IntoIterator<Item = Arc<Location>>) -> Self {
        let mut indexed = Vec::new();
        let mut unindexed = Vec::new();

        for location in locations {
            match IndexedLocation::new(Arc::clone(&location)) {
                Some(il) => indexed.push(il),
                None => unindexed.push(location),
            }
        }

        let tree = RTree::bulk_load(indexed);
        info!(
            "Location index built with {} entries ({} without usable boundary)",
            tree.size(),
            unindexed.len()
        );

        Self { tree, unindexed }
    }

    /// Find all locations containing a point, ordered by id
    pub fn lookup(&self, point: &GeoPoint) -> Vec<Arc<Location>> {
        let query_envelope = AABB::from_point([point.lng, point.lat]);

        // Envelope candidates first, then the exact membership decision
        let mut found: Vec<Arc<Location>> = self
            .tree
            .locate_in_envelope_intersecting(&query_envelope)
            .filter(|il| is_within_boundary(point, &il.location.boundary))
            .map(|il| Arc::clone(&il.location))
            .collect();
        found.sort_by(|a, b| a.id.cmp(&b.id));

        debug!(
            "Index lookup at ({}, {}): {} containing locations",
            point.lat,
            point.lng,
            found.len()
        );
        found
    }

    /// Get total number of indexed locations
    pub fn len(&self) -> usize {
        self.tree.size()
    }

    pub fn is_empty(&self) -> bool {
        self.tree.size() == 0
    }

    pub fn unindexed(&self) -> &[Arc<Location>] {
        &self.unindexed
    }
}
