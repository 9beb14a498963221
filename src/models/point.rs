//! Coordinates and polygon rings.

use geo::BoundingRect;
use geo_types::{Coord, LineString, Rect};
use serde::{Deserialize, Serialize};

use crate::fence::{distance, polygon};

/// Geographic point (lat/lng) in decimal degrees.
///
/// Latitude is expected in [-90, 90] and longitude in [-180, 180]. Values
/// outside that range are accepted and yield meaningless but finite results.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

impl GeoPoint {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Great-circle distance to `other` in meters.
    pub fn distance_to(&self, other: &GeoPoint) -> f64 {
        distance::distance_meters(self.lat, self.lng, other.lat, other.lng)
    }
}

impl From<GeoPoint> for geo_types::Point<f64> {
    fn from(p: GeoPoint) -> Self {
        geo_types::Point::new(p.lng, p.lat)
    }
}

/// A single ring vertex.
///
/// Stored boundaries put longitude first, so the wire form is `[lng, lat]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct Vertex {
    pub lng: f64,
    pub lat: f64,
}

impl Vertex {
    pub fn new(lng: f64, lat: f64) -> Self {
        Self { lng, lat }
    }
}

impl From<[f64; 2]> for Vertex {
    fn from([lng, lat]: [f64; 2]) -> Self {
        Self { lng, lat }
    }
}

impl From<Vertex> for [f64; 2] {
    fn from(v: Vertex) -> Self {
        [v.lng, v.lat]
    }
}

impl From<Vertex> for Coord<f64> {
    fn from(v: Vertex) -> Self {
        Coord { x: v.lng, y: v.lat }
    }
}

/// Ordered polygon vertices, implicitly closed.
///
/// The first vertex may or may not be repeated at the end; containment
/// wraps the last vertex back to the first either way.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Ring(Vec<Vertex>);

impl Ring {
    pub fn new(vertices: Vec<Vertex>) -> Self {
        Self(vertices)
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Fewer than 3 vertices: contains nothing.
    pub fn is_degenerate(&self) -> bool {
        self.0.len() < polygon::MIN_RING_VERTICES
    }

    /// Even-odd containment of `point` in (lng, lat) plane coordinates.
    pub fn contains(&self, point: &GeoPoint) -> bool {
        polygon::point_in_polygon(point.lat, point.lng, &self.0)
    }

    /// Bounding rectangle in (lng, lat), `None` for an empty ring.
    pub fn bounding_rect(&self) -> Option<Rect<f64>> {
        self.to_line_string().bounding_rect()
    }

    pub fn to_line_string(&self) -> LineString<f64> {
        LineString::new(self.0.iter().copied().map(Coord::from).collect())
    }
}

impl From<Vec<[f64; 2]>> for Ring {
    fn from(coords: Vec<[f64; 2]>) -> Self {
        Self(coords.into_iter().map(Vertex::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vertex_wire_order_is_lng_first() {
        let v: Vertex = serde_json::from_str("[73.0479, 33.6844]").unwrap();
        assert_eq!(v.lng, 73.0479);
        assert_eq!(v.lat, 33.6844);
        assert_eq!(serde_json::to_string(&v).unwrap(), "[73.0479,33.6844]");
    }

    #[test]
    fn test_ring_degenerate() {
        assert!(Ring::default().is_degenerate());
        assert!(Ring::from(vec![[0.0, 0.0], [1.0, 1.0]]).is_degenerate());
        assert!(!Ring::from(vec![[0.0, 0.0], [1.0, 1.0], [1.0, 0.0]]).is_degenerate());
    }

    #[test]
    fn test_ring_bounding_rect() {
        let ring = Ring::from(vec![[0.0, 0.0], [0.0, 10.0], [10.0, 10.0], [10.0, 0.0]]);
        let rect = ring.bounding_rect().unwrap();
        assert_eq!(rect.min(), Coord { x: 0.0, y: 0.0 });
        assert_eq!(rect.max(), Coord { x: 10.0, y: 10.0 });
        assert!(Ring::default().bounding_rect().is_none());
    }

    #[test]
    fn test_point_into_geo_is_lng_lat() {
        let p: geo::Point<f64> = GeoPoint::new(33.0, 73.0).into();
        assert_eq!(p.x(), 73.0);
        assert_eq!(p.y(), 33.0);
    }
}
