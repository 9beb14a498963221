//! Core data models for geofence verification.

pub mod location;
pub mod point;

pub use location::{Circle, Location, LocationBoundary};
pub use point::{GeoPoint, Ring, Vertex};
