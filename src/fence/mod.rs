//! Geofence verification engine.
//!
//! `distance`, `polygon` and `membership` are pure and stateless. The index
//! and service layer them over a set of stored locations.

pub mod distance;
mod index;
pub mod membership;
pub mod polygon;
mod service;

pub use distance::{distance_meters, EARTH_RADIUS_M};
pub use index::LocationIndex;
pub use membership::{classify, is_within_boundary, is_within_location_boundary, MembershipMethod};
pub use polygon::point_in_polygon;
pub use service::{Verification, VerifyService};
