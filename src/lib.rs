//! Geofence - checks whether a reported position lies inside an authorized zone.
//!
//! This library provides the membership engine plus the shared types and
//! modules for the serve and check binaries.

pub mod config;
pub mod error;
pub mod fence;
pub mod models;
pub mod store;

pub use error::{ServiceError, StoreError};
pub use fence::{
    distance_meters, is_within_boundary, is_within_location_boundary, point_in_polygon,
    MembershipMethod, Verification, VerifyService,
};
pub use models::{Circle, GeoPoint, Location, LocationBoundary, Ring, Vertex};
pub use store::LocationStore;

/// Install a `tracing` fmt subscriber, preferring `RUST_LOG` over `default_filter`.
pub fn init_tracing(default_filter: &str) -> anyhow::Result<()> {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(default_filter))?;
    let subscriber = tracing_subscriber::fmt().with_env_filter(filter).finish();
    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}
