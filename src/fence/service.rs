//! Verification service for checking reported positions against stored zones.

use chrono::{DateTime, Utc};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;

use super::membership::{classify, MembershipMethod};
use super::LocationIndex;
use crate::error::{ServiceError, ServiceResult};
use crate::models::{GeoPoint, Location};
use crate::store::LocationStore;

/// Outcome of checking one point against one location.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Verification {
    pub location_id: String,

    pub point: GeoPoint,

    pub inside: bool,

    pub method: MembershipMethod,

    /// Distance to the circle center; only set when the circle decided
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance_meters: Option<f64>,

    pub checked_at: DateTime<Utc>,
}

/// Location lookup plus membership checks
pub struct VerifyService {
    store: LocationStore,
    index: LocationIndex,
}

impl VerifyService {
    /// Create a new service, indexing every location in the store
    pub fn new(store: LocationStore) -> Self {
        let index = LocationIndex::build(store.iter().cloned());
        Self { store, index }
    }

    /// Check `point` against the location stored under `location_id`
    pub fn verify(&self, location_id: &str, point: GeoPoint) -> ServiceResult<Verification> {
        let location = self
            .store
            .get(location_id)
            .ok_or_else(|| ServiceError::UnknownLocation(location_id.to_string()))?;

        Ok(verify_location(location, point))
    }

    /// All locations containing `point`, ordered by id
    pub fn locate(&self, point: GeoPoint) -> Vec<Arc<Location>> {
        self.index.lookup(&point)
    }

    /// Verify many requests in parallel; results keep input order
    pub fn verify_batch(&self, requests: &[(String, GeoPoint)]) -> Vec<ServiceResult<Verification>> {
        requests
            .par_iter()
            .map(|(id, point)| self.verify(id, *point))
            .collect()
    }

    pub fn store(&self) -> &LocationStore {
        &self.store
    }

    /// Get the spatial index (for stats/debugging)
    pub fn index(&self) -> &LocationIndex {
        &self.index
    }
}

/// Run the membership decision for one location.
pub fn verify_location(location: &Location, point: GeoPoint) -> Verification {
    let (inside, method) = classify(&point, &location.boundary);

    let distance_meters = match (method, &location.boundary.circle) {
        (MembershipMethod::Circle, Some(circle)) => Some(point.distance_to(&circle.center)),
        _ => None,
    };

    debug!(
        "Verified ({}, {}) against {:?}: inside={} via {}",
        point.lat, point.lng, location.id, inside, method
    );

    Verification {
        location_id: location.id.clone(),
        point,
        inside,
        method,
        distance_meters,
        checked_at: Utc::now(),
    }
}
