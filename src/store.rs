//! In-memory location repository.

use hashbrown::HashMap;
use std::fs;
use std::path::Path;
use std::sync::Arc;
use tracing::{info, warn};

use crate::error::{StoreError, StoreResult};
use crate::models::Location;

/// Locations keyed by id.
#[derive(Debug, Default, Clone)]
pub struct LocationStore {
    by_id: HashMap<String, Arc<Location>>,
}

impl LocationStore {
    /// Build a store, rejecting duplicate ids.
    pub fn from_locations(locations: Vec<Location>) -> StoreResult<Self> {
        let mut by_id = HashMap::with_capacity(locations.len());

        let mut polygons = 0;
        let mut circles = 0;

        for location in locations {
            if location.boundary.usable_ring().is_some() {
                polygons += 1;
            } else if location.boundary.circle.is_some() {
                circles += 1;
            } else {
                warn!(
                    "Location {:?} has no usable polygon or circle; it will never verify",
                    location.id
                );
            }

            if by_id.contains_key(&location.id) {
                return Err(StoreError::DuplicateId(location.id));
            }
            by_id.insert(location.id.clone(), Arc::new(location));
        }

        info!(
            "Loaded {} locations ({} polygon, {} circle, {} unusable)",
            by_id.len(),
            polygons,
            circles,
            by_id.len() - polygons - circles
        );

        Ok(Self { by_id })
    }

    /// Parse a JSON array of location records.
    pub fn from_json_str(json: &str) -> StoreResult<Self> {
        let locations: Vec<Location> = serde_json::from_str(json)?;
        Self::from_locations(locations)
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> StoreResult<Self> {
        let path = path.as_ref();
        info!("Loading locations from {}", path.display());
        let content = fs::read_to_string(path).map_err(|source| StoreError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&content)
    }

    pub fn get(&self, id: &str) -> Option<&Arc<Location>> {
        self.by_id.get(id)
    }

    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<Location>> {
        self.by_id.values()
    }
}
