//! Error types for the repository and service surfaces.
//!
//! The membership engine itself never fails; these cover loading location
//! data and looking records up.

use std::path::PathBuf;
use thiserror::Error;

/// Errors produced while loading a location store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse locations: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("duplicate location id {0:?}")]
    DuplicateId(String),
}

/// Errors produced by the verification service.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("unknown location {0:?}")]
    UnknownLocation(String),
}

pub type StoreResult<T> = Result<T, StoreError>;
pub type ServiceResult<T> = Result<T, ServiceError>;
