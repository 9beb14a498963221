//! Verification server for geofence checks.
//!
//! Provides an HTTP API for checking reported positions against stored
//! locations, locating the zones that contain a point, and ad-hoc checks
//! against a caller-supplied boundary.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::Json,
    routing::{get, post},
    Router,
};
use clap::Parser;
use serde::{Deserialize, Serialize};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use geofence::config::Config;
use geofence::fence::classify;
use geofence::{
    GeoPoint, LocationBoundary, LocationStore, MembershipMethod, ServiceError, Verification,
    VerifyService,
};

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

#[derive(Parser, Debug)]
#[command(name = "serve")]
#[command(about = "Geofence verification server")]
struct Args {
    /// Path to the TOML config file
    #[arg(short, long, default_value = "geofence.toml")]
    config: PathBuf,

    /// Listen address (overrides the config file)
    #[arg(short, long)]
    listen: Option<String>,
}

/// Application state shared across handlers
struct AppState {
    service: VerifyService,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let config = Config::load_from_file(&args.config)?;

    geofence::init_tracing(&config.logging.filter)?;

    info!("Geofence Verification Server");

    let store = LocationStore::load_from_file(&config.locations.path)
        .with_context(|| format!("Failed to load {}", config.locations.path.display()))?;
    let service = VerifyService::new(store);

    let state = Arc::new(AppState { service });

    // Build router
    let app = Router::new()
        .route("/health", get(health_handler))
        .route("/v1/verify", get(verify_handler))
        .route("/v1/verify/batch", post(verify_batch_handler))
        .route("/v1/locate", get(locate_handler))
        .route("/v1/check", post(check_handler))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    let listen = args.listen.unwrap_or(config.server.listen);
    info!("Starting server on {}", listen);

    let listener = tokio::net::TcpListener::bind(&listen).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Health check endpoint
async fn health_handler(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        locations: state.service.store().len(),
    })
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    locations: usize,
}

/// Verify one point against one stored location
async fn verify_handler(
    State(state): State<Arc<AppState>>,
    Query(params): Query<VerifyParams>,
) -> Result<Json<Verification>, (StatusCode, String)> {
    let point = GeoPoint::new(params.lat, params.lng);
    state
        .service
        .verify(&params.location_id, point)
        .map(Json)
        .map_err(|e| {
            warn!("Verification failed: {}", e);
            match e {
                ServiceError::UnknownLocation(_) => (StatusCode::NOT_FOUND, e.to_string()),
            }
        })
}

/// Verify many points; one failing request does not fail the batch
async fn verify_batch_handler(
    State(state): State<Arc<AppState>>,
    Json(body): Json<BatchRequest>,
) -> Json<BatchResponse> {
    let requests: Vec<(String, GeoPoint)> = body
        .requests
        .into_iter()
        .map(|r| (r.location_id, GeoPoint::new(r.lat, r.lng)))
        .collect();

    let results = state
        .service
        .verify_batch(&requests)
        .into_iter()
        .zip(requests)
        .map(|(result, (location_id, _))| match result {
            Ok(v) => BatchItem::Verified(v),
            Err(e) => BatchItem::Failed {
                location_id,
                error: e.to_string(),
            },
        })
        .collect();

    Json(BatchResponse { results })
}

/// List the stored locations containing a point
async fn locate_handler(
    State(state): State<Arc<AppState>>,
    Query(params): Query<PointParams>,
) -> Json<LocateResponse> {
    let locations = state
        .service
        .locate(GeoPoint::new(params.lat, params.lng))
        .iter()
        .map(|l| LocationSummary {
            id: l.id.clone(),
            name: l.name.clone(),
        })
        .collect();

    Json(LocateResponse { locations })
}

/// Check a point against a boundary supplied in the request body
async fn check_handler(Json(body): Json<CheckRequest>) -> Json<CheckResponse> {
    let (inside, method) = classify(&GeoPoint::new(body.lat, body.lng), &body.boundary);
    Json(CheckResponse { inside, method })
}

#[derive(Deserialize)]
struct VerifyParams {
    location_id: String,
    lat: f64,
    lng: f64,
}

#[derive(Deserialize)]
struct PointParams {
    lat: f64,
    lng: f64,
}

#[derive(Deserialize)]
struct BatchRequest {
    requests: Vec<BatchRequestItem>,
}

#[derive(Deserialize)]
struct BatchRequestItem {
    location_id: String,
    lat: f64,
    lng: f64,
}

#[derive(Serialize)]
struct BatchResponse {
    results: Vec<BatchItem>,
}

#[derive(Serialize)]
#[serde(untagged)]
enum BatchItem {
    Verified(Verification),
    Failed { location_id: String, error: String },
}

#[derive(Serialize)]
struct LocateResponse {
    locations: Vec<LocationSummary>,
}

#[derive(Serialize)]
struct LocationSummary {
    id: String,
    name: String,
}

#[derive(Deserialize)]
struct CheckRequest {
    lat: f64,
    lng: f64,
    boundary: LocationBoundary,
}

#[derive(Serialize)]
struct CheckResponse {
    inside: bool,
    method: MembershipMethod,
}
