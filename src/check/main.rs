//! Offline geofence checks from the command line.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use geofence::{distance_meters, GeoPoint, LocationStore, VerifyService};

#[derive(Parser, Debug)]
#[command(name = "check")]
#[command(about = "Check positions against geofence locations")]
struct Args {
    /// Log filter used when RUST_LOG is unset
    #[arg(long, default_value = "warn")]
    log: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Great-circle distance in meters between two points
    Distance {
        lat1: f64,
        lon1: f64,
        lat2: f64,
        lon2: f64,
    },

    /// Verify a point against one location
    Verify {
        /// JSON file with location records
        #[arg(short, long)]
        locations: PathBuf,
        location_id: String,
        lat: f64,
        lng: f64,
    },

    /// List every location containing a point
    Locate {
        /// JSON file with location records
        #[arg(short, long)]
        locations: PathBuf,
        lat: f64,
        lng: f64,
    },
}

fn main() -> Result<()> {
    let args = Args::parse();
    geofence::init_tracing(&args.log)?;

    match args.command {
        Command::Distance {
            lat1,
            lon1,
            lat2,
            lon2,
        } => {
            println!("{:.3}", distance_meters(lat1, lon1, lat2, lon2));
        }
        Command::Verify {
            locations,
            location_id,
            lat,
            lng,
        } => {
            let service = load_service(&locations)?;
            let verification = service.verify(&location_id, GeoPoint::new(lat, lng))?;
            println!("{}", serde_json::to_string_pretty(&verification)?);
        }
        Command::Locate {
            locations,
            lat,
            lng,
        } => {
            let service = load_service(&locations)?;
            for location in service.locate(GeoPoint::new(lat, lng)) {
                println!("{}\t{}", location.id, location.name);
            }
        }
    }

    Ok(())
}

fn load_service(path: &Path) -> Result<VerifyService> {
    let store = LocationStore::load_from_file(path)
        .with_context(|| format!("Failed to load {}", path.display()))?;
    Ok(VerifyService::new(store))
}
