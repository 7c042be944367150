//! Nighttime-light text map renderer.
//!
//! Opens a VIIRS VNP46 granule, crops it to a named administrative
//! boundary, quantizes the light intensities into a fixed symbol
//! gradient, overlays the boundary outline and an optional marker, and
//! writes the result as a text map.
//!
//! Example:
//!
//! ```text
//! ntl-map --input-path data/VNP46A2.A2024307.h19v03.001.h5 \
//!     --boundary-name berlin \
//!     --marker-coordinates 13.445852,52.500135
//! ```

mod boundary;
mod output;
mod pipeline;

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing::{warn, Level};
use tracing_subscriber::FmtSubscriber;

use ntl_common::GeoPoint;
use pipeline::MapConfig;

#[derive(Parser, Debug)]
#[command(name = "ntl-map")]
#[command(about = "Render a nighttime-light granule as a boundary-clipped text map")]
struct Args {
    /// Path to the nighttime-light raster granule (HDF5)
    #[arg(long)]
    input_path: PathBuf,

    /// Boundary name; resolves <data-dir>/<name>.geojson and the output
    /// file base name
    #[arg(long)]
    boundary_name: String,

    /// Optional marker as "lon,lat"; malformed input is ignored
    #[arg(long)]
    marker_coordinates: Option<String>,

    /// Directory holding boundary definitions
    #[arg(long, env = "NTL_DATA_DIR", default_value = "data")]
    data_dir: PathBuf,

    /// Directory the rendered map is written to
    #[arg(long, env = "NTL_OUTPUT_DIR", default_value = "data")]
    output_dir: PathBuf,

    /// Log level
    #[arg(long, default_value = "info")]
    log_level: String,
}

/// Parse a "lon,lat" pair. Anything malformed degrades to "no marker";
/// the map still renders.
fn parse_marker(raw: &str) -> Option<GeoPoint> {
    let parts: Vec<_> = raw.split(',').map(str::trim).collect();
    if parts.len() != 2 {
        warn!(raw, "ignoring marker coordinates: expected \"lon,lat\"");
        return None;
    }

    match (parts[0].parse::<f64>(), parts[1].parse::<f64>()) {
        (Ok(x), Ok(y)) => Some(GeoPoint::new(x, y)),
        _ => {
            warn!(raw, "ignoring marker coordinates: not a numeric pair");
            None
        }
    }
}

fn main() -> Result<()> {
    // Load environment from .env file if present
    dotenvy::dotenv().ok();

    let args = Args::parse();

    let level = match args.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    // Logs go to stderr; stdout carries the rendered map.
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    let marker = args.marker_coordinates.as_deref().and_then(parse_marker);

    let config = MapConfig {
        input_path: args.input_path,
        boundary_name: args.boundary_name,
        marker,
        data_dir: args.data_dir,
        output_dir: args.output_dir,
    };

    pipeline::run(&config)
}
