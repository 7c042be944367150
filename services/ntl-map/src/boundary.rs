//! Boundary definition loading.
//!
//! Boundaries live as GeoJSON Feature files in the data directory, one
//! per name (`<data-dir>/<name>.geojson`). Each file must carry a
//! top-level `bbox` member; the geometry may be a Polygon or a
//! MultiPolygon.

use std::fs;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use ntl_common::{BoundaryPolygon, BoundingBox, Ring};

/// Errors raised while resolving a named boundary definition.
#[derive(Error, Debug)]
pub enum BoundaryError {
    /// No boundary definition exists for the requested name.
    #[error("boundary definition not found: {0}")]
    NotFound(String),

    /// The definition file could not be read.
    #[error("failed to read boundary definition: {0}")]
    Io(#[from] std::io::Error),

    /// The definition file is not valid GeoJSON.
    #[error("failed to parse boundary definition: {0}")]
    Parse(#[from] serde_json::Error),

    /// The definition carries no `bbox` member.
    #[error("boundary definition {0} has no bbox")]
    MissingBbox(String),

    /// The definition carries no usable polygon geometry.
    #[error("boundary definition {0} has no polygon geometry")]
    InvalidGeometry(String),
}

/// A GeoJSON Feature as stored on disk.
#[derive(Debug, Deserialize)]
struct BoundaryFeature {
    bbox: Option<[f64; 4]>,
    geometry: Option<BoundaryGeometry>,
}

/// The geometry kinds a boundary definition may carry.
#[derive(Debug, Deserialize)]
#[serde(tag = "type")]
enum BoundaryGeometry {
    Polygon {
        /// Array of linear rings (first is exterior, rest are holes).
        coordinates: Vec<Vec<[f64; 2]>>,
    },
    MultiPolygon {
        /// Array of polygons, each an array of linear rings.
        coordinates: Vec<Vec<Vec<[f64; 2]>>>,
    },
}

/// Load the boundary definition registered under `name`.
pub fn load_boundary(data_dir: &Path, name: &str) -> Result<BoundaryPolygon, BoundaryError> {
    let path = data_dir.join(format!("{name}.geojson"));
    if !path.exists() {
        return Err(BoundaryError::NotFound(name.to_string()));
    }

    let raw = fs::read_to_string(&path)?;
    let feature: BoundaryFeature = serde_json::from_str(&raw)?;

    let bbox = feature
        .bbox
        .ok_or_else(|| BoundaryError::MissingBbox(name.to_string()))?;

    let rings: Vec<Ring> = match feature.geometry {
        Some(BoundaryGeometry::Polygon { coordinates }) => coordinates,
        Some(BoundaryGeometry::MultiPolygon { coordinates }) => {
            coordinates.into_iter().flatten().collect()
        }
        None => return Err(BoundaryError::InvalidGeometry(name.to_string())),
    };

    if rings.iter().all(|ring| ring.len() < 3) {
        return Err(BoundaryError::InvalidGeometry(name.to_string()));
    }

    debug!(name, rings = rings.len(), "loaded boundary definition");

    Ok(BoundaryPolygon::new(
        rings,
        BoundingBox::from_geojson(bbox),
    ))
}
