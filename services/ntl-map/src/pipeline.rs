//! The map rendering pipeline.
//!
//! All I/O happens inside [`run`]; nothing executes at module load.

use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::info;

use grid_processor::{
    apply_marker, compute_levels, crop_to_bbox, digitize, merge, rasterize_boundary,
};
use ntl_common::GeoPoint;
use renderer::{render_rows, SymbolGradient};

use crate::boundary;
use crate::output;

/// Everything one rendering run needs.
#[derive(Debug, Clone)]
pub struct MapConfig {
    /// Path to the nighttime-light granule.
    pub input_path: PathBuf,
    /// Boundary name; resolves the definition file and the output base
    /// name.
    pub boundary_name: String,
    /// Optional marker coordinate.
    pub marker: Option<GeoPoint>,
    /// Directory holding boundary definitions.
    pub data_dir: PathBuf,
    /// Directory the rendered map is written to.
    pub output_dir: PathBuf,
}

/// Execute the pipeline: open, crop, quantize, rasterize, composite,
/// render, write.
pub fn run(config: &MapConfig) -> Result<()> {
    let boundary = boundary::load_boundary(&config.data_dir, &config.boundary_name)
        .with_context(|| format!("resolving boundary '{}'", config.boundary_name))?;

    let raster = raster_parser::open_granule(&config.input_path)
        .with_context(|| format!("opening granule {}", config.input_path.display()))?;

    let cropped = crop_to_bbox(&raster, boundary.bbox()).context("cropping to boundary bbox")?;

    let gradient = SymbolGradient::nightlight();
    let levels = compute_levels(&cropped.data, cropped.nodata, gradient.bins())
        .context("computing quantization levels")?;
    let grouped = digitize(&cropped.data, &levels);

    let sentinel = gradient.boundary_sentinel();
    let mask = rasterize_boundary(
        &boundary,
        cropped.width,
        cropped.height,
        &cropped.transform,
        sentinel,
    );

    let mut composite = merge(&grouped, &mask, cropped.width, cropped.height, sentinel);

    if let Some(marker) = &config.marker {
        let (marked, cell) = apply_marker(&composite, &cropped.transform, marker)
            .context("placing marker coordinate")?;
        println!("Your coordinates are at row {}, column {}", cell.row, cell.col);
        composite = marked;
    }

    let rows = render_rows(&composite, &gradient);
    let path = output::write_map(&config.output_dir, &config.boundary_name, &rows)
        .context("writing map artifact")?;

    info!(path = %path.display(), rows = rows.len(), "map written");

    Ok(())
}
