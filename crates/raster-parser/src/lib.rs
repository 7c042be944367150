//! Raster container parser for VIIRS nighttime-light granules.
//!
//! VNP46-family granules are HDF5 containers; the gridded products live as
//! 2-D variables nested in group hierarchies (HDF-EOS layout). This crate
//! opens a granule through the `netcdf` crate, selects the first gridded
//! subdataset as the working band, and exposes its samples together with
//! the nodata sentinel and the pixel/geographic affine transform derived
//! from the granule's bounding-coordinate attributes.
//!
//! # Implementation Notes
//!
//! The first listed subdataset is assumed to be the intensity-corrected
//! nighttime-light band, which holds for the VNP46A1/VNP46A2 products.

mod error;

use std::path::Path;

use chrono::NaiveDate;
use tracing::{debug, info};

use ntl_common::{BoundingBox, GeoTransform};

pub use error::{RasterError, RasterResult};

/// Metadata describing the opened granule and the selected subdataset.
#[derive(Debug, Clone)]
pub struct RasterMetadata {
    /// Name of the selected subdataset variable.
    pub subdataset: String,
    /// Geographic bounds of the granule tile.
    pub bounds: BoundingBox,
    /// Acquisition date, when the granule carries one.
    pub acquired: Option<NaiveDate>,
}

/// A gridded raster band with its georeferencing.
///
/// Samples are row-major, top-to-bottom. Cells equal to `nodata` carry no
/// valid measurement.
#[derive(Debug, Clone)]
pub struct RasterGrid {
    /// Intensity samples (row-major order).
    pub data: Vec<f32>,
    /// Number of columns.
    pub width: usize,
    /// Number of rows.
    pub height: usize,
    /// Nodata sentinel value.
    pub nodata: f32,
    /// Pixel/geographic affine transform.
    pub transform: GeoTransform,
    /// Granule metadata.
    pub metadata: RasterMetadata,
}

impl RasterGrid {
    /// Get the value at a specific grid coordinate.
    pub fn get(&self, col: usize, row: usize) -> Option<f32> {
        if col >= self.width || row >= self.height {
            return None;
        }
        self.data.get(row * self.width + col).copied()
    }

    /// Geographic extent of the grid, derived from the transform.
    pub fn extent(&self) -> BoundingBox {
        let origin = self.transform.apply(0.0, 0.0);
        let far = self
            .transform
            .apply(self.width as f64, self.height as f64);

        BoundingBox {
            min_x: origin.x.min(far.x),
            min_y: origin.y.min(far.y),
            max_x: origin.x.max(far.x),
            max_y: origin.y.max(far.y),
        }
    }
}

/// Everything read for one subdataset, owned, so nothing borrows the
/// container handle after it closes.
struct SubdatasetRaw {
    name: String,
    width: usize,
    height: usize,
    values: Vec<f32>,
    fill: Option<f32>,
    scale: Option<f32>,
    offset: Option<f32>,
}

/// Open a nighttime-light granule and extract its first subdataset.
///
/// The container handle is released when this function returns, on every
/// exit path; the returned grid owns all of its data.
///
/// # Errors
///
/// - [`RasterError::MissingSubdataset`] when the container holds no 2-D
///   gridded variable.
/// - [`RasterError::MissingData`] when the bounding-coordinate attributes
///   needed for the affine transform are absent.
pub fn open_granule<P: AsRef<Path>>(path: P) -> RasterResult<RasterGrid> {
    let path = path.as_ref();

    let file = netcdf::open(path)
        .map_err(|e| RasterError::InvalidFormat(format!("failed to open {}: {}", path.display(), e)))?;

    // Subdatasets at the container root come first, then nested groups in
    // listed order.
    let mut raw = None;
    for var in file.variables() {
        if var.dimensions().len() == 2 {
            raw = Some(read_subdataset(&var)?);
            break;
        }
    }
    if raw.is_none() {
        for group in file
            .groups()
            .map_err(|e| RasterError::InvalidFormat(format!("failed to list groups: {}", e)))?
        {
            if let Some(found) = first_subdataset(&group)? {
                raw = Some(found);
                break;
            }
        }
    }

    let raw = raw.ok_or_else(|| RasterError::MissingSubdataset(path.display().to_string()))?;

    let bounds = find_bounds(&file)
        .ok_or_else(|| RasterError::MissingData("bounding coordinate attributes".to_string()))?;

    let acquired = find_acquisition_date(&file);

    debug!(
        subdataset = %raw.name,
        width = raw.width,
        height = raw.height,
        "selected first subdataset"
    );

    let nodata = raw.fill.unwrap_or(f32::NAN);
    let scale = raw.scale.unwrap_or(1.0);
    let offset = raw.offset.unwrap_or(0.0);

    // Scale valid samples only; the fill value must stay recognizable as
    // the nodata sentinel downstream.
    let data: Vec<f32> = raw
        .values
        .iter()
        .map(|&v| if v == nodata { v } else { v * scale + offset })
        .collect();

    let transform = GeoTransform::north_up(
        bounds.min_x,
        bounds.max_y,
        bounds.span_x() / raw.width as f64,
        bounds.span_y() / raw.height as f64,
    );

    info!(
        granule = %path.display(),
        subdataset = %raw.name,
        width = raw.width,
        height = raw.height,
        acquired = ?acquired,
        "opened nighttime-light granule"
    );

    Ok(RasterGrid {
        data,
        width: raw.width,
        height: raw.height,
        nodata,
        transform,
        metadata: RasterMetadata {
            subdataset: raw.name,
            bounds,
            acquired,
        },
    })
}

/// Depth-first search for the first 2-D variable below `group`.
fn first_subdataset(group: &netcdf::Group) -> RasterResult<Option<SubdatasetRaw>> {
    for var in group.variables() {
        if var.dimensions().len() == 2 {
            return Ok(Some(read_subdataset(&var)?));
        }
    }
    for child in group.groups() {
        if let Some(found) = first_subdataset(&child)? {
            return Ok(Some(found));
        }
    }
    Ok(None)
}

/// Read one variable's samples and packing attributes into owned storage.
fn read_subdataset(var: &netcdf::Variable) -> RasterResult<SubdatasetRaw> {
    let dims = var.dimensions();
    let height = dims[0].len();
    let width = dims[1].len();

    let values: Vec<f32> = var
        .get_values(..)
        .map_err(|e| RasterError::InvalidFormat(format!("failed to read {}: {}", var.name(), e)))?;

    if values.len() != width * height {
        return Err(RasterError::InvalidFormat(format!(
            "subdataset {} has {} samples for a {}x{} grid",
            var.name(),
            values.len(),
            width,
            height
        )));
    }

    Ok(SubdatasetRaw {
        name: var.name().to_string(),
        width,
        height,
        values,
        fill: get_var_f32_attr(var, "_FillValue"),
        scale: get_var_f32_attr(var, "scale_factor"),
        offset: get_var_f32_attr(var, "add_offset"),
    })
}

/// Locate the granule's bounding-coordinate attributes.
///
/// VNP46 granules carry WestBoundingCoord/EastBoundingCoord/
/// NorthBoundingCoord/SouthBoundingCoord either at the container root or
/// on the grid group; the nearest match wins.
fn find_bounds(file: &netcdf::File) -> Option<BoundingBox> {
    if let Some(bounds) = bounds_from_attrs(|name| get_file_f64_attr(file, name)) {
        return Some(bounds);
    }

    let groups = file.groups().ok()?;
    for group in groups {
        if let Some(bounds) = find_bounds_in_group(&group) {
            return Some(bounds);
        }
    }
    None
}

fn find_bounds_in_group(group: &netcdf::Group) -> Option<BoundingBox> {
    if let Some(bounds) = bounds_from_attrs(|name| get_group_f64_attr(group, name)) {
        return Some(bounds);
    }
    for child in group.groups() {
        if let Some(bounds) = find_bounds_in_group(&child) {
            return Some(bounds);
        }
    }
    None
}

fn bounds_from_attrs<F>(get: F) -> Option<BoundingBox>
where
    F: Fn(&str) -> Option<f64>,
{
    let west = get("WestBoundingCoord")?;
    let east = get("EastBoundingCoord")?;
    let north = get("NorthBoundingCoord")?;
    let south = get("SouthBoundingCoord")?;
    Some(BoundingBox::new(west, south, east, north))
}

/// Parse the acquisition date from the RangeBeginningDate attribute.
fn find_acquisition_date(file: &netcdf::File) -> Option<NaiveDate> {
    let raw = get_file_str_attr(file, "RangeBeginningDate")?;
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").ok()
}

// Attribute helpers. The HDF5 layer reports missing attributes loudly, so
// existence is checked before the value is fetched.

fn get_var_f32_attr(var: &netcdf::Variable, name: &str) -> Option<f32> {
    if !var.attributes().any(|attr| attr.name() == name) {
        return None;
    }
    let value = var.attribute_value(name)?.ok()?;
    f32::try_from(value).ok()
}

fn get_file_f64_attr(file: &netcdf::File, name: &str) -> Option<f64> {
    let value = file.attribute(name)?.value().ok()?;
    f64::try_from(value).ok()
}

fn get_group_f64_attr(group: &netcdf::Group, name: &str) -> Option<f64> {
    let value = group.attribute(name)?.value().ok()?;
    f64::try_from(value).ok()
}

fn get_file_str_attr(file: &netcdf::File, name: &str) -> Option<String> {
    match file.attribute(name)?.value().ok()? {
        netcdf::AttributeValue::Str(s) => Some(s),
        _ => None,
    }
}
