//! Cropping a raster grid to a boundary bounding box.

use ntl_common::{BoundingBox, GeoTransform};
use raster_parser::RasterGrid;
use tracing::debug;

use crate::error::{GridError, Result};

/// A raster sub-grid produced by [`crop_to_bbox`].
///
/// After cropping, cells that carried the source nodata sentinel are
/// rewritten to zero, so zero is the sentinel for everything downstream:
/// "true no data" and "below measurable range" collapse onto level 0.
#[derive(Debug, Clone)]
pub struct CroppedGrid {
    /// Intensity samples (row-major order).
    pub data: Vec<f32>,
    /// Number of columns.
    pub width: usize,
    /// Number of rows.
    pub height: usize,
    /// Nodata sentinel valid for this grid (always zero, see above).
    pub nodata: f32,
    /// Transform valid for this sub-grid's local pixel coordinates.
    pub transform: GeoTransform,
}

impl CroppedGrid {
    /// Get the value at a specific grid coordinate.
    pub fn get(&self, col: usize, row: usize) -> Option<f32> {
        if col >= self.width || row >= self.height {
            return None;
        }
        self.data.get(row * self.width + col).copied()
    }
}

/// Clip a raster to a bounding box, returning the overlapping sub-array
/// and a transform valid for its local pixel coordinates.
///
/// Uses floor for the minimum indices and ceil for the maximum indices so
/// every pixel intersecting the bbox is captured.
///
/// # Errors
///
/// [`GridError::EmptyCrop`] when the bbox does not intersect the raster
/// extent.
pub fn crop_to_bbox(raster: &RasterGrid, bbox: &BoundingBox) -> Result<CroppedGrid> {
    let extent = raster.extent();
    if extent.intersection(bbox).is_none() {
        return Err(GridError::empty_crop(
            format!("{:?}", bbox),
            format!("{:?}", extent),
        ));
    }

    // Map every bbox corner to a fractional pixel position and take the
    // min/max over all four.
    let mut col_min = f64::INFINITY;
    let mut col_max = f64::NEG_INFINITY;
    let mut row_min = f64::INFINITY;
    let mut row_max = f64::NEG_INFINITY;
    for corner in bbox.corners() {
        let loc = raster
            .transform
            .locate(&corner)
            .ok_or(GridError::NonInvertibleTransform)?;
        col_min = col_min.min(loc.col);
        col_max = col_max.max(loc.col);
        row_min = row_min.min(loc.row);
        row_max = row_max.max(loc.row);
    }

    let col_start = col_min.floor().max(0.0) as usize;
    let col_end = (col_max.ceil().min(raster.width as f64) as usize).max(col_start);
    let row_start = row_min.floor().max(0.0) as usize;
    let row_end = (row_max.ceil().min(raster.height as f64) as usize).max(row_start);

    let width = col_end - col_start;
    let height = row_end - row_start;
    if width == 0 || height == 0 {
        return Err(GridError::empty_crop(
            format!("{:?}", bbox),
            format!("{:?}", extent),
        ));
    }

    debug!(
        col_start,
        row_start, width, height, "cropping raster to boundary window"
    );

    // Copy the window, rewriting nodata to zero as we go.
    let mut data = Vec::with_capacity(width * height);
    for row in row_start..row_end {
        for col in col_start..col_end {
            let value = raster.data[row * raster.width + col];
            data.push(if value == raster.nodata { 0.0 } else { value });
        }
    }

    Ok(CroppedGrid {
        data,
        width,
        height,
        nodata: 0.0,
        transform: raster.transform.window(col_start, row_start),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use raster_parser::RasterMetadata;

    fn raster_4x4() -> RasterGrid {
        // 4x4 grid over x 0..4, y 0..4, one unit per pixel, 65535 = nodata.
        let data = vec![
            1.0, 2.0, 3.0, 4.0, //
            5.0, 65535.0, 7.0, 8.0, //
            9.0, 10.0, 11.0, 12.0, //
            13.0, 14.0, 15.0, 16.0,
        ];
        RasterGrid {
            data,
            width: 4,
            height: 4,
            nodata: 65535.0,
            transform: GeoTransform::north_up(0.0, 4.0, 1.0, 1.0),
            metadata: RasterMetadata {
                subdataset: "test".to_string(),
                bounds: BoundingBox::new(0.0, 0.0, 4.0, 4.0),
                acquired: None,
            },
        }
    }

    #[test]
    fn test_crop_full_extent_is_identity_with_nodata_rewrite() {
        let raster = raster_4x4();
        let cropped = crop_to_bbox(&raster, &BoundingBox::new(0.0, 0.0, 4.0, 4.0)).unwrap();

        assert_eq!(cropped.width, 4);
        assert_eq!(cropped.height, 4);
        assert_eq!(cropped.get(0, 0), Some(1.0));
        // The nodata cell comes back as zero.
        assert_eq!(cropped.get(1, 1), Some(0.0));
        assert_eq!(cropped.nodata, 0.0);
    }

    #[test]
    fn test_crop_subwindow_values_and_transform() {
        let raster = raster_4x4();
        // Lower-right quadrant: x 2..4, y 0..2 covers rows 2..4, cols 2..4.
        let cropped = crop_to_bbox(&raster, &BoundingBox::new(2.0, 0.0, 4.0, 2.0)).unwrap();

        assert_eq!(cropped.width, 2);
        assert_eq!(cropped.height, 2);
        assert_eq!(cropped.get(0, 0), Some(11.0));
        assert_eq!(cropped.get(1, 1), Some(16.0));

        // The windowed transform places local (0, 0) at geographic (2, 2).
        let origin = cropped.transform.apply(0.0, 0.0);
        assert!((origin.x - 2.0).abs() < 1e-12);
        assert!((origin.y - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_crop_partial_overlap_clamps_to_extent() {
        let raster = raster_4x4();
        let cropped = crop_to_bbox(&raster, &BoundingBox::new(3.0, 3.0, 10.0, 10.0)).unwrap();

        assert_eq!(cropped.width, 1);
        assert_eq!(cropped.height, 1);
        assert_eq!(cropped.get(0, 0), Some(4.0));
    }

    #[test]
    fn test_crop_disjoint_bbox_is_empty() {
        let raster = raster_4x4();
        let err = crop_to_bbox(&raster, &BoundingBox::new(10.0, 10.0, 12.0, 12.0)).unwrap_err();
        assert!(matches!(err, GridError::EmptyCrop { .. }));
    }
}
