//! Compositing quantized levels with the boundary mask and marker.

use ntl_common::{GeoPoint, GeoTransform};
use tracing::debug;

use crate::error::{GridError, Result};

/// A grid of discrete level indices ready for rendering.
///
/// Level 0 means "no data"; values up to the bin count are quantized
/// intensities; the boundary sentinel sits strictly above all of them.
#[derive(Debug, Clone, PartialEq)]
pub struct CompositeGrid {
    /// Level indices (row-major order).
    pub levels: Vec<u8>,
    /// Number of columns.
    pub width: usize,
    /// Number of rows.
    pub height: usize,
}

impl CompositeGrid {
    /// Get the level at a specific grid coordinate.
    pub fn get(&self, col: usize, row: usize) -> Option<u8> {
        if col >= self.width || row >= self.height {
            return None;
        }
        self.levels.get(row * self.width + col).copied()
    }
}

/// The cell a geographic marker resolved to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MarkerCell {
    pub row: usize,
    pub col: usize,
}

/// Merge the quantized level grid with the boundary mask.
///
/// The boundary always wins: a cell carrying the sentinel in the mask
/// carries it in the output, every other cell keeps its quantized level.
pub fn merge(
    level_grid: &[u8],
    mask_grid: &[u8],
    width: usize,
    height: usize,
    sentinel: u8,
) -> CompositeGrid {
    debug_assert_eq!(level_grid.len(), width * height);
    debug_assert_eq!(mask_grid.len(), width * height);

    let levels = level_grid
        .iter()
        .zip(mask_grid)
        .map(|(&level, &mask)| if mask == sentinel { sentinel } else { level })
        .collect();

    CompositeGrid {
        levels,
        width,
        height,
    }
}

/// Overwrite the single cell a geographic marker maps to with level 0.
///
/// The marker reuses the "no data" level, so it renders with the
/// distinguished no-data symbol. Produces a new grid; the input is
/// left untouched. Applying the same marker twice yields the same grid
/// as applying it once.
///
/// # Errors
///
/// - [`GridError::NonInvertibleTransform`] when the transform cannot be
///   inverted.
/// - [`GridError::MarkerOutOfBounds`] when the truncated pixel indices
///   fall outside the grid.
pub fn apply_marker(
    grid: &CompositeGrid,
    transform: &GeoTransform,
    point: &GeoPoint,
) -> Result<(CompositeGrid, MarkerCell)> {
    let location = transform
        .locate(point)
        .ok_or(GridError::NonInvertibleTransform)?;

    // Truncation toward zero matches the original behavior: a location
    // fractionally outside the top or left edge still lands on row or
    // column 0, while anything at or beyond -1 is rejected.
    let row = location.row.trunc() as i64;
    let col = location.col.trunc() as i64;

    if row < 0 || col < 0 || row >= grid.height as i64 || col >= grid.width as i64 {
        return Err(GridError::MarkerOutOfBounds {
            row,
            col,
            width: grid.width,
            height: grid.height,
        });
    }

    let cell = MarkerCell {
        row: row as usize,
        col: col as usize,
    };

    debug!(row = cell.row, col = cell.col, "placing marker");

    let mut levels = grid.levels.clone();
    levels[cell.row * grid.width + cell.col] = 0;

    Ok((
        CompositeGrid {
            levels,
            width: grid.width,
            height: grid.height,
        },
        cell,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn composite_10x10() -> CompositeGrid {
        CompositeGrid {
            levels: (0..100).map(|i| (i % 5 + 1) as u8).collect(),
            width: 10,
            height: 10,
        }
    }

    #[test]
    fn test_merge_boundary_wins() {
        let level_grid = vec![1, 2, 3, 4];
        let mask_grid = vec![0, 6, 6, 0];

        let composite = merge(&level_grid, &mask_grid, 2, 2, 6);
        assert_eq!(composite.levels, vec![1, 6, 6, 4]);
    }

    #[test]
    fn test_merge_empty_mask_is_identity() {
        let level_grid = vec![1, 2, 3, 4];
        let mask_grid = vec![0, 0, 0, 0];

        let composite = merge(&level_grid, &mask_grid, 2, 2, 6);
        assert_eq!(composite.levels, level_grid);
    }

    #[test]
    fn test_apply_marker_overwrites_single_cell() {
        // Grid over x 0..10, y 0..10, one unit per pixel.
        let transform = GeoTransform::north_up(0.0, 10.0, 1.0, 1.0);
        let grid = composite_10x10();

        // Geographic (7.5, 6.5) maps to col 7.5, row 3.5 -> cell (3, 7).
        let point = GeoPoint::new(7.5, 6.5);
        let (marked, cell) = apply_marker(&grid, &transform, &point).unwrap();

        assert_eq!(cell, MarkerCell { row: 3, col: 7 });
        assert_eq!(marked.get(7, 3), Some(0));

        // Only that one cell changed.
        let diffs = grid
            .levels
            .iter()
            .zip(&marked.levels)
            .filter(|(a, b)| a != b)
            .count();
        assert_eq!(diffs, 1);

        // The input grid is untouched.
        assert_ne!(grid.get(7, 3), Some(0));
    }

    #[test]
    fn test_apply_marker_is_idempotent() {
        let transform = GeoTransform::north_up(0.0, 10.0, 1.0, 1.0);
        let grid = composite_10x10();
        let point = GeoPoint::new(2.5, 2.5);

        let (once, _) = apply_marker(&grid, &transform, &point).unwrap();
        let (twice, _) = apply_marker(&once, &transform, &point).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn test_apply_marker_out_of_bounds() {
        let transform = GeoTransform::north_up(0.0, 10.0, 1.0, 1.0);
        let grid = composite_10x10();

        // y = 11 maps to row -1.
        let point = GeoPoint::new(5.0, 11.0);
        let err = apply_marker(&grid, &transform, &point).unwrap_err();
        assert!(matches!(
            err,
            GridError::MarkerOutOfBounds { row: -1, .. }
        ));
    }

    #[test]
    fn test_apply_marker_singular_transform() {
        let transform = GeoTransform::new(0.0, 0.0, 0.0, 0.0, 0.0, 0.0);
        let grid = composite_10x10();
        let err = apply_marker(&grid, &transform, &GeoPoint::new(1.0, 1.0)).unwrap_err();
        assert!(matches!(err, GridError::NonInvertibleTransform));
    }
}
