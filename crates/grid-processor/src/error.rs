//! Error types for grid processing.

use thiserror::Error;

/// Errors that can occur during grid processing.
#[derive(Error, Debug)]
pub enum GridError {
    /// The boundary bounding box does not intersect the raster extent.
    #[error("boundary bbox {bbox} does not intersect raster extent {extent}")]
    EmptyCrop { bbox: String, extent: String },

    /// Valid-pixel minimum equals maximum (or no valid pixels remain);
    /// quantization is undefined.
    #[error("degenerate intensity range (min {min}, max {max}): quantization undefined")]
    DegenerateRange { min: f32, max: f32 },

    /// The marker coordinate maps outside the cropped grid.
    #[error("marker cell (row {row}, col {col}) is outside the {height}x{width} grid")]
    MarkerOutOfBounds {
        row: i64,
        col: i64,
        width: usize,
        height: usize,
    },

    /// The affine transform cannot be inverted.
    #[error("pixel transform is not invertible")]
    NonInvertibleTransform,
}

impl GridError {
    /// Create an EmptyCrop error.
    pub fn empty_crop(bbox: impl Into<String>, extent: impl Into<String>) -> Self {
        Self::EmptyCrop {
            bbox: bbox.into(),
            extent: extent.into(),
        }
    }
}

/// Result type for grid processor operations.
pub type Result<T> = std::result::Result<T, GridError>;
