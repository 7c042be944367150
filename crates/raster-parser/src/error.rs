//! Error types for raster container parsing.

use thiserror::Error;

/// Result type for raster parser operations.
pub type RasterResult<T> = Result<T, RasterError>;

/// Error types for raster container parsing.
#[derive(Error, Debug)]
pub enum RasterError {
    /// The container exposes no gridded subdataset at all.
    #[error("no subdatasets in raster container: {0}")]
    MissingSubdataset(String),

    /// Missing required variable or attribute
    #[error("missing required data: {0}")]
    MissingData(String),

    /// Invalid data format
    #[error("invalid data format: {0}")]
    InvalidFormat(String),
}
