//! Grid processing for the nighttime-light map pipeline.
//!
//! Implements the stages between the raster parser and the renderer:
//! - Cropping a granule to a boundary bounding box
//! - Quantizing intensities into discrete levels
//! - Rasterizing the boundary polygon into a mask
//! - Compositing levels, mask and the optional marker

pub mod composite;
pub mod crop;
pub mod error;
pub mod quantize;
pub mod rasterize;

pub use composite::{apply_marker, merge, CompositeGrid, MarkerCell};
pub use crop::{crop_to_bbox, CroppedGrid};
pub use error::{GridError, Result};
pub use quantize::{compute_levels, digitize, LevelSet};
pub use rasterize::rasterize_boundary;
