//! Common geospatial types shared across the ntl-map crates.

pub mod bbox;
pub mod geometry;
pub mod transform;

pub use bbox::BoundingBox;
pub use geometry::{BoundaryPolygon, Ring};
pub use transform::{GeoPoint, GeoTransform, PixelLocation};
