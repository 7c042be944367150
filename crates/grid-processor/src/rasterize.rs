//! Boundary polygon scan conversion.

use ntl_common::{BoundaryPolygon, GeoTransform};

/// Burn a boundary geometry into a mask aligned with the cropped grid.
///
/// Cells whose center falls inside the geometry receive `sentinel`
/// (strictly greater than any quantization level); all other cells
/// receive 0.
pub fn rasterize_boundary(
    boundary: &BoundaryPolygon,
    width: usize,
    height: usize,
    transform: &GeoTransform,
    sentinel: u8,
) -> Vec<u8> {
    let mut mask = vec![0u8; width * height];

    for row in 0..height {
        for col in 0..width {
            let center = transform.pixel_center(col, row);
            if boundary.contains(center.x, center.y) {
                mask[row * width + col] = sentinel;
            }
        }
    }

    mask
}
