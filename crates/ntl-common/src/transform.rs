//! Affine pixel/geographic transforms.

use serde::{Deserialize, Serialize};

/// A geographic point in the raster's reference frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub x: f64,
    pub y: f64,
}

impl GeoPoint {
    /// Create a new geographic point.
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A fractional pixel position produced by an inverse transform lookup.
///
/// Row and column keep their fractional parts; truncation to integer
/// indices is the caller's decision.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PixelLocation {
    pub row: f64,
    pub col: f64,
}

/// A six-coefficient affine transform between pixel and geographic space.
///
/// Forward mapping (column/row to x/y):
///
/// ```text
/// x = a * col + b * row + c
/// y = d * col + e * row + f
/// ```
///
/// For the north-up lat/lon grids this pipeline consumes, `b` and `d`
/// are zero and `e` is negative (rows increase southward).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoTransform {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
    pub e: f64,
    pub f: f64,
}

impl GeoTransform {
    /// Create a transform from the six affine coefficients.
    pub fn new(a: f64, b: f64, c: f64, d: f64, e: f64, f: f64) -> Self {
        Self { a, b, c, d, e, f }
    }

    /// Create a north-up transform from the grid's upper-left corner and
    /// per-pixel resolution. `y_res` is the positive pixel height; rows
    /// step southward.
    pub fn north_up(west: f64, north: f64, x_res: f64, y_res: f64) -> Self {
        Self::new(x_res, 0.0, west, 0.0, -y_res, north)
    }

    /// Map a fractional (col, row) pixel position to geographic coordinates.
    pub fn apply(&self, col: f64, row: f64) -> GeoPoint {
        GeoPoint {
            x: self.a * col + self.b * row + self.c,
            y: self.d * col + self.e * row + self.f,
        }
    }

    /// Geographic coordinates of a cell's center.
    pub fn pixel_center(&self, col: usize, row: usize) -> GeoPoint {
        self.apply(col as f64 + 0.5, row as f64 + 0.5)
    }

    /// Compute the inverse transform (geographic to pixel), or `None`
    /// when the linear part is singular.
    pub fn invert(&self) -> Option<GeoTransform> {
        let det = self.a * self.e - self.b * self.d;
        if det.abs() < f64::EPSILON {
            return None;
        }

        let ia = self.e / det;
        let ib = -self.b / det;
        let id = -self.d / det;
        let ie = self.a / det;

        Some(GeoTransform {
            a: ia,
            b: ib,
            c: -(ia * self.c + ib * self.f),
            d: id,
            e: ie,
            f: -(id * self.c + ie * self.f),
        })
    }

    /// Map a geographic point to its fractional pixel position, or `None`
    /// when the transform is not invertible.
    pub fn locate(&self, point: &GeoPoint) -> Option<PixelLocation> {
        let inverse = self.invert()?;
        let col = inverse.a * point.x + inverse.b * point.y + inverse.c;
        let row = inverse.d * point.x + inverse.e * point.y + inverse.f;
        Some(PixelLocation { row, col })
    }

    /// Derive the transform for a sub-grid whose origin sits at
    /// (`col_off`, `row_off`) of this grid.
    pub fn window(&self, col_off: usize, row_off: usize) -> GeoTransform {
        let origin = self.apply(col_off as f64, row_off as f64);
        GeoTransform {
            c: origin.x,
            f: origin.y,
            ..*self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_north_up_apply() {
        let t = GeoTransform::north_up(13.0, 53.0, 0.25, 0.25);
        let p = t.apply(0.0, 0.0);
        assert_eq!(p.x, 13.0);
        assert_eq!(p.y, 53.0);

        let p = t.apply(2.0, 4.0);
        assert!((p.x - 13.5).abs() < 1e-12);
        assert!((p.y - 52.0).abs() < 1e-12);
    }

    #[test]
    fn test_roundtrip_within_one_pixel() {
        let t = GeoTransform::north_up(13.088, 52.675, 0.0041667, 0.0041667);

        for (col, row) in [(0usize, 0usize), (7, 3), (41, 80)] {
            let geo = t.apply(col as f64, row as f64);
            let loc = t.locate(&geo).unwrap();
            assert!((loc.col - col as f64).abs() < 1.0);
            assert!((loc.row - row as f64).abs() < 1.0);
        }
    }

    #[test]
    fn test_singular_transform_has_no_inverse() {
        let t = GeoTransform::new(0.0, 0.0, 13.0, 0.0, 0.0, 52.0);
        assert!(t.invert().is_none());
        assert!(t.locate(&GeoPoint::new(13.0, 52.0)).is_none());
    }

    #[test]
    fn test_window_shifts_origin() {
        let t = GeoTransform::north_up(10.0, 50.0, 0.5, 0.5);
        let w = t.window(4, 2);

        assert!((w.c - 12.0).abs() < 1e-12);
        assert!((w.f - 49.0).abs() < 1e-12);
        assert_eq!(w.a, t.a);
        assert_eq!(w.e, t.e);

        // Cell (0, 0) of the window is cell (4, 2) of the parent.
        let parent = t.apply(4.0, 2.0);
        let child = w.apply(0.0, 0.0);
        assert_eq!(parent, child);
    }

    #[test]
    fn test_pixel_center() {
        let t = GeoTransform::north_up(0.0, 10.0, 1.0, 1.0);
        let c = t.pixel_center(0, 0);
        assert!((c.x - 0.5).abs() < 1e-12);
        assert!((c.y - 9.5).abs() < 1e-12);
    }
}
