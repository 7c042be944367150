//! Geographic bounding boxes in the raster's reference frame.

use serde::{Deserialize, Serialize};

use crate::transform::GeoPoint;

/// The axis-aligned extent of a boundary or a granule tile.
///
/// Boundary definitions carry their extent as a GeoJSON `bbox` member
/// and the granule derives its own from the bounding-coordinate
/// attributes; the crop window is where the two meet.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl BoundingBox {
    pub fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    /// Build from a GeoJSON `bbox` member: `[min_x, min_y, max_x, max_y]`.
    pub fn from_geojson(bbox: [f64; 4]) -> Self {
        let [min_x, min_y, max_x, max_y] = bbox;
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    /// Extent along the x axis.
    pub fn span_x(&self) -> f64 {
        self.max_x - self.min_x
    }

    /// Extent along the y axis.
    pub fn span_y(&self) -> f64 {
        self.max_y - self.min_y
    }

    /// The four corner points, counter-clockwise from the lower-left.
    ///
    /// The crop window runs every corner through the inverse transform,
    /// which keeps the window correct for any invertible affine, not
    /// just north-up grids.
    pub fn corners(&self) -> [GeoPoint; 4] {
        [
            GeoPoint::new(self.min_x, self.min_y),
            GeoPoint::new(self.max_x, self.min_y),
            GeoPoint::new(self.max_x, self.max_y),
            GeoPoint::new(self.min_x, self.max_y),
        ]
    }

    /// The overlap of two boxes, or `None` when they share no interior.
    pub fn intersection(&self, other: &BoundingBox) -> Option<BoundingBox> {
        let clipped = BoundingBox {
            min_x: self.min_x.max(other.min_x),
            min_y: self.min_y.max(other.min_y),
            max_x: self.max_x.min(other.max_x),
            max_y: self.max_y.min(other.max_y),
        };
        (clipped.min_x < clipped.max_x && clipped.min_y < clipped.max_y).then_some(clipped)
    }

    /// Whether a point sits on or inside the box.
    pub fn contains(&self, point: GeoPoint) -> bool {
        (self.min_x..=self.max_x).contains(&point.x) && (self.min_y..=self.max_y).contains(&point.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Roughly the h19v03 tile that covers Berlin.
    fn tile() -> BoundingBox {
        BoundingBox::new(10.0, 50.0, 20.0, 60.0)
    }

    #[test]
    fn test_from_geojson_member() {
        let bbox = BoundingBox::from_geojson([13.088, 52.338, 13.761, 52.675]);
        assert_eq!(bbox.min_x, 13.088);
        assert_eq!(bbox.max_y, 52.675);
        assert!((bbox.span_x() - 0.673).abs() < 1e-12);
        assert!((bbox.span_y() - 0.337).abs() < 1e-12);
    }

    #[test]
    fn test_intersection_clips_to_overlap() {
        // A boundary fully inside the tile comes back unchanged.
        let berlin = BoundingBox::from_geojson([13.088, 52.338, 13.761, 52.675]);
        assert_eq!(tile().intersection(&berlin), Some(berlin));

        // One straddling the tile edge is clipped to it.
        let straddling = BoundingBox::new(19.0, 59.0, 21.0, 61.0);
        let clipped = tile().intersection(&straddling).unwrap();
        assert_eq!(clipped, BoundingBox::new(19.0, 59.0, 20.0, 60.0));
    }

    #[test]
    fn test_disjoint_boxes_have_no_intersection() {
        let other_tile = BoundingBox::new(30.0, 50.0, 40.0, 60.0);
        assert!(tile().intersection(&other_tile).is_none());

        // Touching edges share no interior.
        let adjacent = BoundingBox::new(20.0, 50.0, 30.0, 60.0);
        assert!(tile().intersection(&adjacent).is_none());
    }

    #[test]
    fn test_contains_includes_the_edges() {
        let bbox = tile();
        assert!(bbox.contains(GeoPoint::new(13.4, 52.5)));
        assert!(bbox.contains(GeoPoint::new(10.0, 50.0)));
        assert!(!bbox.contains(GeoPoint::new(9.9, 52.5)));
        assert!(!bbox.contains(GeoPoint::new(13.4, 60.1)));
    }

    #[test]
    fn test_corners_wind_counter_clockwise() {
        let corners = tile().corners();
        assert_eq!(corners[0], GeoPoint::new(10.0, 50.0));
        assert_eq!(corners[1], GeoPoint::new(20.0, 50.0));
        assert_eq!(corners[2], GeoPoint::new(20.0, 60.0));
        assert_eq!(corners[3], GeoPoint::new(10.0, 60.0));
    }
}
