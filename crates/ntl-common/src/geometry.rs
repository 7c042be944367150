//! Boundary polygon geometry.

use crate::{BoundingBox, GeoPoint};
use serde::{Deserialize, Serialize};

/// A linear ring of `[x, y]` coordinate pairs (GeoJSON layout).
pub type Ring = Vec<[f64; 2]>;

/// An administrative boundary: polygon rings plus the enclosing
/// bounding box, both in the raster's reference frame.
///
/// Rings from every part of a MultiPolygon are stored flat; the even-odd
/// rule counts crossings over all of them, so holes and disjoint parts
/// fall out of the same test.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoundaryPolygon {
    rings: Vec<Ring>,
    bbox: BoundingBox,
}

impl BoundaryPolygon {
    /// Create a boundary from its rings and bounding box.
    pub fn new(rings: Vec<Ring>, bbox: BoundingBox) -> Self {
        Self { rings, bbox }
    }

    /// The boundary's bounding box.
    pub fn bbox(&self) -> &BoundingBox {
        &self.bbox
    }

    /// The boundary's rings.
    pub fn rings(&self) -> &[Ring] {
        &self.rings
    }

    /// Even-odd point-in-polygon test.
    ///
    /// Casts a ray toward +x and counts edge crossings over every ring.
    pub fn contains(&self, x: f64, y: f64) -> bool {
        if !self.bbox.contains(GeoPoint::new(x, y)) {
            return false;
        }

        let mut inside = false;
        for ring in &self.rings {
            let n = ring.len();
            if n < 3 {
                continue;
            }
            let mut j = n - 1;
            for i in 0..n {
                let [xi, yi] = ring[i];
                let [xj, yj] = ring[j];
                if (yi > y) != (yj > y) && x < (xj - xi) * (y - yi) / (yj - yi) + xi {
                    inside = !inside;
                }
                j = i;
            }
        }
        inside
    }
}
