//! Intensity quantization into discrete levels.

use tracing::debug;

use crate::error::{GridError, Result};

/// An ordered set of intensity thresholds.
///
/// Immutable once computed; length equals the number of quantization
/// bins. Thresholds sit on whole radiance values, so on low
/// dynamic-range data adjacent entries can land on the same number,
/// merging their buckets.
#[derive(Debug, Clone, PartialEq)]
pub struct LevelSet {
    thresholds: Vec<f32>,
}

impl LevelSet {
    /// The threshold values.
    pub fn thresholds(&self) -> &[f32] {
        &self.thresholds
    }

    /// Number of thresholds.
    pub fn len(&self) -> usize {
        self.thresholds.len()
    }

    /// Whether the set holds no thresholds.
    pub fn is_empty(&self) -> bool {
        self.thresholds.is_empty()
    }
}

/// Compute `bins` evenly spaced thresholds from the valid value range.
///
/// Cells equal to `nodata` are excluded before taking min/max. The
/// thresholds span `[min, max)` with step `(max - min) / bins`, each
/// truncated toward zero so bucket boundaries sit on whole radiance
/// values; the maximum value always lands in the top bin. When the
/// valid span is narrower than the bin count the truncated thresholds
/// repeat and the affected buckets merge.
///
/// # Errors
///
/// [`GridError::DegenerateRange`] when no valid cells remain or the
/// valid minimum equals the maximum. The division below is never reached
/// in that case; the condition is reported, not computed through.
pub fn compute_levels(data: &[f32], nodata: f32, bins: usize) -> Result<LevelSet> {
    let mut min = f32::INFINITY;
    let mut max = f32::NEG_INFINITY;
    let mut valid = 0usize;

    for &value in data {
        if value == nodata {
            continue;
        }
        min = min.min(value);
        max = max.max(value);
        valid += 1;
    }

    if valid == 0 || min >= max {
        return Err(GridError::DegenerateRange {
            min: if valid == 0 { f32::NAN } else { min },
            max: if valid == 0 { f32::NAN } else { max },
        });
    }

    let step = (max - min) / bins as f32;
    let thresholds = (0..bins).map(|i| (min + step * i as f32).trunc()).collect();

    debug!(?thresholds, valid, "computed quantization thresholds");

    Ok(LevelSet { thresholds })
}

/// Assign each cell the count of thresholds less than or equal to its
/// value (right-open interval binning).
///
/// A value below the first threshold maps to level 0; a value at or
/// above the last threshold maps to the bin count. Ties on a threshold
/// count on the greater-or-equal side for every threshold, and a
/// repeated threshold counts once per occurrence, so merged buckets
/// skip the levels in between.
pub fn digitize(data: &[f32], levels: &LevelSet) -> Vec<u8> {
    data.iter()
        .map(|&value| levels.thresholds.partition_point(|&t| t <= value) as u8)
        .collect()
}
