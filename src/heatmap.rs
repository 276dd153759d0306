//! Body-map heatmap intensity bucketing
//!
//! Converts a readiness percentage into one of the discrete visual intensity
//! buckets used by the body-map rendering. One palette color is reserved as
//! the "no data" background, so a palette of size `N` yields usable buckets
//! `1..=N-1`; bucket 0 is never assigned.
//!
//! Muscles with status `no-data` never reach the mapper: they are filtered
//! out of the input set entirely rather than given a sentinel bucket.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::{FatigueStatus, MuscleFatigue};
use crate::readiness::{percent_from_score, ReadinessConfig};

/// Default body-map palette size (background color plus five intensities)
pub const DEFAULT_PALETTE_SIZE: usize = 6;

/// Errors from intensity mapping
#[derive(Debug, Error, PartialEq, Eq)]
pub enum HeatmapError {
    #[error("Palette too small: {0} (need at least one usable bucket)")]
    PaletteTooSmall(usize),
}

/// One muscle's heatmap assignment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeatmapCell {
    pub muscle_group: String,
    pub readiness_percent: u8,
    pub bucket: u8,
}

/// Map a readiness percentage to an intensity bucket in `[1, B]`
///
/// `B = palette_size - 1`. Full readiness lands in bucket 1 (the ceil of a
/// zero fatigue fraction clamps up, keeping bucket 0 reserved); zero
/// readiness lands in bucket `B`.
pub fn fatigue_to_intensity(readiness_percent: u8, palette_size: usize) -> Result<u8, HeatmapError> {
    if palette_size < 2 {
        return Err(HeatmapError::PaletteTooSmall(palette_size));
    }
    let buckets = (palette_size - 1) as u8;

    let fatigue_percent = 100u8.saturating_sub(readiness_percent.min(100));
    let bucket_size = 100.0 / buckets as f64;
    let bucket = (fatigue_percent as f64 / bucket_size).ceil() as u8;

    Ok(bucket.clamp(1, buckets))
}

/// Heatmap input filter: drop entries with no data before bucketing
pub fn heatmap_input(per_muscle: &[MuscleFatigue]) -> Vec<&MuscleFatigue> {
    per_muscle
        .iter()
        .filter(|m| m.status != FatigueStatus::NoData)
        .collect()
}

/// Bucket assignments for a classified snapshot
pub fn assign_buckets(
    per_muscle: &[MuscleFatigue],
    palette_size: usize,
    readiness: &ReadinessConfig,
) -> Result<Vec<HeatmapCell>, HeatmapError> {
    heatmap_input(per_muscle)
        .into_iter()
        .map(|muscle| {
            let percent = percent_from_score(muscle.fatigue_score, readiness);
            Ok(HeatmapCell {
                muscle_group: muscle.muscle_group.clone(),
                readiness_percent: percent,
                bucket: fatigue_to_intensity(percent, palette_size)?,
            })
        })
        .collect()
}
