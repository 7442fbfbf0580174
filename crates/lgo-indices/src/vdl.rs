//! Lichen Diversity Value (VDL).

use std::collections::BTreeMap;

use lgo_core::records::MergedQuadrant;

/// VDL per observation.
///
/// For each (observation, sighting) the mean `nb_lichen` over its quadrant
/// rows (one row per tree) is taken; the means are summed per observation
/// and divided by `divisor`. Rows without an observation or sighting are
/// ignored. Observations with no rows are absent and read as `0.0`.
#[must_use]
pub fn vdl_per_observation(merged: &[MergedQuadrant], divisor: f64) -> BTreeMap<i64, f64> {
    let mut per_sighting: BTreeMap<(i64, i64), (u64, u32)> = BTreeMap::new();
    for row in merged {
        let (Some(observation_id), Some(lichen_id)) = (row.observation_id, row.lichen_id) else {
            continue;
        };
        let entry = per_sighting.entry((observation_id, lichen_id)).or_default();
        entry.0 += u64::from(row.counts.total());
        entry.1 += 1;
    }

    let mut vdl: BTreeMap<i64, f64> = BTreeMap::new();
    for ((observation_id, _), (sum, rows)) in per_sighting {
        #[allow(clippy::cast_precision_loss)] // counts are bounded by 20 per row
        let mean = sum as f64 / f64::from(rows);
        *vdl.entry(observation_id).or_default() += mean;
    }
    for value in vdl.values_mut() {
        *value /= divisor;
    }
    vdl
}
