//! Table merger: quadrant counts joined to sightings and observations.

use std::collections::HashMap;

use lgo_core::entities::{LichenSighting, Observation};
use lgo_core::records::{MergedQuadrant, QuadrantCount};

/// Left-join quadrant counts with sightings (on `lichen_id`), then with
/// observations (on `observation_id`).
///
/// Every count produces exactly one row; keys that find no match stay `None`.
#[must_use]
pub fn merge_quadrants(
    counts: &[QuadrantCount],
    sightings: &[LichenSighting],
    observations: &[Observation],
) -> Vec<MergedQuadrant> {
    let sightings_by_id: HashMap<i64, &LichenSighting> =
        sightings.iter().map(|s| (s.id, s)).collect();
    let observations_by_id: HashMap<i64, &Observation> =
        observations.iter().map(|o| (o.id, o)).collect();

    let mut unmatched = 0_usize;
    let merged: Vec<MergedQuadrant> = counts
        .iter()
        .map(|count| {
            let sighting = count
                .lichen_id
                .and_then(|id| sightings_by_id.get(&id).copied());
            let observation = sighting
                .and_then(|s| observations_by_id.get(&s.observation_id).copied());
            if observation.is_none() {
                unmatched += 1;
            }

            MergedQuadrant {
                quadrant_id: count.quadrant_id,
                lichen_id: count.lichen_id,
                tree_id: count.tree_id,
                species_id: sighting.and_then(|s| s.species_id),
                observation_id: observation.map(|o| o.id),
                date: observation.map(|o| o.date),
                user_id: observation.and_then(|o| o.user_id),
                counts: count.counts,
            }
        })
        .collect();

    if unmatched > 0 {
        tracing::debug!(unmatched, "quadrant rows without a matching observation");
    }
    merged
}
