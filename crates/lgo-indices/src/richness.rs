//! Species richness per observation.

use std::collections::{BTreeMap, HashMap, HashSet};

use lgo_core::entities::{LichenSighting, LichenSpecies, Observation};

/// Number of distinct taxa sighted at each observation.
///
/// A `unique` species counts once however many times it was sighted. Each
/// sighting of a generic (non-unique) species, or of an unknown species,
/// counts as its own taxon. Every observation in `observations` gets an
/// entry, zero when nothing was sighted.
#[must_use]
pub fn species_richness(
    sightings: &[LichenSighting],
    species: &[LichenSpecies],
    observations: &[Observation],
) -> BTreeMap<i64, u32> {
    let unique_by_id: HashMap<i64, bool> = species.iter().map(|s| (s.id, s.unique)).collect();

    let mut seen: HashSet<(i64, i64)> = HashSet::new();
    let mut richness: BTreeMap<i64, u32> = observations.iter().map(|o| (o.id, 0)).collect();

    for sighting in sightings {
        let is_unique = sighting
            .species_id
            .and_then(|id| unique_by_id.get(&id).copied())
            .unwrap_or(false);

        let counts_as_new = match sighting.species_id {
            Some(species_id) if is_unique => seen.insert((sighting.observation_id, species_id)),
            _ => true,
        };
        if counts_as_new {
            *richness.entry(sighting.observation_id).or_default() += 1;
        }
    }
    richness
}
