//! Species and thallus aggregates.

use std::collections::{BTreeMap, HashMap};

use lgo_core::entities::{LichenSighting, LichenSpecies};
use lgo_core::enums::Thallus;
use lgo_core::records::{
    OrientationCounts, QuadrantCount, SightingCount, SpeciesCount, ThallusSlice,
};

/// Trees sampled x quadrants per tree x orientations: the largest possible
/// `nb_lichen` for one sighting.
pub const MAX_LICHEN_PER_SIGHTING: u32 = 3 * 5 * 4;

/// Sightings per species across all observations.
///
/// Sorted by count descending, then species id. Sightings whose species id
/// is unknown are left out.
#[must_use]
pub fn count_per_species(
    sightings: &[LichenSighting],
    species: &[LichenSpecies],
) -> Vec<SpeciesCount> {
    let names: HashMap<i64, &str> = species.iter().map(|s| (s.id, s.name.as_str())).collect();

    let mut counts: BTreeMap<i64, u32> = BTreeMap::new();
    for species_id in sightings.iter().filter_map(|s| s.species_id) {
        *counts.entry(species_id).or_default() += 1;
    }

    let mut ranking: Vec<SpeciesCount> = counts
        .into_iter()
        .filter_map(|(species_id, count)| match names.get(&species_id) {
            Some(name) => Some(SpeciesCount {
                species_id,
                name: (*name).to_string(),
                count,
            }),
            None => {
                tracing::debug!(species_id, count, "sightings of unknown species dropped");
                None
            }
        })
        .collect();
    ranking.sort_by(|a, b| {
        b.count
            .cmp(&a.count)
            .then_with(|| a.species_id.cmp(&b.species_id))
    });
    ranking
}

/// Orientation sums per sighting, joined with sighting and species.
///
/// Sorted by observation then `nb_lichen` ascending (the order of the
/// per-observation bar chart), with names made distinct by
/// [`assign_unique_names`].
#[must_use]
pub fn count_per_sighting(
    counts: &[QuadrantCount],
    sightings: &[LichenSighting],
    species: &[LichenSpecies],
) -> Vec<SightingCount> {
    let sightings_by_id: HashMap<i64, &LichenSighting> =
        sightings.iter().map(|s| (s.id, s)).collect();
    let species_by_id: HashMap<i64, &LichenSpecies> = species.iter().map(|s| (s.id, s)).collect();

    let mut sums: BTreeMap<i64, OrientationCounts> = BTreeMap::new();
    for count in counts {
        if let Some(lichen_id) = count.lichen_id {
            sums.entry(lichen_id).or_default().add(&count.counts);
        }
    }

    let mut rows: Vec<SightingCount> = sums
        .into_iter()
        .map(|(lichen_id, counts)| {
            let sighting = sightings_by_id.get(&lichen_id);
            let species_id = sighting.and_then(|s| s.species_id);
            let species = species_id.and_then(|id| species_by_id.get(&id));
            SightingCount {
                lichen_id,
                observation_id: sighting.map(|s| s.observation_id),
                species_id,
                name: species.map(|s| s.name.clone()),
                unique: species.is_none_or(|s| s.unique),
                counts,
                nb_lichen_ratio: f64::from(counts.total()) / f64::from(MAX_LICHEN_PER_SIGHTING),
                unique_name: None,
            }
        })
        .collect();

    rows.sort_by(|a, b| {
        a.observation_id
            .cmp(&b.observation_id)
            .then_with(|| a.counts.total().cmp(&b.counts.total()))
            .then_with(|| a.lichen_id.cmp(&b.lichen_id))
    });
    assign_unique_names(&mut rows);
    rows
}

/// Give generic species a per-observation rank suffix.
///
/// Within each (observation, name) group of non-unique sightings, the one
/// with the most lichen becomes `"<name> 1"`, the next `"<name> 2"`, and so
/// on (ties broken by sighting id). Unique species keep their name.
pub fn assign_unique_names(rows: &mut [SightingCount]) {
    let mut groups: HashMap<(Option<i64>, String), Vec<usize>> = HashMap::new();
    for (index, row) in rows.iter_mut().enumerate() {
        match (&row.name, row.unique) {
            (Some(name), false) => groups
                .entry((row.observation_id, name.clone()))
                .or_default()
                .push(index),
            _ => row.unique_name.clone_from(&row.name),
        }
    }

    for ((_, name), mut members) in groups {
        members.sort_by(|&a, &b| {
            rows[b]
                .counts
                .total()
                .cmp(&rows[a].counts.total())
                .then_with(|| rows[a].lichen_id.cmp(&rows[b].lichen_id))
        });
        for (rank, index) in members.into_iter().enumerate() {
            rows[index].unique_name = Some(format!("{name} {}", rank + 1));
        }
    }
}

/// Lichen totals per (observation, thallus).
///
/// Species without a thallus, and sightings without an observation, are
/// skipped. Sorted by observation then thallus.
#[must_use]
pub fn group_by_thallus(
    sighting_counts: &[SightingCount],
    species: &[LichenSpecies],
) -> Vec<ThallusSlice> {
    let thallus_by_id: HashMap<i64, &Thallus> = species
        .iter()
        .filter_map(|s| s.traits.thallus.as_ref().map(|t| (s.id, t)))
        .collect();

    let mut slices: BTreeMap<(i64, Thallus), (u32, u32)> = BTreeMap::new();
    for row in sighting_counts {
        let (Some(observation_id), Some(species_id)) = (row.observation_id, row.species_id) else {
            continue;
        };
        let Some(thallus) = thallus_by_id.get(&species_id) else {
            continue;
        };
        let entry = slices
            .entry((observation_id, (*thallus).clone()))
            .or_default();
        entry.0 += row.counts.total();
        entry.1 += 1;
    }

    slices
        .into_iter()
        .map(|((observation_id, thallus), (nb_lichen, nb_lichen_id))| ThallusSlice {
            observation_id,
            thallus,
            nb_lichen,
            nb_lichen_id,
        })
        .collect()
}

/// Sighting counts pivoted by observation then species.
#[must_use]
pub fn count_per_species_per_observation(
    sightings: &[LichenSighting],
) -> BTreeMap<i64, BTreeMap<i64, u32>> {
    let mut pivot: BTreeMap<i64, BTreeMap<i64, u32>> = BTreeMap::new();
    for sighting in sightings {
        let Some(species_id) = sighting.species_id else {
            continue;
        };
        *pivot
            .entry(sighting.observation_id)
            .or_default()
            .entry(species_id)
            .or_default() += 1;
    }
    pivot
}
