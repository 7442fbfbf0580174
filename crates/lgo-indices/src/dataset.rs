//! The dataset: every derived table of one snapshot, with read accessors.
//!
//! A [`Dataset`] is built once per snapshot and never mutated, so it can be
//! shared behind an `Arc` by the cache and every consumer.

use std::collections::{BTreeMap, HashSet};

use chrono::NaiveDate;
use lgo_config::IndicesConfig;
use lgo_core::categories::{SpeciesCountCategory, VdlCategory};
use lgo_core::entities::{LichenSpecies, Observation, Snapshot};
use lgo_core::enums::Language;
use lgo_core::records::{
    MergedQuadrant, ObservationDetail, ObservationSummary, SightingCount, SpeciesCount,
    SpeciesDetail, SpeciesPresence, ThallusSlice,
};
use serde::Serialize;

use crate::degrees::{ObservationDegrees, pollution_degrees};
use crate::error::IndexError;
use crate::{aggregates, merge, orientation, richness, vdl};

/// Parameters of the index pipeline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IndexSettings {
    pub vdl_divisor: f64,
    pub click_tolerance: f64,
}

impl Default for IndexSettings {
    fn default() -> Self {
        Self::from(&IndicesConfig::default())
    }
}

impl From<&IndicesConfig> for IndexSettings {
    fn from(config: &IndicesConfig) -> Self {
        Self {
            vdl_divisor: config.vdl_divisor,
            click_tolerance: config.click_tolerance,
        }
    }
}

impl IndexSettings {
    fn validate(&self) -> Result<(), IndexError> {
        if !self.vdl_divisor.is_finite() || self.vdl_divisor <= 0.0 {
            return Err(IndexError::InvalidSettings(format!(
                "VDL divisor must be positive, got {}",
                self.vdl_divisor
            )));
        }
        Ok(())
    }
}

/// Observation filter; unset bounds match everything.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ObservationFilter {
    /// Inclusive lower date bound.
    pub from: Option<NaiveDate>,
    /// Inclusive upper date bound.
    pub to: Option<NaiveDate>,
    pub user_id: Option<i64>,
}

impl ObservationFilter {
    #[must_use]
    pub fn matches(&self, summary: &ObservationSummary) -> bool {
        self.from.is_none_or(|from| summary.date >= from)
            && self.to.is_none_or(|to| summary.date <= to)
            && self.user_id.is_none_or(|user| summary.user_id == Some(user))
    }
}

/// One entry of the species selector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SpeciesOption {
    pub species_id: i64,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    snapshot: Snapshot,
    merged: Vec<MergedQuadrant>,
    summaries: Vec<ObservationSummary>,
    sighting_counts: Vec<SightingCount>,
    species_counts: Vec<SpeciesCount>,
    thallus: Vec<ThallusSlice>,
    pivot: BTreeMap<i64, BTreeMap<i64, u32>>,
}

impl Dataset {
    /// Run the whole pipeline over `snapshot`.
    ///
    /// # Errors
    ///
    /// Returns [`IndexError::InvalidSettings`] for a non-positive VDL divisor.
    pub fn build(snapshot: Snapshot, settings: &IndexSettings) -> Result<Self, IndexError> {
        settings.validate()?;

        let counts = orientation::count_all(&snapshot.quadrants);
        let merged = merge::merge_quadrants(&counts, &snapshot.sightings, &snapshot.observations);
        tracing::debug!(quadrants = counts.len(), "orientation counts merged");

        let richness = richness::species_richness(
            &snapshot.sightings,
            &snapshot.species,
            &snapshot.observations,
        );
        let vdl = vdl::vdl_per_observation(&merged, settings.vdl_divisor);
        let degrees = pollution_degrees(&merged, &snapshot.species);

        let mut summaries: Vec<ObservationSummary> = snapshot
            .observations
            .iter()
            .map(|obs| {
                let nb_species = richness.get(&obs.id).copied().unwrap_or(0);
                let vdl = vdl.get(&obs.id).copied().unwrap_or(0.0);
                let degrees = degrees.get(&obs.id).copied().unwrap_or_default();
                summarize(obs, nb_species, vdl, &degrees)
            })
            .collect();
        summaries.sort_by_key(|s| s.observation_id);

        let sighting_counts =
            aggregates::count_per_sighting(&counts, &snapshot.sightings, &snapshot.species);
        let species_counts = aggregates::count_per_species(&snapshot.sightings, &snapshot.species);
        let thallus = aggregates::group_by_thallus(&sighting_counts, &snapshot.species);
        let pivot = aggregates::count_per_species_per_observation(&snapshot.sightings);

        tracing::debug!(
            observations = summaries.len(),
            sightings = sighting_counts.len(),
            species = species_counts.len(),
            "dataset built"
        );

        Ok(Self {
            snapshot,
            merged,
            summaries,
            sighting_counts,
            species_counts,
            thallus,
            pivot,
        })
    }

    /// Observation summaries, sorted by id.
    #[must_use]
    pub fn observations(&self) -> &[ObservationSummary] {
        &self.summaries
    }

    #[must_use]
    pub fn filter(&self, filter: &ObservationFilter) -> Vec<&ObservationSummary> {
        self.summaries.iter().filter(|s| filter.matches(s)).collect()
    }

    /// Observations dated within `[start, end]`.
    #[must_use]
    pub fn filter_by_date(&self, start: NaiveDate, end: NaiveDate) -> Vec<&ObservationSummary> {
        self.filter(&ObservationFilter {
            from: Some(start),
            to: Some(end),
            user_id: None,
        })
    }

    #[must_use]
    pub fn filter_by_user(&self, user_id: i64) -> Vec<&ObservationSummary> {
        self.filter(&ObservationFilter {
            user_id: Some(user_id),
            ..ObservationFilter::default()
        })
    }

    /// The observation nearest to a map click, if one lies within
    /// `tolerance` degrees on both axes. Ties go to the lowest id.
    #[must_use]
    pub fn observation_at(&self, lat: f64, lon: f64, tolerance: f64) -> Option<&ObservationSummary> {
        self.summaries
            .iter()
            .filter(|s| (s.lat - lat).abs() <= tolerance && (s.lon - lon).abs() <= tolerance)
            .min_by(|a, b| {
                let da = (a.lat - lat).hypot(a.lon - lon);
                let db = (b.lat - lat).hypot(b.lon - lon);
                da.total_cmp(&db)
                    .then_with(|| a.observation_id.cmp(&b.observation_id))
            })
    }

    /// Summary, per-sighting ranking and thallus slices of one observation.
    #[must_use]
    pub fn drill_down(&self, observation_id: i64) -> Option<ObservationDetail> {
        let summary = self
            .summaries
            .iter()
            .find(|s| s.observation_id == observation_id)?;
        Some(ObservationDetail {
            summary: summary.clone(),
            sightings: self
                .sighting_counts
                .iter()
                .filter(|s| s.observation_id == Some(observation_id))
                .cloned()
                .collect(),
            thallus: self
                .thallus
                .iter()
                .filter(|t| t.observation_id == observation_id)
                .cloned()
                .collect(),
        })
    }

    /// Sightings per species, most sighted first.
    #[must_use]
    pub fn species_ranking(&self) -> &[SpeciesCount] {
        &self.species_counts
    }

    /// Every observation flagged with whether `species_id` was sighted there.
    #[must_use]
    pub fn species_presence(&self, species_id: i64) -> Vec<SpeciesPresence> {
        let present: HashSet<i64> = self
            .snapshot
            .sightings
            .iter()
            .filter(|s| s.species_id == Some(species_id))
            .map(|s| s.observation_id)
            .collect();

        self.summaries
            .iter()
            .map(|s| SpeciesPresence {
                observation_id: s.observation_id,
                date: s.date,
                lat: s.lat,
                lon: s.lon,
                selected_species_present: present.contains(&s.observation_id),
            })
            .collect()
    }

    /// Species card: reference data, sighting count and presence map.
    #[must_use]
    pub fn species_detail(&self, species_id: i64) -> Option<SpeciesDetail> {
        let species = self.species(species_id)?;
        let count = self
            .species_counts
            .iter()
            .find(|c| c.species_id == species_id)
            .map_or(0, |c| c.count);
        Some(SpeciesDetail {
            species: species.clone(),
            count,
            presence: self.species_presence(species_id),
        })
    }

    /// Species selector entries, sorted by localized name then id.
    #[must_use]
    pub fn species_options(&self, lang: Language) -> Vec<SpeciesOption> {
        let mut options: Vec<SpeciesOption> = self
            .snapshot
            .species
            .iter()
            .map(|s| SpeciesOption {
                species_id: s.id,
                name: s.display_name(lang).to_string(),
            })
            .collect();
        options.sort_by(|a, b| a.name.cmp(&b.name).then(a.species_id.cmp(&b.species_id)));
        options
    }

    /// Earliest and latest observation dates.
    #[must_use]
    pub fn date_bounds(&self) -> Option<(NaiveDate, NaiveDate)> {
        let min = self.summaries.iter().map(|s| s.date).min()?;
        let max = self.summaries.iter().map(|s| s.date).max()?;
        Some((min, max))
    }

    #[must_use]
    pub fn species(&self, species_id: i64) -> Option<&LichenSpecies> {
        self.snapshot.species.iter().find(|s| s.id == species_id)
    }

    #[must_use]
    pub fn sighting_counts(&self) -> &[SightingCount] {
        &self.sighting_counts
    }

    #[must_use]
    pub fn thallus_slices(&self) -> &[ThallusSlice] {
        &self.thallus
    }

    #[must_use]
    pub fn merged_quadrants(&self) -> &[MergedQuadrant] {
        &self.merged
    }

    /// Sighting counts per observation, then per species.
    #[must_use]
    pub const fn species_pivot(&self) -> &BTreeMap<i64, BTreeMap<i64, u32>> {
        &self.pivot
    }

    /// Species that found no ecology row when the snapshot was read.
    #[must_use]
    pub fn missing_ecology(&self) -> &[String] {
        &self.snapshot.missing_ecology
    }

    #[must_use]
    pub const fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }
}

fn summarize(
    obs: &Observation,
    nb_species: u32,
    vdl: f64,
    degrees: &ObservationDegrees,
) -> ObservationSummary {
    ObservationSummary {
        observation_id: obs.id,
        date: obs.date,
        lat: obs.lat,
        lon: obs.lon,
        user_id: obs.user_id,
        nb_species,
        nb_species_cat: SpeciesCountCategory::from_count(nb_species),
        nb_lichen: degrees.nb_lichen,
        vdl,
        vdl_cat: VdlCategory::from_value(vdl),
        deg_toxitolerance: degrees.toxitolerance,
        deg_toxitolerance_cat: degrees.toxitolerance.category(),
        deg_acidity: degrees.acidity,
        deg_acidity_cat: degrees.acidity.category(),
        deg_eutrophication: degrees.eutrophication,
        deg_eutrophication_cat: degrees.eutrophication.category(),
    }
}
