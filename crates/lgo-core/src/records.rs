//! Derived record types produced by the index pipeline.
//!
//! Field names on the wire match the column names charts and exports have
//! always used (`nb_species`, `VDL`, `deg_toxitolerance_cat`, ...).

use chrono::NaiveDate;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::categories::{DegreeCategory, SpeciesCountCategory, VdlCategory};
use crate::degree::Degree;
use crate::entities::LichenSpecies;
use crate::enums::Thallus;
use crate::orientation::Orientation;

/// Lichen counts per orientation, with their total.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct OrientationCounts {
    #[serde(rename = "nb_lichen_N")]
    north: u32,
    #[serde(rename = "nb_lichen_E")]
    east: u32,
    #[serde(rename = "nb_lichen_S")]
    south: u32,
    #[serde(rename = "nb_lichen_O")]
    west: u32,
    #[serde(rename = "nb_lichen")]
    total: u32,
}

impl OrientationCounts {
    #[must_use]
    pub const fn new(north: u32, east: u32, south: u32, west: u32) -> Self {
        Self {
            north,
            east,
            south,
            west,
            total: north + east + south + west,
        }
    }

    #[must_use]
    pub const fn get(&self, orientation: Orientation) -> u32 {
        match orientation {
            Orientation::North => self.north,
            Orientation::East => self.east,
            Orientation::South => self.south,
            Orientation::West => self.west,
        }
    }

    #[must_use]
    pub const fn total(&self) -> u32 {
        self.total
    }

    /// Increment one orientation (and the total) by one.
    pub const fn record(&mut self, orientation: Orientation) {
        match orientation {
            Orientation::North => self.north += 1,
            Orientation::East => self.east += 1,
            Orientation::South => self.south += 1,
            Orientation::West => self.west += 1,
        }
        self.total += 1;
    }

    /// Accumulate another set of counts into this one.
    pub const fn add(&mut self, other: &Self) {
        self.north += other.north;
        self.east += other.east;
        self.south += other.south;
        self.west += other.west;
        self.total += other.total;
    }
}

/// Orientation counts of a single quadrant record.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct QuadrantCount {
    pub quadrant_id: i64,
    pub lichen_id: Option<i64>,
    pub tree_id: Option<i64>,
    #[serde(flatten)]
    pub counts: OrientationCounts,
}

/// A quadrant count joined with its sighting and observation.
///
/// Join misses are kept (left join) with `None` keys.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct MergedQuadrant {
    pub quadrant_id: i64,
    pub lichen_id: Option<i64>,
    pub tree_id: Option<i64>,
    pub species_id: Option<i64>,
    pub observation_id: Option<i64>,
    pub date: Option<NaiveDate>,
    pub user_id: Option<i64>,
    #[serde(flatten)]
    pub counts: OrientationCounts,
}

/// An observation with every per-observation index attached.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct ObservationSummary {
    pub observation_id: i64,
    pub date: NaiveDate,
    pub lat: f64,
    pub lon: f64,
    pub user_id: Option<i64>,
    pub nb_species: u32,
    pub nb_species_cat: SpeciesCountCategory,
    /// Total lichen counted over every quadrant of the observation.
    pub nb_lichen: u32,
    #[serde(rename = "VDL")]
    pub vdl: f64,
    #[serde(rename = "VDL_cat")]
    pub vdl_cat: VdlCategory,
    pub deg_toxitolerance: Degree,
    pub deg_toxitolerance_cat: Option<DegreeCategory>,
    pub deg_acidity: Degree,
    pub deg_acidity_cat: Option<DegreeCategory>,
    pub deg_eutrophication: Degree,
    pub deg_eutrophication_cat: Option<DegreeCategory>,
}

/// Orientation sums for one sighting, ranked within its observation.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct SightingCount {
    pub lichen_id: i64,
    pub observation_id: Option<i64>,
    pub species_id: Option<i64>,
    pub name: Option<String>,
    pub unique: bool,
    #[serde(flatten)]
    pub counts: OrientationCounts,
    /// `nb_lichen` over the maximum possible count on a full survey.
    pub nb_lichen_ratio: f64,
    /// Name made distinct within the observation for generic species.
    pub unique_name: Option<String>,
}

/// Number of sightings of one species across all observations.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct SpeciesCount {
    pub species_id: i64,
    pub name: String,
    pub count: u32,
}

/// Lichen totals for one thallus type at one observation.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ThallusSlice {
    pub observation_id: i64,
    pub thallus: Thallus,
    /// Sum of `nb_lichen` over the sightings with this thallus.
    pub nb_lichen: u32,
    /// Number of sightings with this thallus.
    pub nb_lichen_id: u32,
}

/// Whether a selected species was sighted at an observation.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct SpeciesPresence {
    pub observation_id: i64,
    pub date: NaiveDate,
    pub lat: f64,
    pub lon: f64,
    pub selected_species_present: bool,
}

/// Drill-down content for one observation.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct ObservationDetail {
    pub summary: ObservationSummary,
    pub sightings: Vec<SightingCount>,
    pub thallus: Vec<ThallusSlice>,
}

/// Species card content: reference data, sighting count, and presence map.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct SpeciesDetail {
    pub species: LichenSpecies,
    pub count: u32,
    pub presence: Vec<SpeciesPresence>,
}
