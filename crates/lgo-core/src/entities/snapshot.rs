use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::entities::{LichenSighting, LichenSpecies, Observation, QuadrantRecord, Tree};

/// All survey tables as fetched from the store at one point in time.
///
/// A snapshot is immutable once built; derived indices are recomputed from
/// it on every refresh.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct Snapshot {
    pub observations: Vec<Observation>,
    pub trees: Vec<Tree>,
    pub sightings: Vec<LichenSighting>,
    pub species: Vec<LichenSpecies>,
    pub quadrants: Vec<QuadrantRecord>,
    /// Names of species with no matching row in the ecology reference table.
    pub missing_ecology: Vec<String>,
}
