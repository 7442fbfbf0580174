use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// One identified lichen taxon at an observation.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct LichenSighting {
    pub id: i64,
    pub species_id: Option<i64>,
    pub observation_id: i64,
}
