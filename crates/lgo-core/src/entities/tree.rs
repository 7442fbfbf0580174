use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A sampled tree. Usually three per observation.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Tree {
    pub id: i64,
    pub observation_id: i64,
    pub species_name: Option<String>,
    pub circumference: Option<i32>,
}
