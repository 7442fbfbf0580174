use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::entities::EcologicalTraits;

/// A row of the ecology reference table, keyed by taxon name.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct EcologyRecord {
    pub name: String,
    #[serde(flatten)]
    pub traits: EcologicalTraits,
}
