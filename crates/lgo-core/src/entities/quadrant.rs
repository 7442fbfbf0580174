use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::orientation::{OrientationSet, SQUARES_PER_GRID};

/// One sampling-grid measurement: where a given lichen was seen on a given tree.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct QuadrantRecord {
    pub id: i64,
    pub lichen_id: Option<i64>,
    pub tree_id: Option<i64>,
    pub squares: [OrientationSet; SQUARES_PER_GRID],
}
