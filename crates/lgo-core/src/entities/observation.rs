use chrono::NaiveDate;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// One field visit at a surveyed site.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct Observation {
    pub id: i64,
    pub date: NaiveDate,
    pub lat: f64,
    pub lon: f64,
    pub user_id: Option<i64>,
}
