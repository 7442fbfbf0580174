//! Ratio-based pollution degrees.
//!
//! A degree is the share of lichen counts carried by species with a given
//! trait. When an observation has no counted lichen the ratio has no
//! denominator: that case is [`Degree::Undefined`], never `0.0` and never NaN.
//! It serializes as `null`.

use std::borrow::Cow;

use schemars::{JsonSchema, Schema, SchemaGenerator, json_schema};
use serde::{Deserialize, Serialize};

use crate::categories::DegreeCategory;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "Option<f64>", into = "Option<f64>")]
pub enum Degree {
    /// Ratio in `[0, 1]`.
    Value(f64),
    /// No lichen counted for the observation.
    Undefined,
}

impl Degree {
    /// Build a degree from trait-matching and total lichen counts.
    ///
    /// `numerator` is clamped to `denominator`, so the ratio never exceeds 1.
    #[must_use]
    pub fn ratio(numerator: u32, denominator: u32) -> Self {
        if denominator == 0 {
            return Self::Undefined;
        }
        Self::Value(f64::from(numerator.min(denominator)) / f64::from(denominator))
    }

    #[must_use]
    pub const fn value(self) -> Option<f64> {
        match self {
            Self::Value(value) => Some(value),
            Self::Undefined => None,
        }
    }

    /// Ratio expressed as a percentage.
    #[must_use]
    pub fn percent(self) -> Option<f64> {
        self.value().map(|value| value * 100.0)
    }

    #[must_use]
    pub fn category(self) -> Option<DegreeCategory> {
        self.value().map(DegreeCategory::from_ratio)
    }
}

impl From<Option<f64>> for Degree {
    fn from(value: Option<f64>) -> Self {
        match value {
            Some(value) if value.is_finite() => Self::Value(value),
            _ => Self::Undefined,
        }
    }
}

impl From<Degree> for Option<f64> {
    fn from(degree: Degree) -> Self {
        degree.value()
    }
}

impl JsonSchema for Degree {
    fn schema_name() -> Cow<'static, str> {
        "Degree".into()
    }

    fn json_schema(_generator: &mut SchemaGenerator) -> Schema {
        json_schema!({
            "type": ["number", "null"],
            "minimum": 0.0,
            "maximum": 1.0
        })
    }
}
