//! Ordinal categories for the bucketed indices.
//!
//! Each category type partitions the whole real line into four ranges, so
//! every value (including NaN and negatives) maps to exactly one bucket.
//!
//! ```text
//! nb_species : [0, 7) | [7, 10.5) | [10.5, 15) | [15, inf)     left-closed
//! VDL        : <= 25  | (25, 50]  | (50, 75]   | > 75          right-closed
//! degree     : <= .25 | (.25, .5] | (.5, .75]  | > .75         right-closed
//! ```

use std::fmt;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// SpeciesCountCategory
// ---------------------------------------------------------------------------

/// Bucket for species richness.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema,
)]
pub enum SpeciesCountCategory {
    #[serde(rename = "< 7")]
    Under7,
    #[serde(rename = "7 - 10")]
    From7To10,
    #[serde(rename = "11 - 14")]
    From11To14,
    #[serde(rename = "> 14")]
    Over14,
}

impl SpeciesCountCategory {
    pub const ALL: [Self; 4] = [Self::Under7, Self::From7To10, Self::From11To14, Self::Over14];

    #[must_use]
    pub fn from_count(count: u32) -> Self {
        let value = f64::from(count);
        if value < 7.0 {
            Self::Under7
        } else if value < 10.5 {
            Self::From7To10
        } else if value < 15.0 {
            Self::From11To14
        } else {
            Self::Over14
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Under7 => "< 7",
            Self::From7To10 => "7 - 10",
            Self::From11To14 => "11 - 14",
            Self::Over14 => "> 14",
        }
    }
}

impl fmt::Display for SpeciesCountCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// VdlCategory
// ---------------------------------------------------------------------------

/// Bucket for the Lichen Diversity Value.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema,
)]
pub enum VdlCategory {
    #[serde(rename = "< 25")]
    Under25,
    #[serde(rename = "25 - 50")]
    From25To50,
    #[serde(rename = "50 - 75")]
    From50To75,
    #[serde(rename = "> 75")]
    Over75,
}

impl VdlCategory {
    pub const ALL: [Self; 4] = [Self::Under25, Self::From25To50, Self::From50To75, Self::Over75];

    /// Bucket a VDL value. NaN falls in the lowest bucket.
    #[must_use]
    pub fn from_value(value: f64) -> Self {
        if value.is_nan() || value <= 25.0 {
            Self::Under25
        } else if value <= 50.0 {
            Self::From25To50
        } else if value <= 75.0 {
            Self::From50To75
        } else {
            Self::Over75
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Under25 => "< 25",
            Self::From25To50 => "25 - 50",
            Self::From50To75 => "50 - 75",
            Self::Over75 => "> 75",
        }
    }
}

impl fmt::Display for VdlCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// DegreeCategory
// ---------------------------------------------------------------------------

/// Bucket for a pollution degree ratio.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema,
)]
pub enum DegreeCategory {
    #[serde(rename = "0 - 25%")]
    UpTo25,
    #[serde(rename = "25 - 50%")]
    From25To50,
    #[serde(rename = "50 - 75%")]
    From50To75,
    #[serde(rename = "75 - 100%")]
    From75To100,
}

impl DegreeCategory {
    pub const ALL: [Self; 4] = [
        Self::UpTo25,
        Self::From25To50,
        Self::From50To75,
        Self::From75To100,
    ];

    /// Bucket a ratio in `[0, 1]`. NaN falls in the lowest bucket.
    #[must_use]
    pub fn from_ratio(ratio: f64) -> Self {
        if ratio.is_nan() || ratio <= 0.25 {
            Self::UpTo25
        } else if ratio <= 0.5 {
            Self::From25To50
        } else if ratio <= 0.75 {
            Self::From50To75
        } else {
            Self::From75To100
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::UpTo25 => "0 - 25%",
            Self::From25To50 => "25 - 50%",
            Self::From50To75 => "50 - 75%",
            Self::From75To100 => "75 - 100%",
        }
    }
}

impl fmt::Display for DegreeCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
