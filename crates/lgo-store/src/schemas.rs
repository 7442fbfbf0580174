//! `DuckDB` table DDL for the survey store.
//!
//! Squares are kept as raw text: the historical encodings are folded into
//! `OrientationSet` only when a snapshot is read.

/// Survey visits.
pub const CREATE_OBSERVATIONS: &str = "
CREATE TABLE IF NOT EXISTS observations (
    id BIGINT PRIMARY KEY,
    date DATE NOT NULL,
    lat DOUBLE NOT NULL,
    lon DOUBLE NOT NULL,
    user_id BIGINT
);
";

/// Sampled trees.
pub const CREATE_TREES: &str = "
CREATE TABLE IF NOT EXISTS trees (
    id BIGINT PRIMARY KEY,
    observation_id BIGINT NOT NULL,
    species_name TEXT,
    circumference INTEGER
);
";

/// Lichen sightings (one identified taxon at one observation).
pub const CREATE_LICHENS: &str = "
CREATE TABLE IF NOT EXISTS lichens (
    id BIGINT PRIMARY KEY,
    species_id BIGINT,
    observation_id BIGINT NOT NULL
);
";

/// Lichen species reference. `unique` is a keyword and stays quoted.
pub const CREATE_LICHEN_SPECIES: &str = r#"
CREATE TABLE IF NOT EXISTS lichen_species (
    id BIGINT PRIMARY KEY,
    name TEXT NOT NULL,
    name_en TEXT,
    name_fr TEXT,
    "unique" BOOLEAN NOT NULL DEFAULT TRUE
);
"#;

/// Quadrant grids: five raw squares per (sighting, tree).
pub const CREATE_QUADRANTS: &str = "
CREATE TABLE IF NOT EXISTS quadrants (
    id BIGINT PRIMARY KEY,
    lichen_id BIGINT,
    tree_id BIGINT,
    sq1 TEXT,
    sq2 TEXT,
    sq3 TEXT,
    sq4 TEXT,
    sq5 TEXT
);
";

/// Ecology reference rows, matched to species by normalized name.
///
/// `ordinal` is the row's position in the imported file; among rows sharing
/// a normalized name the lowest ordinal is used.
pub const CREATE_LICHEN_ECOLOGY: &str = "
CREATE TABLE IF NOT EXISTS lichen_ecology (
    name TEXT NOT NULL,
    ph TEXT,
    eutrophication TEXT,
    poleotolerance TEXT,
    thallus TEXT,
    rarity TEXT,
    ordinal BIGINT NOT NULL
);
";

pub const CREATE_INDEXES: &str = "
CREATE INDEX IF NOT EXISTS idx_trees_observation ON trees(observation_id);
CREATE INDEX IF NOT EXISTS idx_lichens_observation ON lichens(observation_id);
CREATE INDEX IF NOT EXISTS idx_quadrants_lichen ON quadrants(lichen_id);
";

/// Every survey table, in load order.
pub const TABLES: [&str; 6] = [
    "observations",
    "trees",
    "lichens",
    "lichen_species",
    "quadrants",
    "lichen_ecology",
];

/// Normalized species-name expression: trimmed, accent-free, lower case.
///
/// The same expression is applied to both sides of the ecology join.
#[must_use]
pub fn normalized_name(column: &str) -> String {
    format!("lower(strip_accents(trim({column})))")
}
