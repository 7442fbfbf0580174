//! Reading a full [`Snapshot`] out of the store.
//!
//! Species are joined to the ecology reference on the normalized French
//! name. Squares are parsed into [`OrientationSet`]s here; malformed cells
//! are logged and read as empty.

use chrono::NaiveDate;
use lgo_core::entities::{
    EcologicalTraits, LichenSighting, LichenSpecies, Observation, QuadrantRecord, Snapshot, Tree,
};
use lgo_core::enums::{EutrophicationTolerance, PhTolerance, Poleotolerance, Rarity, Thallus};
use lgo_core::errors::CoreError;
use lgo_core::orientation::{OrientationSet, SQUARES_PER_GRID};
use lgo_core::source::SnapshotSource;

use crate::schemas::normalized_name;
use crate::{LichenStore, StoreError};

impl LichenStore {
    /// Read every survey table into a snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::DuckDb`] if a query fails, or
    /// [`StoreError::Core`] if a stored date cannot be parsed.
    pub fn fetch_snapshot(&self) -> Result<Snapshot, StoreError> {
        let observations = self.fetch_observations()?;
        let trees = self.fetch_trees()?;
        let sightings = self.fetch_sightings()?;
        let (species, missing_ecology) = self.fetch_species()?;
        let quadrants = self.fetch_quadrants()?;

        tracing::debug!(
            observations = observations.len(),
            trees = trees.len(),
            sightings = sightings.len(),
            species = species.len(),
            quadrants = quadrants.len(),
            "snapshot fetched"
        );

        Ok(Snapshot {
            observations,
            trees,
            sightings,
            species,
            quadrants,
            missing_ecology,
        })
    }

    fn fetch_observations(&self) -> Result<Vec<Observation>, StoreError> {
        let mut stmt = self.conn.prepare(
            "SELECT id, CAST(date AS VARCHAR), lat, lon, user_id
             FROM observations ORDER BY id",
        )?;
        let rows = stmt
            .query_map([], |row| {
                Ok((
                    row.get::<_, i64>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, f64>(2)?,
                    row.get::<_, f64>(3)?,
                    row.get::<_, Option<i64>>(4)?,
                ))
            })?
            .collect::<Result<Vec<_>, _>>()?;

        rows.into_iter()
            .map(|(id, date, lat, lon, user_id)| {
                Ok(Observation {
                    id,
                    date: parse_date(&date)?,
                    lat,
                    lon,
                    user_id,
                })
            })
            .collect()
    }

    fn fetch_trees(&self) -> Result<Vec<Tree>, StoreError> {
        let mut stmt = self.conn.prepare(
            "SELECT id, observation_id, species_name, circumference FROM trees ORDER BY id",
        )?;
        let trees = stmt
            .query_map([], |row| {
                Ok(Tree {
                    id: row.get(0)?,
                    observation_id: row.get(1)?,
                    species_name: row.get(2)?,
                    circumference: row.get(3)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(trees)
    }

    fn fetch_sightings(&self) -> Result<Vec<LichenSighting>, StoreError> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, species_id, observation_id FROM lichens ORDER BY id")?;
        let sightings = stmt
            .query_map([], |row| {
                Ok(LichenSighting {
                    id: row.get(0)?,
                    species_id: row.get(1)?,
                    observation_id: row.get(2)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(sightings)
    }

    /// Species with their ecology traits, plus the names that found no
    /// ecology row. Duplicate reference rows for one name keep the first in
    /// file order.
    fn fetch_species(&self) -> Result<(Vec<LichenSpecies>, Vec<String>), StoreError> {
        self.warn_duplicate_ecology()?;

        let sql = format!(
            r#"SELECT s.id, s.name, s.name_en, s.name_fr, s."unique",
                      e.ph, e.eutrophication, e.poleotolerance, e.thallus, e.rarity,
                      e.normalized_name IS NOT NULL AS matched
               FROM lichen_species s
               LEFT JOIN (
                   SELECT *, {eco} AS normalized_name,
                          row_number() OVER (PARTITION BY {eco} ORDER BY ordinal) AS name_rank
                   FROM lichen_ecology
               ) e
                 ON e.normalized_name = {species} AND e.name_rank = 1
               ORDER BY s.id"#,
            eco = normalized_name("name"),
            species = normalized_name("coalesce(s.name_fr, s.name)"),
        );

        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt
            .query_map([], |row| {
                let traits = EcologicalTraits {
                    ph: row.get::<_, Option<String>>(5)?.and_then(|v| PhTolerance::parse(&v)),
                    eutrophication: row
                        .get::<_, Option<String>>(6)?
                        .and_then(|v| EutrophicationTolerance::parse(&v)),
                    poleotolerance: row
                        .get::<_, Option<String>>(7)?
                        .and_then(|v| Poleotolerance::parse(&v)),
                    thallus: row.get::<_, Option<String>>(8)?.and_then(|v| Thallus::parse(&v)),
                    rarity: row.get::<_, Option<String>>(9)?.and_then(|v| Rarity::parse(&v)),
                };
                let species = LichenSpecies {
                    id: row.get(0)?,
                    name: row.get(1)?,
                    name_en: row.get(2)?,
                    name_fr: row.get(3)?,
                    unique: row.get(4)?,
                    traits,
                };
                Ok((species, row.get::<_, bool>(10)?))
            })?
            .collect::<Result<Vec<_>, _>>()?;

        let mut missing = Vec::new();
        let species = rows
            .into_iter()
            .map(|(species, matched)| {
                if !matched {
                    tracing::warn!(
                        species_id = species.id,
                        name = %species.name,
                        "species missing from the ecology data"
                    );
                    missing.push(species.name.clone());
                }
                species
            })
            .collect();
        Ok((species, missing))
    }

    fn warn_duplicate_ecology(&self) -> Result<(), StoreError> {
        let sql = format!(
            "SELECT arg_min(name, ordinal), count(*)
             FROM lichen_ecology
             GROUP BY {eco}
             HAVING count(*) > 1
             ORDER BY min(ordinal)",
            eco = normalized_name("name"),
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let duplicates = stmt
            .query_map([], |row| Ok((row.get::<_, String>(0)?, row.get::<_, i64>(1)?)))?
            .collect::<Result<Vec<_>, _>>()?;
        for (kept, rows) in duplicates {
            tracing::warn!(name = %kept, rows, "duplicate ecology rows, keeping the first");
        }
        Ok(())
    }

    fn fetch_quadrants(&self) -> Result<Vec<QuadrantRecord>, StoreError> {
        let mut stmt = self.conn.prepare(
            "SELECT id, lichen_id, tree_id, sq1, sq2, sq3, sq4, sq5 FROM quadrants ORDER BY id",
        )?;
        let rows = stmt
            .query_map([], |row| {
                let mut raw: [Option<String>; SQUARES_PER_GRID] = Default::default();
                for (i, cell) in raw.iter_mut().enumerate() {
                    *cell = row.get(3 + i)?;
                }
                Ok((
                    row.get::<_, i64>(0)?,
                    row.get::<_, Option<i64>>(1)?,
                    row.get::<_, Option<i64>>(2)?,
                    raw,
                ))
            })?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(rows
            .into_iter()
            .map(|(id, lichen_id, tree_id, raw)| QuadrantRecord {
                id,
                lichen_id,
                tree_id,
                squares: raw.map(|cell| parse_square(id, cell.as_deref())),
            })
            .collect())
    }
}

impl SnapshotSource for LichenStore {
    type Error = StoreError;

    fn fetch_snapshot(&self) -> Result<Snapshot, Self::Error> {
        Self::fetch_snapshot(self)
    }
}

fn parse_date(raw: &str) -> Result<NaiveDate, CoreError> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|e| CoreError::Validation(format!("invalid observation date '{raw}': {e}")))
}

/// Parse one stored square. Invalid encodings become the empty set.
fn parse_square(quadrant_id: i64, raw: Option<&str>) -> OrientationSet {
    let Some(raw) = raw else {
        return OrientationSet::EMPTY;
    };
    match OrientationSet::parse(raw) {
        Ok(set) => {
            let stray = OrientationSet::stray_characters(raw);
            if stray > 0 {
                tracing::debug!(quadrant_id, raw, stray, "ignored non-orientation characters");
            }
            set
        }
        Err(e) => {
            tracing::warn!(quadrant_id, raw, error = %e, "unreadable square, counted as empty");
            OrientationSet::EMPTY
        }
    }
}
