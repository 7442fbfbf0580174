//! Bulk insertion of survey entities.
//!
//! Uses the `DuckDB` Appender for every table except `observations`, whose
//! `DATE` column goes through a parameterized INSERT with an explicit cast.

use duckdb::params;
use lgo_core::entities::{
    EcologyRecord, LichenSighting, LichenSpecies, Observation, QuadrantRecord, Tree,
};

use crate::{LichenStore, StoreError};

impl LichenStore {
    /// Insert observations.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::DuckDb`] if any INSERT fails.
    pub fn store_observations(&self, observations: &[Observation]) -> Result<(), StoreError> {
        let mut stmt = self.conn.prepare(
            "INSERT INTO observations (id, date, lat, lon, user_id)
             VALUES (?, CAST(? AS DATE), ?, ?, ?)",
        )?;
        for obs in observations {
            stmt.execute(params![
                obs.id,
                obs.date.format("%Y-%m-%d").to_string(),
                obs.lat,
                obs.lon,
                obs.user_id,
            ])?;
        }
        Ok(())
    }

    /// Insert trees with the Appender.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::DuckDb`] if the Appender fails.
    pub fn store_trees(&self, trees: &[Tree]) -> Result<(), StoreError> {
        let mut appender = self.conn.appender("trees")?;
        for tree in trees {
            appender.append_row(params![
                tree.id,
                tree.observation_id,
                tree.species_name,
                tree.circumference
            ])?;
        }
        appender.flush()?;
        Ok(())
    }

    /// Insert lichen sightings with the Appender.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::DuckDb`] if the Appender fails.
    pub fn store_sightings(&self, sightings: &[LichenSighting]) -> Result<(), StoreError> {
        let mut appender = self.conn.appender("lichens")?;
        for sighting in sightings {
            appender.append_row(params![
                sighting.id,
                sighting.species_id,
                sighting.observation_id
            ])?;
        }
        appender.flush()?;
        Ok(())
    }

    /// Insert species reference rows. Traits are not stored here; they come
    /// from the ecology table at read time.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::DuckDb`] if the Appender fails.
    pub fn store_species(&self, species: &[LichenSpecies]) -> Result<(), StoreError> {
        let mut appender = self.conn.appender("lichen_species")?;
        for s in species {
            appender.append_row(params![s.id, s.name, s.name_en, s.name_fr, s.unique])?;
        }
        appender.flush()?;
        Ok(())
    }

    /// Insert quadrant grids, squares written in canonical letter form.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::DuckDb`] if the Appender fails.
    pub fn store_quadrants(&self, quadrants: &[QuadrantRecord]) -> Result<(), StoreError> {
        let mut appender = self.conn.appender("quadrants")?;
        for q in quadrants {
            let [sq1, sq2, sq3, sq4, sq5] = q.squares.map(|square| square.to_string());
            appender.append_row(params![q.id, q.lichen_id, q.tree_id, sq1, sq2, sq3, sq4, sq5])?;
        }
        appender.flush()?;
        Ok(())
    }

    /// Insert ecology reference rows after the ones already stored.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::DuckDb`] if the Appender fails.
    pub fn store_ecology(&self, records: &[EcologyRecord]) -> Result<(), StoreError> {
        let last: i64 = self.conn.query_row(
            "SELECT coalesce(max(ordinal), 0) FROM lichen_ecology",
            [],
            |row| row.get(0),
        )?;
        let mut appender = self.conn.appender("lichen_ecology")?;
        for (ordinal, record) in (last + 1..).zip(records) {
            let traits = &record.traits;
            appender.append_row(params![
                record.name,
                traits.ph.as_ref().map(|v| v.as_str().to_owned()),
                traits.eutrophication.as_ref().map(|v| v.as_str().to_owned()),
                traits.poleotolerance.as_ref().map(|v| v.as_str().to_owned()),
                traits.thallus.as_ref().map(|v| v.as_str().to_owned()),
                traits.rarity.as_ref().map(|v| v.as_str().to_owned()),
                ordinal,
            ])?;
        }
        appender.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use lgo_core::entities::EcologicalTraits;
    use lgo_core::orientation::OrientationSet;
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn store_and_count_every_table() {
        let store = LichenStore::open_in_memory().unwrap();

        store
            .store_observations(&[Observation {
                id: 1,
                date: NaiveDate::from_ymd_opt(2024, 4, 2).unwrap(),
                lat: 48.85,
                lon: 2.35,
                user_id: None,
            }])
            .unwrap();
        store
            .store_trees(&[Tree {
                id: 1,
                observation_id: 1,
                species_name: Some("Tilleul".into()),
                circumference: Some(120),
            }])
            .unwrap();
        store
            .store_sightings(&[LichenSighting {
                id: 1,
                species_id: Some(5),
                observation_id: 1,
            }])
            .unwrap();
        store
            .store_species(&[LichenSpecies {
                id: 5,
                name: "Xanthoria parietina".into(),
                name_en: None,
                name_fr: Some("Xanthorie des murailles".into()),
                unique: true,
                traits: EcologicalTraits::default(),
            }])
            .unwrap();
        store
            .store_quadrants(&[QuadrantRecord {
                id: 1,
                lichen_id: Some(1),
                tree_id: Some(1),
                squares: [
                    OrientationSet::parse("NE").unwrap(),
                    OrientationSet::EMPTY,
                    OrientationSet::EMPTY,
                    OrientationSet::EMPTY,
                    OrientationSet::EMPTY,
                ],
            }])
            .unwrap();
        store
            .store_ecology(&[EcologyRecord {
                name: "Xanthorie des murailles".into(),
                traits: EcologicalTraits::default(),
            }])
            .unwrap();

        let counts = store.table_counts().unwrap();
        assert_eq!(counts.observations, 1);
        assert_eq!(counts.trees, 1);
        assert_eq!(counts.lichens, 1);
        assert_eq!(counts.lichen_species, 1);
        assert_eq!(counts.quadrants, 1);
        assert_eq!(counts.lichen_ecology, 1);

        let sq1: String = store
            .conn()
            .query_row("SELECT sq1 FROM quadrants WHERE id = 1", [], |row| {
                row.get(0)
            })
            .unwrap();
        assert_eq!(sq1, "NE");

        store.clear().unwrap();
        assert_eq!(store.table_counts().unwrap().observations, 0);
    }

    #[test]
    fn duplicate_primary_key_is_rejected() {
        let store = LichenStore::open_in_memory().unwrap();
        let sighting = LichenSighting {
            id: 1,
            species_id: None,
            observation_id: 1,
        };
        store.store_sightings(&[sighting.clone()]).unwrap();
        assert!(store.store_sightings(&[sighting]).is_err());
    }
}
