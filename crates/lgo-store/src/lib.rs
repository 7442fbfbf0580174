//! # lgo-store
//!
//! `DuckDB` storage for the LichensGo survey tables.
//!
//! One database file (`.lichensgo/lichensgo.duckdb` by default) holds the
//! observation tables imported from CSV exports plus the ecology reference
//! table. The store is read by the index pipeline through
//! [`lgo_core::source::SnapshotSource`] and writes flat export tables back
//! to CSV or Parquet with `COPY`.

pub mod error;
pub mod export;
pub mod import;
pub mod schemas;
pub mod snapshot;
pub mod store;

pub use error::StoreError;
pub use export::ExportFormat;
pub use import::ImportReport;

use std::path::Path;

use duckdb::Connection;
use serde::Serialize;

/// Local `DuckDB` store for survey data.
pub struct LichenStore {
    conn: Connection,
}

/// Row counts per table, for status reporting.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TableCounts {
    pub observations: i64,
    pub trees: i64,
    pub lichens: i64,
    pub lichen_species: i64,
    pub quadrants: i64,
    pub lichen_ecology: i64,
}

impl LichenStore {
    /// Open or create a store file.
    ///
    /// Creates all tables and indexes if they don't exist.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::DuckDb`] if the file cannot be opened or schema creation fails.
    pub fn open_local(path: &Path) -> Result<Self, StoreError> {
        let conn = Connection::open(path)?;
        let store = Self { conn };
        store.init_schema()?;
        Ok(store)
    }

    /// Open an in-memory store (for testing).
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::DuckDb`] if schema creation fails.
    pub fn open_in_memory() -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory()?;
        let store = Self { conn };
        store.init_schema()?;
        Ok(store)
    }

    /// Access the underlying `DuckDB` connection.
    ///
    /// Prefer the typed methods on [`LichenStore`] for standard operations.
    #[must_use]
    pub const fn conn(&self) -> &Connection {
        &self.conn
    }

    fn init_schema(&self) -> Result<(), StoreError> {
        self.conn.execute_batch(schemas::CREATE_OBSERVATIONS)?;
        self.conn.execute_batch(schemas::CREATE_TREES)?;
        self.conn.execute_batch(schemas::CREATE_LICHENS)?;
        self.conn.execute_batch(schemas::CREATE_LICHEN_SPECIES)?;
        self.conn.execute_batch(schemas::CREATE_QUADRANTS)?;
        self.conn.execute_batch(schemas::CREATE_LICHEN_ECOLOGY)?;
        self.conn.execute_batch(schemas::CREATE_INDEXES)?;
        Ok(())
    }

    /// Count rows in every table.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::DuckDb`] if a count query fails.
    pub fn table_counts(&self) -> Result<TableCounts, StoreError> {
        let count = |table: &str| -> Result<i64, StoreError> {
            let n = self
                .conn
                .query_row(&format!("SELECT count(*) FROM {table}"), [], |row| {
                    row.get(0)
                })?;
            Ok(n)
        };

        Ok(TableCounts {
            observations: count("observations")?,
            trees: count("trees")?,
            lichens: count("lichens")?,
            lichen_species: count("lichen_species")?,
            quadrants: count("quadrants")?,
            lichen_ecology: count("lichen_ecology")?,
        })
    }

    /// Delete every row from every table, keeping the schema.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::DuckDb`] if a DELETE fails.
    pub fn clear(&self) -> Result<(), StoreError> {
        for table in schemas::TABLES {
            self.conn.execute_batch(&format!("DELETE FROM {table};"))?;
        }
        tracing::debug!("store cleared");
        Ok(())
    }
}

/// Quote a string as a SQL literal (`'it''s'`).
pub(crate) fn sql_literal(value: &str) -> String {
    format!("'{}'", value.replace('\'', "''"))
}

/// Quote an identifier (`"Espèce ""A"""`).
pub(crate) fn sql_identifier(value: &str) -> String {
    format!("\"{}\"", value.replace('"', "\"\""))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn schema_creation() {
        let store = LichenStore::open_in_memory().expect("open in-memory store");

        let tables: Vec<String> = {
            let mut stmt = store
                .conn()
                .prepare(
                    "SELECT table_name FROM information_schema.tables
                     WHERE table_schema = 'main'
                     ORDER BY table_name",
                )
                .unwrap();
            stmt.query_map([], |row| row.get(0))
                .unwrap()
                .collect::<Result<Vec<_>, _>>()
                .unwrap()
        };

        for table in schemas::TABLES {
            assert!(tables.contains(&table.to_string()), "missing table {table}");
        }
    }

    #[test]
    fn empty_store_counts_zero() {
        let store = LichenStore::open_in_memory().unwrap();
        assert_eq!(store.table_counts().unwrap(), TableCounts::default());
    }

    #[test]
    fn schema_init_is_idempotent() {
        let store = LichenStore::open_in_memory().unwrap();
        store.init_schema().expect("second init succeeds");
    }

    #[test]
    fn quoting() {
        assert_eq!(sql_literal("it's"), "'it''s'");
        assert_eq!(sql_identifier("a\"b"), "\"a\"\"b\"");
    }

    #[test]
    fn persists_across_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("survey.duckdb");
        {
            let store = LichenStore::open_local(&path).unwrap();
            store
                .conn()
                .execute_batch("INSERT INTO lichens VALUES (1, NULL, 10);")
                .unwrap();
        }
        let store = LichenStore::open_local(&path).unwrap();
        assert_eq!(store.table_counts().unwrap().lichens, 1);
    }
}
