//! Local store configuration.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

fn default_database_path() -> String {
    String::from(".lichensgo/lichensgo.duckdb")
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StoreConfig {
    /// Path of the DuckDB database file, relative to the working directory.
    #[serde(default = "default_database_path")]
    pub database_path: String,

    /// Ecology reference CSV imported alongside the observation tables.
    #[serde(default)]
    pub ecology_csv: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            database_path: default_database_path(),
            ecology_csv: String::new(),
        }
    }
}

impl StoreConfig {
    #[must_use]
    pub fn database_path(&self) -> PathBuf {
        PathBuf::from(&self.database_path)
    }

    /// The ecology CSV path, if one is configured.
    #[must_use]
    pub fn ecology_csv(&self) -> Option<PathBuf> {
        let trimmed = self.ecology_csv.trim();
        (!trimmed.is_empty()).then(|| PathBuf::from(trimmed))
    }
}
