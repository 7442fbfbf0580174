//! Writing export tables to disk with `DuckDB` `COPY`.
//!
//! The table is materialized into a scratch table (typed columns, headers
//! as column names) and copied out, so CSV quoting and Parquet encoding are
//! handled by `DuckDB`.

use std::fmt;
use std::path::Path;

use duckdb::types::Value;
use lgo_core::export::{ExportTable, ExportValue};
use serde::{Deserialize, Serialize};

use crate::{LichenStore, StoreError, sql_identifier, sql_literal};

const EXPORT_TABLE: &str = "lgo_export";

/// File format for [`LichenStore::write_export`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    #[default]
    Csv,
    Parquet,
}

impl ExportFormat {
    #[must_use]
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Parquet => "parquet",
        }
    }

    const fn copy_options(self) -> &'static str {
        match self {
            Self::Csv => "FORMAT CSV, HEADER",
            Self::Parquet => "FORMAT PARQUET, COMPRESSION ZSTD",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl LichenStore {
    /// Write `table` to `path` as CSV or Parquet.
    ///
    /// Empty cells are written as NULL (an empty CSV field).
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Other`] if a row does not match the column
    /// count, or [`StoreError::DuckDb`] if the copy fails.
    pub fn write_export(
        &self,
        table: &ExportTable,
        path: &Path,
        format: ExportFormat,
    ) -> Result<usize, StoreError> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let columns: Vec<String> = table
            .columns
            .iter()
            .map(|c| format!("{} {}", sql_identifier(&c.header), c.kind.sql_type()))
            .collect();
        self.conn.execute_batch(&format!(
            "DROP TABLE IF EXISTS {EXPORT_TABLE};
             CREATE TABLE {EXPORT_TABLE} ({});",
            columns.join(", ")
        ))?;

        let result = self.fill_and_copy(table, path, format);
        self.conn
            .execute_batch(&format!("DROP TABLE IF EXISTS {EXPORT_TABLE};"))?;
        let rows = result?;

        tracing::debug!(rows, path = %path.display(), %format, "export written");
        Ok(rows)
    }

    fn fill_and_copy(
        &self,
        table: &ExportTable,
        path: &Path,
        format: ExportFormat,
    ) -> Result<usize, StoreError> {
        {
            let mut appender = self.conn.appender(EXPORT_TABLE)?;
            for (index, row) in table.rows.iter().enumerate() {
                if row.len() != table.columns.len() {
                    return Err(StoreError::Other(format!(
                        "export row {index} has {} cells, expected {}",
                        row.len(),
                        table.columns.len()
                    )));
                }
                appender.append_row(duckdb::appender_params_from_iter(
                    row.iter().map(to_value),
                ))?;
            }
            appender.flush()?;
        }

        self.conn.execute_batch(&format!(
            "COPY {EXPORT_TABLE} TO {} ({});",
            sql_literal(&path.to_string_lossy()),
            format.copy_options()
        ))?;
        Ok(table.rows.len())
    }
}

fn to_value(cell: &ExportValue) -> Value {
    match cell {
        ExportValue::Integer(v) => Value::BigInt(*v),
        ExportValue::Float(v) => Value::Double(*v),
        ExportValue::Text(v) => Value::Text(v.clone()),
        ExportValue::Empty => Value::Null,
    }
}
