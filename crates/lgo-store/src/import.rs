//! CSV import through `DuckDB`'s `read_csv`.
//!
//! Column names in survey exports vary between dumps (`date_obs` vs `date`,
//! `Taxon` vs `name`, ...). Each target column lists the source names it
//! accepts; matching is case-insensitive. The CSV sniffer picks the
//! delimiter, so `,` and `;` files both load.

use std::path::Path;

use serde::Serialize;

use crate::{LichenStore, StoreError, sql_identifier, sql_literal};

/// How a raw `VARCHAR` CSV value is cast into its column.
#[derive(Debug, Clone, Copy)]
enum Cast {
    BigInt,
    Integer,
    Double,
    /// First ten characters, so timestamps load as their date.
    Date,
    Bool,
    Text,
}

impl Cast {
    fn expr(self, column: &str) -> String {
        match self {
            Self::BigInt => format!("TRY_CAST({column} AS BIGINT)"),
            Self::Integer => format!("TRY_CAST(TRY_CAST({column} AS DOUBLE) AS INTEGER)"),
            Self::Double => format!("TRY_CAST({column} AS DOUBLE)"),
            Self::Date => format!("TRY_CAST(left(trim({column}), 10) AS DATE)"),
            Self::Bool => format!("coalesce(TRY_CAST(trim({column}) AS BOOLEAN), TRUE)"),
            Self::Text => format!("NULLIF(trim({column}), '')"),
        }
    }
}

struct CsvColumn {
    target: &'static str,
    sources: &'static [&'static str],
    cast: Cast,
    required: bool,
}

const fn required(target: &'static str, sources: &'static [&'static str], cast: Cast) -> CsvColumn {
    CsvColumn {
        target,
        sources,
        cast,
        required: true,
    }
}

const fn optional(target: &'static str, sources: &'static [&'static str], cast: Cast) -> CsvColumn {
    CsvColumn {
        target,
        sources,
        cast,
        required: false,
    }
}

struct CsvTable {
    file: &'static str,
    table: &'static str,
    columns: &'static [CsvColumn],
    /// Column receiving the 1-based file row number, when the table keeps one.
    ordinal: Option<&'static str>,
}

const SURVEY_TABLES: &[CsvTable] = &[
    CsvTable {
        file: "observations.csv",
        table: "observations",
        columns: &[
            required("id", &["id", "observation_id"], Cast::BigInt),
            required("date", &["date_obs", "date"], Cast::Date),
            required("lat", &["localisation_lat", "lat", "latitude"], Cast::Double),
            required("lon", &["localisation_long", "lon", "longitude"], Cast::Double),
            optional("user_id", &["user_id"], Cast::BigInt),
        ],
        ordinal: None,
    },
    CsvTable {
        file: "trees.csv",
        table: "trees",
        columns: &[
            required("id", &["id", "tree_id"], Cast::BigInt),
            required("observation_id", &["observation_id"], Cast::BigInt),
            optional("species_name", &["species_name", "species"], Cast::Text),
            optional("circumference", &["circonference", "circumference"], Cast::Integer),
        ],
        ordinal: None,
    },
    CsvTable {
        file: "lichens.csv",
        table: "lichens",
        columns: &[
            required("id", &["id", "lichen_id"], Cast::BigInt),
            optional("species_id", &["species_id"], Cast::BigInt),
            required("observation_id", &["observation_id"], Cast::BigInt),
        ],
        ordinal: None,
    },
    CsvTable {
        file: "lichen_species.csv",
        table: "lichen_species",
        columns: &[
            required("id", &["id", "species_id"], Cast::BigInt),
            required("name", &["name"], Cast::Text),
            optional("name_en", &["name_en"], Cast::Text),
            optional("name_fr", &["name_fr"], Cast::Text),
            optional("unique", &["unique"], Cast::Bool),
        ],
        ordinal: None,
    },
    CsvTable {
        file: "quadrants.csv",
        table: "quadrants",
        columns: &[
            required("id", &["id", "table_id"], Cast::BigInt),
            optional("lichen_id", &["lichen_id"], Cast::BigInt),
            optional("tree_id", &["tree_id"], Cast::BigInt),
            optional("sq1", &["sq1"], Cast::Text),
            optional("sq2", &["sq2"], Cast::Text),
            optional("sq3", &["sq3"], Cast::Text),
            optional("sq4", &["sq4"], Cast::Text),
            optional("sq5", &["sq5"], Cast::Text),
        ],
        ordinal: None,
    },
];

const ECOLOGY_TABLE: CsvTable = CsvTable {
    file: "lichen_ecology.csv",
    table: "lichen_ecology",
    columns: &[
        required("name", &["name", "taxon"], Cast::Text),
        optional("ph", &["ph"], Cast::Text),
        optional("eutrophication", &["eutrophication"], Cast::Text),
        optional("poleotolerance", &["poleotolerance"], Cast::Text),
        optional("thallus", &["thallus"], Cast::Text),
        optional("rarity", &["rarity"], Cast::Text),
    ],
    ordinal: Some("ordinal"),
};

/// Rows loaded and rejected per table by an import.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ImportReport {
    pub tables: Vec<TableImport>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableImport {
    pub table: String,
    pub file: String,
    pub rows: usize,
    /// Rows dropped because a required cell was empty or unreadable.
    pub rejected: usize,
}

impl ImportReport {
    #[must_use]
    pub fn total_rows(&self) -> usize {
        self.tables.iter().map(|t| t.rows).sum()
    }

    #[must_use]
    pub fn total_rejected(&self) -> usize {
        self.tables.iter().map(|t| t.rejected).sum()
    }
}

impl LichenStore {
    /// Load every known survey CSV found in `dir`.
    ///
    /// Files that are absent are skipped. Rows whose primary key already
    /// exists are replaced, so re-importing a newer dump is safe.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::MissingColumn`] if a file lacks a required
    /// column, or [`StoreError::DuckDb`] if reading or inserting fails.
    pub fn import_csv_dir(&self, dir: &Path) -> Result<ImportReport, StoreError> {
        if !dir.is_dir() {
            return Err(StoreError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("{} is not a directory", dir.display()),
            )));
        }

        let mut report = ImportReport::default();
        for csv in SURVEY_TABLES {
            let path = dir.join(csv.file);
            if !path.is_file() {
                tracing::debug!(file = csv.file, "survey CSV not present, skipping");
                continue;
            }
            let loaded = self.load_csv(csv, &path, "INSERT OR REPLACE INTO")?;
            tracing::debug!(table = csv.table, rows = loaded.rows, "imported survey CSV");
            report.tables.push(loaded);
        }
        Ok(report)
    }

    /// Replace the ecology reference table with the rows of `path`.
    ///
    /// Accepts `name` or `Taxon` as the species column; extra columns are
    /// ignored and missing trait columns load as NULL. Each row keeps its
    /// position in the file so duplicate names resolve to the first one.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::MissingColumn`] if no name column exists, or
    /// [`StoreError::DuckDb`] if reading or inserting fails.
    pub fn import_ecology_csv(&self, path: &Path) -> Result<TableImport, StoreError> {
        if !path.is_file() {
            return Err(StoreError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("ecology CSV not found: {}", path.display()),
            )));
        }
        self.conn.execute_batch("DELETE FROM lichen_ecology;")?;
        let loaded = self.load_csv(&ECOLOGY_TABLE, path, "INSERT INTO")?;
        tracing::debug!(rows = loaded.rows, path = %path.display(), "imported ecology reference");
        Ok(loaded)
    }

    fn load_csv(
        &self,
        csv: &CsvTable,
        path: &Path,
        verb: &str,
    ) -> Result<TableImport, StoreError> {
        let reader = format!(
            "read_csv({}, header = true, all_varchar = true)",
            sql_literal(&path.to_string_lossy())
        );
        let available = self.csv_columns(&reader)?;

        let mut targets = Vec::with_capacity(csv.columns.len());
        let mut exprs = Vec::with_capacity(csv.columns.len());
        let mut filters = Vec::new();
        for column in csv.columns {
            let found = column.sources.iter().find_map(|wanted| {
                available
                    .iter()
                    .find(|have| have.trim().eq_ignore_ascii_case(wanted))
            });
            match found {
                Some(name) => {
                    let expr = column.cast.expr(&sql_identifier(name));
                    if column.required {
                        filters.push(format!("{expr} IS NOT NULL"));
                    }
                    exprs.push(expr);
                    targets.push(sql_identifier(column.target));
                }
                None if column.required => {
                    return Err(StoreError::MissingColumn {
                        file: csv.file.to_string(),
                        column: column.target.to_string(),
                    });
                }
                None => {}
            }
        }

        let source = match csv.ordinal {
            Some(ordinal) => {
                exprs.push("lgo_file_row".to_string());
                targets.push(sql_identifier(ordinal));
                format!(
                    "(SELECT *, row_number() OVER () AS lgo_file_row FROM {reader}) AS numbered"
                )
            }
            None => reader,
        };

        let rejected = if filters.is_empty() {
            0
        } else {
            let condition = filters.join(" AND ");
            let rejected: i64 = self.conn.query_row(
                &format!("SELECT count(*) FROM {source} WHERE NOT ({condition})"),
                [],
                |row| row.get(0),
            )?;
            usize::try_from(rejected).unwrap_or_default()
        };
        if rejected > 0 {
            tracing::warn!(
                file = csv.file,
                rejected,
                "rows with an empty or unreadable required value were skipped"
            );
        }

        let where_clause = if filters.is_empty() {
            String::new()
        } else {
            format!(" WHERE {}", filters.join(" AND "))
        };
        let sql = format!(
            "{verb} {} ({}) SELECT {} FROM {source}{where_clause}",
            csv.table,
            targets.join(", "),
            exprs.join(", "),
        );
        let rows = self.conn.execute(&sql, [])?;
        Ok(TableImport {
            table: csv.table.to_string(),
            file: csv.file.to_string(),
            rows,
            rejected,
        })
    }

    fn csv_columns(&self, source: &str) -> Result<Vec<String>, StoreError> {
        let mut stmt = self.conn.prepare(&format!("DESCRIBE SELECT * FROM {source}"))?;
        let columns = stmt
            .query_map([], |row| row.get(0))?
            .collect::<Result<Vec<String>, _>>()?;
        Ok(columns)
    }
}
