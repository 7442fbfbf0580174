//! Flat, typed export table.
//!
//! Built by the index pipeline and written to CSV or Parquet by the store.

use std::fmt;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Storage type of an export column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ColumnKind {
    Integer,
    Float,
    Text,
}

impl ColumnKind {
    /// DuckDB column type used when materializing the table.
    #[must_use]
    pub const fn sql_type(self) -> &'static str {
        match self {
            Self::Integer => "BIGINT",
            Self::Float => "DOUBLE",
            Self::Text => "VARCHAR",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ExportColumn {
    pub header: String,
    pub kind: ColumnKind,
}

/// One export cell. `Empty` renders as an empty CSV cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum ExportValue {
    Integer(i64),
    Float(f64),
    Text(String),
    Empty,
}

impl fmt::Display for ExportValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer(value) => write!(f, "{value}"),
            Self::Float(value) => write!(f, "{value}"),
            Self::Text(value) => f.write_str(value),
            Self::Empty => Ok(()),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ExportTable {
    pub columns: Vec<ExportColumn>,
    pub rows: Vec<Vec<ExportValue>>,
}

impl ExportTable {
    #[must_use]
    pub fn headers(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.header.as_str()).collect()
    }

    /// Position of the column with the given header.
    #[must_use]
    pub fn column_index(&self, header: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.header == header)
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn empty_cell_displays_blank() {
        assert_eq!(ExportValue::Empty.to_string(), "");
        assert_eq!(ExportValue::Float(0.5).to_string(), "0.5");
    }

    #[test]
    fn empty_serializes_as_null() {
        let json = serde_json::to_string(&vec![
            ExportValue::Integer(3),
            ExportValue::Empty,
            ExportValue::Text("a".into()),
        ])
        .unwrap();
        assert_eq!(json, r#"[3,null,"a"]"#);
    }

    #[test]
    fn column_lookup() {
        let table = ExportTable {
            columns: vec![
                ExportColumn {
                    header: "Date".into(),
                    kind: ColumnKind::Text,
                },
                ExportColumn {
                    header: "VDL".into(),
                    kind: ColumnKind::Float,
                },
            ],
            rows: Vec::new(),
        };
        assert_eq!(table.headers(), vec!["Date", "VDL"]);
        assert_eq!(table.column_index("VDL"), Some(1));
        assert!(table.is_empty());
    }
}
