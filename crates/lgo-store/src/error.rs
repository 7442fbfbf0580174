//! Store error types.

use lgo_core::errors::CoreError;

/// Errors that can occur in the survey store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// `DuckDB` operation failed.
    #[error("DuckDB error: {0}")]
    DuckDb(#[from] duckdb::Error),

    /// I/O error (file operations around imports and exports).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A stored value could not be turned into a core type.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// An input file is missing a required column.
    #[error("{file}: missing column '{column}'")]
    MissingColumn { file: String, column: String },

    /// Catch-all for other errors.
    #[error("{0}")]
    Other(String),
}
