//! Cross-cutting error types for LichensGo.
//!
//! Domain-specific errors (e.g., `StoreError`, `IndexError`) are defined in
//! their respective crates. The CLI converges everything on `anyhow`.

use thiserror::Error;

/// Errors that can be raised by any LichensGo crate.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    /// Input data failed validation at an adapter boundary.
    #[error("Validation error: {0}")]
    Validation(String),
}
