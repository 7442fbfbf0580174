//! Index pipeline error types.

/// Errors raised while building or caching a dataset.
#[derive(Debug, thiserror::Error)]
pub enum IndexError {
    /// The snapshot source failed to produce a snapshot.
    #[error("snapshot source failed: {0}")]
    Source(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Index settings are unusable (e.g. a non-positive VDL divisor).
    #[error("invalid index settings: {0}")]
    InvalidSettings(String),
}
