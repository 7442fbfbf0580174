//! Seam between the store and the snapshot cache.

use crate::entities::Snapshot;

/// Anything that can produce a full [`Snapshot`] of the survey tables.
///
/// The DuckDB store implements it; tests plug in in-memory fakes.
pub trait SnapshotSource {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Read every survey table.
    ///
    /// # Errors
    ///
    /// Implementation-defined; the store surfaces its query errors here.
    fn fetch_snapshot(&self) -> Result<Snapshot, Self::Error>;
}

impl<S: SnapshotSource + ?Sized> SnapshotSource for &S {
    type Error = S::Error;

    fn fetch_snapshot(&self) -> Result<Snapshot, Self::Error> {
        (**self).fetch_snapshot()
    }
}
