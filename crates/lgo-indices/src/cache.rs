//! Read-through snapshot cache with a time-to-live.
//!
//! The cache owns its [`SnapshotSource`]. A fresh entry is served as a
//! shared [`Dataset`]; a stale or missing one is refetched and rebuilt on
//! the calling thread. Nothing runs in the background.

use std::sync::{Arc, Mutex, PoisonError};
use std::time::{Duration, Instant};

use lgo_core::source::SnapshotSource;

use crate::dataset::{Dataset, IndexSettings};
use crate::error::IndexError;

/// Default freshness window.
pub const DEFAULT_TTL: Duration = Duration::from_secs(120);

struct Entry {
    dataset: Arc<Dataset>,
    fetched_at: Instant,
}

pub struct SnapshotCache<S> {
    source: S,
    settings: IndexSettings,
    ttl: Duration,
    entry: Mutex<Option<Entry>>,
}

impl<S: SnapshotSource> SnapshotCache<S> {
    #[must_use]
    pub const fn new(source: S, settings: IndexSettings, ttl: Duration) -> Self {
        Self {
            source,
            settings,
            ttl,
            entry: Mutex::new(None),
        }
    }

    /// The dataset, rebuilt from the source when the cached one expired.
    ///
    /// # Errors
    ///
    /// Returns [`IndexError::Source`] if the fetch fails (the previous
    /// entry, if any, is kept), or [`IndexError::InvalidSettings`].
    pub fn get(&self) -> Result<Arc<Dataset>, IndexError> {
        let mut entry = self.entry.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(cached) = entry.as_ref() {
            if cached.fetched_at.elapsed() < self.ttl {
                return Ok(Arc::clone(&cached.dataset));
            }
            tracing::debug!(ttl_secs = self.ttl.as_secs(), "snapshot expired, refetching");
        }

        let snapshot = self
            .source
            .fetch_snapshot()
            .map_err(|e| IndexError::Source(Box::new(e)))?;
        let dataset = Arc::new(Dataset::build(snapshot, &self.settings)?);
        *entry = Some(Entry {
            dataset: Arc::clone(&dataset),
            fetched_at: Instant::now(),
        });
        Ok(dataset)
    }

    /// Drop the cached dataset so the next [`Self::get`] refetches.
    pub fn invalidate(&self) {
        let mut entry = self.entry.lock().unwrap_or_else(PoisonError::into_inner);
        *entry = None;
    }

    /// Whether a cached dataset exists and is within its TTL.
    #[must_use]
    pub fn is_fresh(&self) -> bool {
        let entry = self.entry.lock().unwrap_or_else(PoisonError::into_inner);
        entry
            .as_ref()
            .is_some_and(|cached| cached.fetched_at.elapsed() < self.ttl)
    }

    #[must_use]
    pub const fn source(&self) -> &S {
        &self.source
    }

    #[must_use]
    pub const fn ttl(&self) -> Duration {
        self.ttl
    }
}
