use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use lgo_config::LgoConfig;
use lgo_indices::{Dataset, IndexSettings, SnapshotCache};
use lgo_store::LichenStore;

use super::resolve_in_project;
use crate::progress::Progress;

/// Shared application resources initialized once at startup.
pub struct AppContext {
    pub config: LgoConfig,
    pub project_root: PathBuf,
    pub database_path: PathBuf,
    cache: SnapshotCache<LichenStore>,
}

impl AppContext {
    /// Open the project store and wrap it in the snapshot cache.
    pub fn init(project_root: PathBuf, config: LgoConfig) -> anyhow::Result<Self> {
        let database_path = resolve_in_project(&project_root, &config.store.database_path());
        if let Some(parent) = database_path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }

        let store = LichenStore::open_local(&database_path)
            .with_context(|| format!("failed to open store at {}", database_path.display()))?;
        tracing::debug!(path = %database_path.display(), "store opened");

        let cache = SnapshotCache::new(
            store,
            IndexSettings::from(&config.indices),
            config.indices.cache_ttl(),
        );

        Ok(Self {
            config,
            project_root,
            database_path,
            cache,
        })
    }

    #[must_use]
    pub const fn store(&self) -> &LichenStore {
        self.cache.source()
    }

    /// The indexed dataset, built from the store on first use.
    pub fn dataset(&self) -> anyhow::Result<Arc<Dataset>> {
        let spinner = Progress::spinner("computing indices");
        match self.cache.get() {
            Ok(dataset) => {
                spinner.finish_clear();
                Ok(dataset)
            }
            Err(error) => {
                spinner.finish_err("index computation failed");
                Err(error).context("failed to build the survey dataset")
            }
        }
    }

    /// Drop the cached dataset after the store changed.
    pub fn invalidate(&self) {
        self.cache.invalidate();
    }
}
