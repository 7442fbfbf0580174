//! # lgo-config
//!
//! Layered configuration loading for LichensGo using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`LICHENSGO_*` prefix, `__` as separator)
//! 2. Project-level `.lichensgo/config.toml`
//! 3. User-level `~/.config/lichensgo/config.toml`
//! 4. Built-in defaults
//!
//! Figment maps `LICHENSGO_INDICES__VDL_DIVISOR` -> `indices.vdl_divisor`,
//! `LICHENSGO_GENERAL__LANGUAGE` -> `general.language`, etc.
//!
//! ```no_run
//! use std::path::Path;
//!
//! use lgo_config::LgoConfig;
//!
//! let config = LgoConfig::load_from(Path::new(".")).expect("config");
//! println!("store: {}", config.store.database_path);
//! ```

mod error;
mod general;
mod indices;
mod store;

pub use error::ConfigError;
pub use general::GeneralConfig;
pub use indices::IndicesConfig;
pub use store::StoreConfig;

use std::path::{Path, PathBuf};

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};

/// Directory holding project-local state (config and database).
pub const PROJECT_DIR: &str = ".lichensgo";

/// Environment variable prefix.
pub const ENV_PREFIX: &str = "LICHENSGO_";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct LgoConfig {
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub indices: IndicesConfig,
    #[serde(default)]
    pub general: GeneralConfig,
}

impl LgoConfig {
    /// Load configuration for the project rooted at `root`.
    ///
    /// Does not read `.env` files; the caller loads them first so their
    /// variables reach the env provider.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if a source fails to parse or a value is invalid.
    pub fn load_from(root: &Path) -> Result<Self, ConfigError> {
        let config: Self = Self::figment_in(root).extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Build the provider chain for the project rooted at `root`.
    ///
    /// Public so tests can inspect the figment or layer extra providers.
    #[must_use]
    pub fn figment_in(root: &Path) -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        let local_path = Self::project_config_path(root);
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        figment.merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    /// `<root>/.lichensgo/config.toml`.
    #[must_use]
    pub fn project_config_path(root: &Path) -> PathBuf {
        root.join(PROJECT_DIR).join("config.toml")
    }

    /// Check cross-field constraints after extraction.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] naming the offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.indices.validate()
    }

    /// Render the configuration as TOML, for `lgo init`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] if serialization fails.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::InvalidValue {
            field: "config".into(),
            reason: e.to_string(),
        })
    }

    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("lichensgo").join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lgo_core::enums::Language;

    #[test]
    fn default_config_is_valid() {
        let config = LgoConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.general.language, Language::Fr);
        assert_eq!(config.indices.cache_ttl_secs, 120);
    }

    #[test]
    fn project_config_path_is_under_project_dir() {
        let path = LgoConfig::project_config_path(Path::new("/tmp/survey"));
        assert_eq!(path, PathBuf::from("/tmp/survey/.lichensgo/config.toml"));
    }

    #[test]
    fn toml_rendering_reloads() {
        let rendered = LgoConfig::default().to_toml().expect("renders");
        assert!(rendered.contains("[indices]"));
        let back: LgoConfig = toml::from_str(&rendered).expect("parses");
        assert_eq!(back.general.default_limit, 20);
    }
}
