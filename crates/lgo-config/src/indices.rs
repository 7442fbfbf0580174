//! Index computation and cache settings.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

const fn default_vdl_divisor() -> f64 {
    1.0
}

const fn default_cache_ttl_secs() -> u64 {
    120
}

const fn default_click_tolerance() -> f64 {
    1e-6
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct IndicesConfig {
    /// Divisor applied to the summed VDL. `1.0` leaves it unnormalized.
    #[serde(default = "default_vdl_divisor")]
    pub vdl_divisor: f64,

    /// Seconds a fetched snapshot stays fresh.
    #[serde(default = "default_cache_ttl_secs")]
    pub cache_ttl_secs: u64,

    /// Max coordinate distance (degrees) when matching a map click.
    #[serde(default = "default_click_tolerance")]
    pub click_tolerance: f64,
}

impl Default for IndicesConfig {
    fn default() -> Self {
        Self {
            vdl_divisor: default_vdl_divisor(),
            cache_ttl_secs: default_cache_ttl_secs(),
            click_tolerance: default_click_tolerance(),
        }
    }
}

impl IndicesConfig {
    #[must_use]
    pub const fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }

    /// Reject values the index pipeline cannot work with.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] when the VDL divisor is not a
    /// positive finite number or the click tolerance is negative.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.vdl_divisor.is_finite() || self.vdl_divisor <= 0.0 {
            return Err(ConfigError::InvalidValue {
                field: "indices.vdl_divisor".into(),
                reason: format!("must be a positive number, got {}", self.vdl_divisor),
            });
        }
        if !self.click_tolerance.is_finite() || self.click_tolerance < 0.0 {
            return Err(ConfigError::InvalidValue {
                field: "indices.click_tolerance".into(),
                reason: format!("must be zero or positive, got {}", self.click_tolerance),
            });
        }
        Ok(())
    }
}
