//! Application configuration
//!
//! This module re-exports the shared `AppConfig` from outpost-types and
//! provides persistence through confy.

use std::path::PathBuf;
use std::time::Duration;

pub use outpost_types::{AppConfig, PhaseFilter};

use super::error::ConfigError;

const APP_NAME: &str = "outpost";
const CONFIG_NAME: &str = "config";

// ─────────────────────────────────────────────────────────────────────────────
// AppConfig Extensions
// ─────────────────────────────────────────────────────────────────────────────

/// Extension trait for AppConfig persistence
pub trait AppConfigExt: Sized {
    fn load() -> Self;
    fn try_load() -> Result<Self, ConfigError>;
    fn save(&self) -> Result<(), ConfigError>;
    fn config_path() -> Result<PathBuf, ConfigError>;
    fn tick_interval(&self) -> Duration;
}

impl AppConfigExt for AppConfig {
    /// Load the stored config, falling back to defaults when it is missing
    /// or unreadable
    fn load() -> Self {
        match Self::try_load() {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!(error = %e, "Using default configuration");
                Self::default()
            }
        }
    }

    fn try_load() -> Result<Self, ConfigError> {
        Ok(confy::load(APP_NAME, CONFIG_NAME)?)
    }

    fn save(&self) -> Result<(), ConfigError> {
        confy::store(APP_NAME, CONFIG_NAME, self).map_err(ConfigError::Save)
    }

    fn config_path() -> Result<PathBuf, ConfigError> {
        confy::get_configuration_file_path(APP_NAME, CONFIG_NAME).map_err(ConfigError::Locate)
    }

    fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_tick_once_per_second() {
        let config = AppConfig::default();
        assert_eq!(config.tick_interval(), Duration::from_secs(1));
        assert!(config.confirm_destructive);
        assert_eq!(config.default_filter, PhaseFilter::All);
    }
}
