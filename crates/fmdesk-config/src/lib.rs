//! # fmdesk-config
//!
//! Layered configuration loading for fmdesk using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`FMDESK_*` prefix, `__` as separator)
//! 2. Project-level `.fmdesk/config.toml`
//! 3. User-level `~/.config/fmdesk/config.toml`
//! 4. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `FMDESK_API__BASE_URL` -> `api.base_url`,
//! `FMDESK_WORKFLOW__REQUIRE_REJECT_COMMENT` -> `workflow.require_reject_comment`, etc.
//!
//! # Usage
//!
//! ```no_run
//! use fmdesk_config::FmdeskConfig;
//!
//! let config = FmdeskConfig::load_with_dotenv().expect("config");
//!
//! if !config.api.is_configured() {
//!     eprintln!("no API token; requests will be anonymous");
//! }
//! ```

mod api;
mod dashboard;
mod error;
mod general;
mod workflow;

pub use api::ApiConfig;
pub use dashboard::DashboardConfig;
pub use error::ConfigError;
pub use general::GeneralConfig;
pub use workflow::WorkflowConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Project-local config file, relative to the working directory.
pub const LOCAL_CONFIG_PATH: &str = ".fmdesk/config.toml";

/// Environment variable prefix.
pub const ENV_PREFIX: &str = "FMDESK_";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct FmdeskConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub dashboard: DashboardConfig,
    #[serde(default)]
    pub workflow: WorkflowConfig,
    #[serde(default)]
    pub general: GeneralConfig,
}

impl FmdeskConfig {
    /// Load configuration from all sources (TOML files + environment variables).
    ///
    /// Does NOT call `dotenvy`; use [`Self::load_with_dotenv`] for `.env` support.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if a source fails to parse or a value is out of range.
    pub fn load() -> Result<Self, ConfigError> {
        Self::extract(&Self::figment())
    }

    /// Load configuration after reading `.env` from the working directory.
    ///
    /// # Errors
    ///
    /// Same as [`Self::load`].
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::load()
    }

    /// Extract and validate a config from any figment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if extraction fails or a value is out of range.
    pub fn extract(figment: &Figment) -> Result<Self, ConfigError> {
        let config: Self = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Build the figment provider chain.
    #[must_use]
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(global_path) = Self::global_config_path()
            && global_path.exists()
        {
            figment = figment.merge(Toml::file(global_path));
        }

        let local_path = PathBuf::from(LOCAL_CONFIG_PATH);
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        figment.merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    /// Check cross-field value ranges.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] naming the first bad field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.api.validate()?;
        self.dashboard.validate()
    }

    /// Path to the user-global config file.
    #[must_use]
    pub fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("fmdesk").join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = FmdeskConfig::default();
        assert!(!config.api.is_configured());
        assert!(config.api.demo_fallback);
        assert!(!config.workflow.require_reject_comment);
        assert_eq!(config.dashboard.activity_limit, 10);
        assert_eq!(config.general.default_limit, 20);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn figment_builds_without_files() {
        figment::Jail::expect_with(|_jail| {
            let config = FmdeskConfig::load().expect("should extract defaults");
            assert_eq!(config.api.base_url, "http://localhost:5000");
            assert_eq!(config.dashboard.default_estimate_minutes, 120);
            Ok(())
        });
    }

    #[test]
    fn global_path_ends_in_fmdesk_config() {
        if let Some(path) = FmdeskConfig::global_config_path() {
            assert!(path.ends_with("fmdesk/config.toml"));
        }
    }
}
