//! Dashboard rendering settings.

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Default recent-activity feed length.
const fn default_activity_limit() -> usize {
    10
}

/// Estimate used for progress when a task has none, in minutes.
const fn default_estimate_minutes() -> u32 {
    120
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DashboardConfig {
    #[serde(default = "default_activity_limit")]
    pub activity_limit: usize,

    #[serde(default = "default_estimate_minutes")]
    pub default_estimate_minutes: u32,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            activity_limit: default_activity_limit(),
            default_estimate_minutes: default_estimate_minutes(),
        }
    }
}

impl DashboardConfig {
    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        if self.activity_limit == 0 {
            return Err(ConfigError::invalid(
                "dashboard.activity_limit",
                "must be greater than zero",
            ));
        }
        if self.default_estimate_minutes == 0 {
            return Err(ConfigError::invalid(
                "dashboard.default_estimate_minutes",
                "must be greater than zero",
            ));
        }
        Ok(())
    }
}
