//! Backend API connection settings.

use serde::{Deserialize, Serialize};

use crate::ConfigError;

fn default_base_url() -> String {
    "http://localhost:5000".to_string()
}

/// Default request timeout in seconds.
const fn default_timeout_secs() -> u64 {
    30
}

/// Answer list 404s with an empty list by default.
const fn default_demo_fallback() -> bool {
    true
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiConfig {
    /// Backend origin, without the `/api` suffix (e.g., `https://fm.example.com`).
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Bearer token sent with every request. Empty means anonymous.
    #[serde(default)]
    pub token: String,

    /// Per-request timeout, in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Treat a 404 on the task list as "not deployed yet" and return an empty list.
    #[serde(default = "default_demo_fallback")]
    pub demo_fallback: bool,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            token: String::new(),
            timeout_secs: default_timeout_secs(),
            demo_fallback: default_demo_fallback(),
        }
    }
}

impl ApiConfig {
    /// A token is present, so requests will be authenticated.
    #[must_use]
    pub fn is_configured(&self) -> bool {
        !self.token.trim().is_empty()
    }

    /// Token to send, if any.
    #[must_use]
    pub fn bearer_token(&self) -> Option<&str> {
        Some(self.token.trim()).filter(|token| !token.is_empty())
    }

    /// Base URL without a trailing slash.
    #[must_use]
    pub fn trimmed_base_url(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }

    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        let base_url = self.base_url.trim();
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(ConfigError::invalid(
                "api.base_url",
                format!("expected an http(s) URL, got '{base_url}'"),
            ));
        }
        if self.timeout_secs == 0 {
            return Err(ConfigError::invalid("api.timeout_secs", "must be greater than zero"));
        }
        Ok(())
    }
}
