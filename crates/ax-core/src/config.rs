//! Configuration for the client session stack.
//!
//! Defaults match the reference deployment; deployments override the
//! fields they need through a serialized config.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Backend API client configuration.
    pub api: ApiConfig,
    /// Onboarding review polling configuration.
    pub onboarding: OnboardingConfig,
}

/// Backend API configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Base URL of the marketplace backend.
    pub base_url: String,
    /// Per-request timeout in seconds.
    pub request_timeout_secs: u64,
}

impl ApiConfig {
    /// The per-request timeout as a [`Duration`].
    #[must_use]
    pub const fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the base URL is empty or not HTTP(S).
    pub fn validate(&self) -> Result<()> {
        if self.base_url.is_empty() {
            return Err(Error::Config("api.base_url must not be empty".into()));
        }
        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(Error::Config(format!(
                "api.base_url must be an http(s) URL, got {:?}",
                self.base_url
            )));
        }
        Ok(())
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5002".to_string(),
            request_timeout_secs: 10,
        }
    }
}

/// Review-status polling configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OnboardingConfig {
    /// Seconds between review-status polls while a submission is pending.
    pub poll_interval_secs: u64,
}

impl OnboardingConfig {
    /// The poll interval as a [`Duration`].
    #[must_use]
    pub const fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs)
    }
}

impl Default for OnboardingConfig {
    fn default() -> Self {
        Self {
            poll_interval_secs: 30,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_reference_deployment() {
        let config = Config::default();
        assert_eq!(config.api.base_url, "http://localhost:5002");
        assert_eq!(config.api.request_timeout(), Duration::from_secs(10));
        assert_eq!(config.onboarding.poll_interval(), Duration::from_secs(30));
    }

    #[test]
    fn default_config_validates() {
        assert!(Config::default().api.validate().is_ok());
    }

    #[test]
    fn validate_rejects_bad_base_url() {
        let mut api = ApiConfig::default();
        api.base_url = String::new();
        assert!(matches!(api.validate(), Err(Error::Config(_))));

        api.base_url = "ftp://example.com".into();
        assert!(matches!(api.validate(), Err(Error::Config(_))));
    }
}
