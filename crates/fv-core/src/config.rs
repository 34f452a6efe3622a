//! Client configuration.
//!
//! Configuration is loaded from environment variables with sensible
//! defaults, read once at startup. There is no runtime reconfiguration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// FileVault client configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VaultConfig {
    /// Identity-provider region.
    pub region: String,

    /// Identity-provider user pool identifier.
    pub user_pool_id: String,

    /// Identity-provider application client identifier.
    pub user_pool_client_id: String,

    /// Base URL of the backend REST API.
    pub api_endpoint: String,

    /// Inactivity timeout before automatic logout, in seconds.
    pub inactivity_timeout_secs: u64,

    /// Warning window before the inactivity timeout expires, in seconds.
    pub warning_window_secs: u64,
}

impl VaultConfig {
    /// Loads configuration from environment variables.
    ///
    /// Reads a `.env` file first if one exists. `FV_USER_POOL_ID`,
    /// `FV_USER_POOL_CLIENT_ID`, and `FV_API_ENDPOINT` are required;
    /// everything else has defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if a required variable is missing.
    pub fn from_env() -> anyhow::Result<Self> {
        let _ = dotenvy::dotenv();

        let region = std::env::var("FV_REGION").unwrap_or_else(|_| "us-east-1".to_string());

        let user_pool_id = std::env::var("FV_USER_POOL_ID")
            .map_err(|_| anyhow::anyhow!("FV_USER_POOL_ID environment variable is required"))?;

        let user_pool_client_id = std::env::var("FV_USER_POOL_CLIENT_ID").map_err(|_| {
            anyhow::anyhow!("FV_USER_POOL_CLIENT_ID environment variable is required")
        })?;

        let api_endpoint = std::env::var("FV_API_ENDPOINT")
            .map_err(|_| anyhow::anyhow!("FV_API_ENDPOINT environment variable is required"))?;

        let inactivity_timeout_secs = std::env::var("FV_INACTIVITY_TIMEOUT")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(300); // 5 minutes

        let warning_window_secs = std::env::var("FV_WARNING_WINDOW")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(60); // 1 minute

        Ok(Self {
            region,
            user_pool_id,
            user_pool_client_id,
            api_endpoint,
            inactivity_timeout_secs,
            warning_window_secs,
        })
    }

    /// Creates a configuration for testing.
    #[must_use]
    pub fn for_testing() -> Self {
        Self {
            region: "us-east-1".to_string(),
            user_pool_id: "test-pool".to_string(),
            user_pool_client_id: "test-client".to_string(),
            api_endpoint: "http://localhost:8080".to_string(),
            inactivity_timeout_secs: 300,
            warning_window_secs: 60,
        }
    }

    /// Returns the inactivity timeout as a duration.
    #[must_use]
    pub fn inactivity_timeout(&self) -> Duration {
        Duration::from_secs(self.inactivity_timeout_secs)
    }

    /// Returns the warning window as a duration.
    #[must_use]
    pub fn warning_window(&self) -> Duration {
        Duration::from_secs(self.warning_window_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn testing_config_has_default_timeouts() {
        let config = VaultConfig::for_testing();

        assert_eq!(config.inactivity_timeout(), Duration::from_secs(300));
        assert_eq!(config.warning_window(), Duration::from_secs(60));
    }

    #[test]
    fn warning_window_fits_inside_timeout() {
        let config = VaultConfig::for_testing();

        assert!(config.warning_window() < config.inactivity_timeout());
    }
}
