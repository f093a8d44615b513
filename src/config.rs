//! Configuration Module
//!
//! Handles loading client configuration from environment variables.

use std::env;
use std::time::Duration;

/// Backing store connection parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the backing parameter store
    pub endpoint: String,
    /// Region used when a caller does not name one explicitly
    pub default_region: String,
    /// Timeout applied to each fetch request, in seconds
    pub request_timeout_secs: u64,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `PARAM_STORE_ENDPOINT` - Base URL of the store (default: `http://127.0.0.1:4583`)
    /// - `PARAM_STORE_REGION` - Default region (default: `eu-west-1`)
    /// - `PARAM_STORE_TIMEOUT_SECS` - Per-request timeout in seconds (default: 30)
    pub fn from_env() -> Self {
        Self {
            endpoint: env::var("PARAM_STORE_ENDPOINT")
                .unwrap_or_else(|_| "http://127.0.0.1:4583".to_string()),
            default_region: env::var("PARAM_STORE_REGION")
                .unwrap_or_else(|_| "eu-west-1".to_string()),
            request_timeout_secs: env::var("PARAM_STORE_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(30),
        }
    }

    /// Returns the per-request timeout as a Duration.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoint: "http://127.0.0.1:4583".to_string(),
            default_region: "eu-west-1".to_string(),
            request_timeout_secs: 30,
        }
    }
}
