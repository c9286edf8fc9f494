//! # API Configuration
//!
//! Configuration for the remote API boundary.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                            │
//! │     STOCKLINE_ENDPOINT=https://api.example.com/graphql                  │
//! │     STOCKLINE_TOKEN=eyJhbGciOi...                                       │
//! │                                                                         │
//! │  2. TOML Config File                                                    │
//! │     ~/.config/stockline/api.toml (Linux)                                │
//! │     ~/Library/Application Support/com.stockline.stockline/api.toml      │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                    │
//! │     localhost endpoint, anonymous session                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # api.toml
//! endpoint = "https://api.example.com/graphql"
//! connect_timeout_secs = 10
//! request_timeout_secs = 30
//! max_concurrent_fetches = 8
//! expiry_alert_days = 30
//! low_stock_threshold = 10
//! ```
//!
//! The bearer token is intentionally not written to disk by [`ApiConfig::save`];
//! it only ever arrives via environment or caller.

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use url::Url;

use crate::error::{ApiError, ApiResult};

// =============================================================================
// Defaults
// =============================================================================

fn default_endpoint() -> String {
    "http://localhost:4000/graphql".to_string()
}

fn default_connect_timeout() -> u64 {
    10
}

fn default_request_timeout() -> u64 {
    30
}

fn default_max_concurrent_fetches() -> usize {
    8
}

fn default_expiry_alert_days() -> u32 {
    stockline_core::DEFAULT_EXPIRY_ALERT_DAYS
}

fn default_low_stock_threshold() -> i64 {
    10
}

// =============================================================================
// Main API Configuration
// =============================================================================

/// Complete API boundary configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// GraphQL endpoint URL (http or https).
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Bearer token attached to every request when present. Absent means an
    /// anonymous session: identity-requiring queries will fail closed.
    #[serde(skip)]
    pub bearer_token: Option<String>,

    /// TCP connect timeout (seconds).
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,

    /// Whole-request timeout (seconds).
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,

    /// Upper bound on concurrently in-flight fetches during a fan-out
    /// (month/year aggregation). Must be at least 1.
    #[serde(default = "default_max_concurrent_fetches")]
    pub max_concurrent_fetches: usize,

    /// Day window passed to the expiry alert feed.
    #[serde(default = "default_expiry_alert_days")]
    pub expiry_alert_days: u32,

    /// Quantity threshold passed to the low-stock alert feed.
    #[serde(default = "default_low_stock_threshold")]
    pub low_stock_threshold: i64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        ApiConfig {
            endpoint: default_endpoint(),
            bearer_token: None,
            connect_timeout_secs: default_connect_timeout(),
            request_timeout_secs: default_request_timeout(),
            max_concurrent_fetches: default_max_concurrent_fetches(),
            expiry_alert_days: default_expiry_alert_days(),
            low_stock_threshold: default_low_stock_threshold(),
        }
    }
}

impl ApiConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (api.toml)
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> ApiResult<Self> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading API config from file");
                let contents = std::fs::read_to_string(&path)?;
                config = toml::from_str(&contents)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Loads config or returns default if load fails.
    pub fn load_or_default(config_path: Option<PathBuf>) -> Self {
        Self::load(config_path).unwrap_or_else(|e| {
            warn!("Failed to load API config: {}. Using defaults.", e);
            Self::default()
        })
    }

    /// Saves configuration to file. The bearer token is never persisted.
    pub fn save(&self, config_path: Option<PathBuf>) -> ApiResult<()> {
        let path = config_path
            .or_else(Self::default_config_path)
            .ok_or_else(|| ApiError::ConfigSaveFailed("No config path available".into()))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)?;
        std::fs::write(&path, contents)?;

        info!(?path, "API config saved");
        Ok(())
    }

    /// Validates the configuration.
    pub fn validate(&self) -> ApiResult<()> {
        let url = Url::parse(&self.endpoint)?;
        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(ApiError::InvalidEndpoint(format!(
                "Endpoint must be http or https, got: {}",
                self.endpoint
            )));
        }

        if self.max_concurrent_fetches == 0 {
            return Err(ApiError::InvalidConfig(
                "max_concurrent_fetches must be at least 1".into(),
            ));
        }

        Ok(())
    }

    /// Applies environment variable overrides.
    fn apply_env_overrides(&mut self) {
        if let Ok(endpoint) = std::env::var("STOCKLINE_ENDPOINT") {
            debug!(endpoint = %endpoint, "Overriding endpoint from environment");
            self.endpoint = endpoint;
        }

        if let Ok(token) = std::env::var("STOCKLINE_TOKEN") {
            self.bearer_token = Some(token);
        }

        if let Ok(n) = std::env::var("STOCKLINE_MAX_CONCURRENT_FETCHES") {
            if let Ok(parsed) = n.parse::<usize>() {
                self.max_concurrent_fetches = parsed;
            }
        }

        if let Ok(days) = std::env::var("STOCKLINE_EXPIRY_ALERT_DAYS") {
            if let Ok(parsed) = days.parse::<u32>() {
                self.expiry_alert_days = parsed;
            }
        }

        if let Ok(threshold) = std::env::var("STOCKLINE_LOW_STOCK_THRESHOLD") {
            if let Ok(parsed) = threshold.parse::<i64>() {
                self.low_stock_threshold = parsed;
            }
        }
    }

    /// Returns the default config file path.
    fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "stockline", "stockline")
            .map(|dirs| dirs.config_dir().join("api.toml"))
    }

    // =========================================================================
    // Convenience Methods
    // =========================================================================

    /// TCP connect timeout as a [`Duration`].
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    /// Whole-request timeout as a [`Duration`].
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ApiConfig::default();
        assert_eq!(config.endpoint, "http://localhost:4000/graphql");
        assert_eq!(config.max_concurrent_fetches, 8);
        assert_eq!(config.expiry_alert_days, 30);
        assert!(config.bearer_token.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation() {
        let mut config = ApiConfig::default();

        config.endpoint = "not a url".to_string();
        assert!(config.validate().is_err());

        config.endpoint = "ftp://example.com/graphql".to_string();
        assert!(config.validate().is_err());

        config.endpoint = "https://example.com/graphql".to_string();
        assert!(config.validate().is_ok());

        config.max_concurrent_fetches = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_toml_round_trip_skips_token() {
        let mut config = ApiConfig::default();
        config.bearer_token = Some("secret".to_string());

        let toml_str = toml::to_string_pretty(&config).unwrap();
        assert!(toml_str.contains("endpoint"));
        assert!(!toml_str.contains("secret"));

        let reloaded: ApiConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(reloaded.endpoint, config.endpoint);
        assert!(reloaded.bearer_token.is_none());
    }
}
