//! Engine configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All variables are optional; defaults suit local development.
//!
//! - `CARTWHEEL_DATA_DIR` - Directory for persisted state (default: `.cartwheel`)
//! - `CARTWHEEL_CATALOG_URL` - Base URL of the product catalog
//!   (default: `https://fakestoreapi.com`)
//! - `CARTWHEEL_CATALOG_TIMEOUT_SECS` - HTTP timeout for catalog requests
//!   (default: 10)
//! - `CARTWHEEL_CATALOG_CACHE_TTL_SECS` - TTL for cached catalog responses
//!   (default: 300)
//! - `CARTWHEEL_REFERENCE_USER_ID` - Id of the catalog user record used as
//!   the login credential source (default: 1)

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;
use url::Url;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Engine configuration.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Directory holding the persisted key-value store.
    pub data_dir: PathBuf,
    /// Product catalog client configuration.
    pub catalog: CatalogConfig,
}

/// Product catalog client configuration.
#[derive(Debug, Clone)]
pub struct CatalogConfig {
    /// Base URL of the catalog API.
    pub base_url: Url,
    /// Per-request HTTP timeout.
    pub timeout: Duration,
    /// How long catalog responses are cached.
    pub cache_ttl: Duration,
    /// Id of the reference user record used for test-credential login.
    pub reference_user_id: i32,
}

impl EngineConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from a `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set but cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let data_dir = PathBuf::from(get_env_or_default("CARTWHEEL_DATA_DIR", ".cartwheel"));
        let catalog = CatalogConfig::from_env()?;

        Ok(Self { data_dir, catalog })
    }
}

impl CatalogConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let base_url = parse_base_url(&get_env_or_default(
            "CARTWHEEL_CATALOG_URL",
            "https://fakestoreapi.com",
        ))?;
        let timeout = Duration::from_secs(parse_env_u64("CARTWHEEL_CATALOG_TIMEOUT_SECS", 10)?);
        let cache_ttl =
            Duration::from_secs(parse_env_u64("CARTWHEEL_CATALOG_CACHE_TTL_SECS", 300)?);
        let reference_user_id = get_env_or_default("CARTWHEEL_REFERENCE_USER_ID", "1")
            .parse::<i32>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("CARTWHEEL_REFERENCE_USER_ID".to_string(), e.to_string())
            })?;

        Ok(Self {
            base_url,
            timeout,
            cache_ttl,
            reference_user_id,
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Parse an environment variable as u64, with a default when unset.
fn parse_env_u64(key: &str, default: u64) -> Result<u64, ConfigError> {
    match std::env::var(key) {
        Ok(value) => value
            .parse::<u64>()
            .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string())),
        Err(_) => Ok(default),
    }
}

/// Parse and validate the catalog base URL.
fn parse_base_url(raw: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(raw).map_err(|e| {
        ConfigError::InvalidEnvVar("CARTWHEEL_CATALOG_URL".to_string(), e.to_string())
    })?;

    if url.host_str().is_none() {
        return Err(ConfigError::InvalidEnvVar(
            "CARTWHEEL_CATALOG_URL".to_string(),
            "URL must have a host".to_string(),
        ));
    }

    Ok(url)
}
