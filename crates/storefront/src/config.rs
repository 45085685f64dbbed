//! Client configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `CATALOG_API_BASE_URL` - Base URL of the catalog API (default: `http://127.0.0.1:5000/`)
//! - `CATALOG_REQUEST_TIMEOUT_SECS` - Per-request timeout in seconds (default: 30)
//! - `CATALOG_STORAGE_PATH` - Local key-value storage file (default: `.catalog-cart/storage.json`)
//! - `CATALOG_PAGE_SIZE` - Products shown per catalog page (default: 6)

use std::num::NonZeroUsize;
use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;
use url::Url;

use crate::catalog::DEFAULT_PAGE_SIZE;

const DEFAULT_BASE_URL: &str = "http://127.0.0.1:5000/";
const DEFAULT_TIMEOUT_SECS: u64 = 30;
const DEFAULT_STORAGE_PATH: &str = ".catalog-cart/storage.json";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Catalog client configuration.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// API base URL, always ending in `/` so endpoint paths join beneath it
    pub base_url: Url,
    /// Timeout applied to every request
    pub request_timeout: Duration,
    /// Location of the local key-value storage file
    pub storage_path: PathBuf,
    /// Products per catalog page
    pub page_size: NonZeroUsize,
}

impl ClientConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set but cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let base_url = parse_base_url(&get_env_or_default("CATALOG_API_BASE_URL", DEFAULT_BASE_URL))
            .map_err(|e| ConfigError::InvalidEnvVar("CATALOG_API_BASE_URL".to_string(), e))?;

        let timeout_secs = match get_optional_env("CATALOG_REQUEST_TIMEOUT_SECS") {
            Some(raw) => raw.parse::<u64>().ok().filter(|secs| *secs > 0).ok_or_else(|| {
                ConfigError::InvalidEnvVar(
                    "CATALOG_REQUEST_TIMEOUT_SECS".to_string(),
                    "must be a positive integer".to_string(),
                )
            })?,
            None => DEFAULT_TIMEOUT_SECS,
        };

        let page_size = match get_optional_env("CATALOG_PAGE_SIZE") {
            Some(raw) => raw.parse::<NonZeroUsize>().map_err(|e| {
                ConfigError::InvalidEnvVar("CATALOG_PAGE_SIZE".to_string(), e.to_string())
            })?,
            None => DEFAULT_PAGE_SIZE,
        };

        let storage_path =
            PathBuf::from(get_env_or_default("CATALOG_STORAGE_PATH", DEFAULT_STORAGE_PATH));

        Ok(Self {
            base_url,
            request_timeout: Duration::from_secs(timeout_secs),
            storage_path,
            page_size,
        })
    }

    /// Configuration pointing at `base_url` with every other value defaulted.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if `base_url` is not an absolute http(s) URL.
    pub fn for_base_url(base_url: &str) -> Result<Self, ConfigError> {
        let base_url = parse_base_url(base_url)
            .map_err(|e| ConfigError::InvalidEnvVar("base_url".to_string(), e))?;
        Ok(Self {
            base_url,
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            storage_path: PathBuf::from(DEFAULT_STORAGE_PATH),
            page_size: DEFAULT_PAGE_SIZE,
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Parse a base URL, appending the trailing slash `Url::join` needs.
fn parse_base_url(raw: &str) -> Result<Url, String> {
    let mut url = Url::parse(raw.trim()).map_err(|e| e.to_string())?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(format!("unsupported scheme '{}'", url.scheme()));
    }
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_base_url_appends_slash() {
        let url = parse_base_url("https://api.example.com/v1").unwrap();
        assert_eq!(url.as_str(), "https://api.example.com/v1/");
        assert_eq!(url.join("login/").unwrap().as_str(), "https://api.example.com/v1/login/");
    }

    #[test]
    fn test_parse_base_url_keeps_existing_slash() {
        let url = parse_base_url("http://127.0.0.1:5000/").unwrap();
        assert_eq!(url.as_str(), "http://127.0.0.1:5000/");
    }

    #[test]
    fn test_parse_base_url_rejects_other_schemes() {
        assert!(parse_base_url("ftp://example.com/").is_err());
        assert!(parse_base_url("not a url").is_err());
    }

    #[test]
    fn test_for_base_url_defaults() {
        let config = ClientConfig::for_base_url("http://localhost:5000").unwrap();
        assert_eq!(config.base_url.as_str(), "http://localhost:5000/");
        assert_eq!(config.page_size.get(), 6);
        assert_eq!(config.request_timeout, Duration::from_secs(30));
    }
}
