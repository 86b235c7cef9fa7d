//! Startup configuration
//!
//! One required credential (the backend API key) read once from the
//! environment; the backend base URL is fixed but overridable for local
//! testing.

use crate::error::AppError;

/// Hosted backend that holds the actual Reddit credentials
pub const DEFAULT_BASE_URL: &str = "https://api.redditrelay.dev";

const API_KEY_VAR: &str = "REDDIT_RELAY_API_KEY";
const BASE_URL_VAR: &str = "REDDIT_RELAY_BASE_URL";

/// Process-wide configuration, read-only after startup
#[derive(Debug, Clone)]
pub struct Config {
    pub api_key: String,
    pub base_url: String,
}

impl Config {
    /// Read configuration from the environment
    ///
    /// A missing or empty API key is a fatal startup error.
    pub fn from_env() -> Result<Self, AppError> {
        let api_key = std::env::var(API_KEY_VAR)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| {
                AppError::ConfigError(format!(
                    "{} environment variable is required",
                    API_KEY_VAR
                ))
            })?;

        let base_url = std::env::var(BASE_URL_VAR)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        Ok(Self::new(api_key, base_url))
    }

    /// Construct a configuration directly
    pub fn new(api_key: impl Into<String>, base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            api_key: api_key.into(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trailing_slash_stripped() {
        let config = Config::new("key", "http://localhost:8080/");
        assert_eq!(config.base_url, "http://localhost:8080");
    }

    #[test]
    fn test_default_base_url_is_https() {
        assert!(DEFAULT_BASE_URL.starts_with("https://"));
    }
}
