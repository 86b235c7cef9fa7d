//! Error types and handling for the Reddit relay gateway

use serde::Serialize;
use thiserror::Error;

/// Application error types surfaced to MCP callers and the CLI
#[derive(Debug, Serialize, Error)]
pub enum AppError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Network error: {0}")]
    NetworkError(String),
    #[error("Backend error: {0}")]
    ApiError(String),
    #[error("Timeout: {0}")]
    Timeout(String),
    #[error("Parse error: {0}")]
    ParseError(String),
    #[error("Configuration error: {0}")]
    ConfigError(String),
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Get the error code for MCP responses
    pub fn error_code(&self) -> &'static str {
        match self {
            AppError::InvalidInput(_) => "invalid_input",
            AppError::NetworkError(_) => "network_error",
            AppError::ApiError(_) => "backend_error",
            AppError::Timeout(_) => "timeout",
            AppError::ParseError(_) => "parse_error",
            AppError::ConfigError(_) => "config_error",
            AppError::Internal(_) => "internal_error",
        }
    }

    /// Get the error message
    pub fn message(&self) -> String {
        self.to_string()
    }
}

/// Convert anyhow::Error to AppError
impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::Internal(err.to_string())
    }
}

/// Convert reqwest::Error to AppError
impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            AppError::Timeout(err.to_string())
        } else {
            AppError::NetworkError(err.to_string())
        }
    }
}

/// Convert serde_json::Error to AppError
impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::ParseError(err.to_string())
    }
}

/// Validate the shared `limit` argument, defaulting to 25 when omitted
pub fn validate_limit(limit: Option<u32>) -> Result<u32, AppError> {
    match limit {
        None => Ok(25),
        Some(l) if (1..=100).contains(&l) => Ok(l),
        Some(l) => Err(AppError::InvalidInput(format!(
            "limit must be between 1 and 100, got {}",
            l
        ))),
    }
}

/// Reject empty required string fields before any backend call is made
pub fn validate_non_empty(field: &str, value: &str) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::InvalidInput(format!("{} cannot be empty", field)));
    }
    Ok(())
}
