//! # Application Error Types
//!
//! This module defines common error types used throughout the food-additives crate.
//! It provides structured error handling for configuration, table loading and analysis.

use std::fmt;

/// General application error type for consistent error handling
#[derive(Debug, Clone, PartialEq)]
pub enum AppError {
    /// Configuration validation errors
    Config(String),
    /// Validation errors (input text, severity tags, etc.)
    Validation(String),
    /// Reference table loading errors
    Load(String),
    /// Internal application errors
    Internal(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Config(msg) => write!(f, "[CONFIG] {}", msg),
            AppError::Validation(msg) => write!(f, "[VALIDATION] {}", msg),
            AppError::Load(msg) => write!(f, "[LOAD] {}", msg),
            AppError::Internal(msg) => write!(f, "[INTERNAL] {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::Internal(err.to_string())
    }
}

impl From<crate::load_errors::LoadError> for AppError {
    fn from(err: crate::load_errors::LoadError) -> Self {
        AppError::Load(err.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Internal(format!("JSON serialization failed: {}", err))
    }
}

/// Result type alias for convenience
pub type AppResult<T> = Result<T, AppError>;

/// Standardized error logging utilities for consistent error reporting across the crate
pub mod error_logging {
    use tracing::error;

    /// Log reference table load failures with source context
    pub fn log_load_error(
        error: &impl std::fmt::Display,
        operation: &str,
        path: Option<&str>,
    ) {
        error!(
            error = %error,
            operation = %operation,
            path = ?path,
            "Reference table load failed"
        );
    }

    /// Log configuration errors during startup/initialization
    pub fn log_config_error(error: &impl std::fmt::Display, config_key: &str, operation: &str) {
        error!(
            error = %error,
            config_key = %config_key,
            operation = %operation,
            "Configuration error"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::load_errors::LoadError;

    #[test]
    fn test_display_tags() {
        assert_eq!(
            AppError::Config("bad".to_string()).to_string(),
            "[CONFIG] bad"
        );
        assert_eq!(AppError::Load("gone".to_string()).to_string(), "[LOAD] gone");
    }

    #[test]
    fn test_from_load_error() {
        let err: AppError = LoadError::Open("missing.csv".to_string()).into();
        match err {
            AppError::Load(msg) => assert!(msg.contains("missing.csv")),
            other => panic!("unexpected error variant: {:?}", other),
        }
    }
}
