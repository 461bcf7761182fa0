//! # Unified Application Configuration
//!
//! This module consolidates all settings into a single structured configuration
//! object, loaded from environment variables and validated at startup.

use crate::errors::{AppError, AppResult};
use crate::load_errors::LoadError;
use crate::localization::SUPPORTED_LANGUAGES;
use crate::observability_config::ObservabilityConfig;
use crate::reference_table::{
    bundled_reference_table, load_reference_table_from_path, ReferenceTable,
};
use crate::text_processing::MatcherConfig;
use std::env;
use std::path::PathBuf;

/// Where the additive reference table comes from
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReferenceTableConfig {
    /// Path to a table file; the bundled table is used when unset
    pub path: Option<PathBuf>,
}

impl ReferenceTableConfig {
    /// Validate reference table configuration
    pub fn validate(&self) -> AppResult<()> {
        if let Some(path) = &self.path {
            if path.as_os_str().is_empty() {
                return Err(AppError::Config(
                    "Reference table path cannot be empty".to_string(),
                ));
            }
        }
        Ok(())
    }

    /// Load the configured table
    ///
    /// An unreadable path (missing file, directory, bad encoding) is a load error,
    /// not a config error, so callers can fall back to an empty table.
    pub fn load(&self) -> Result<ReferenceTable, LoadError> {
        match &self.path {
            Some(path) => load_reference_table_from_path(path),
            None => Ok(bundled_reference_table()),
        }
    }
}

/// Main application configuration
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// Reference table source
    pub table: ReferenceTableConfig,
    /// Matcher settings
    pub matcher: MatcherConfig,
    /// Language for report messages
    pub language: String,
    /// Logging and metrics
    pub observability: ObservabilityConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            table: ReferenceTableConfig::default(),
            matcher: MatcherConfig::default(),
            language: "en".to_string(),
            observability: ObservabilityConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> AppResult<Self> {
        let mut config = Self::from_lookup(|key| env::var(key).ok())?;
        config.observability = ObservabilityConfig::from_env();
        Ok(config)
    }

    /// Load configuration through a key lookup function
    pub fn from_lookup<F>(lookup: F) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        config.table.path = lookup("ADDITIVES_TABLE_PATH")
            .filter(|path| !path.trim().is_empty())
            .map(PathBuf::from);

        if let Some(language) = lookup("ADDITIVES_LANGUAGE") {
            config.language = language.trim().to_lowercase();
        }

        if let Some(delimiters) = lookup("ADDITIVES_DELIMITERS") {
            config.matcher.delimiters = delimiters.chars().collect();
        }

        Ok(config)
    }

    /// Validate all configuration sections
    pub fn validate(&self) -> AppResult<()> {
        self.table.validate()?;
        self.matcher.validate()?;
        if !SUPPORTED_LANGUAGES.contains(&self.language.as_str()) {
            return Err(AppError::Config(format!(
                "Unsupported language '{}', expected one of: {}",
                self.language,
                SUPPORTED_LANGUAGES.join(", ")
            )));
        }
        self.observability.validate().map_err(AppError::Config)?;
        Ok(())
    }

    /// Get a summary of the current configuration for logging
    pub fn summary(&self) -> String {
        format!(
            "Configuration: table={}, language={}, delimiters={:?}, environment={}",
            self.table
                .path
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "bundled".to_string()),
            self.language,
            self.matcher.delimiters.iter().collect::<String>(),
            self.observability.environment
        )
    }
}
