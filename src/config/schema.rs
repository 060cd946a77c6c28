//! Configuration schema types
//!
//! This module defines the configuration structure for Ferry.

use serde::{Deserialize, Serialize};

/// Main Ferry configuration
///
/// This is the root configuration structure that maps to the TOML file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FerryConfig {
    /// Application-level settings
    #[serde(default)]
    pub application: ApplicationConfig,

    /// Source library configuration
    pub source: SourceConfig,

    /// Destination store configuration
    pub destination: DestinationConfig,

    /// Migration run settings
    #[serde(default)]
    pub migration: MigrationConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl FerryConfig {
    /// Validates the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid
    pub fn validate(&self) -> Result<(), String> {
        self.application.validate()?;
        self.source.validate()?;
        self.destination.validate()?;

        if self.source.path == self.destination.path {
            return Err("source.path and destination.path must differ".to_string());
        }

        self.migration.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}

/// Application-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl ApplicationConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.log_level.as_str()) {
            return Err(format!(
                "Invalid log_level '{}'. Must be one of: {}",
                self.log_level,
                valid_levels.join(", ")
            ));
        }
        Ok(())
    }
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

/// Source library configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    /// Root directory of the source library
    pub path: String,

    /// Accepted file extensions (overrides the built-in media set)
    #[serde(default)]
    pub extensions: Option<Vec<String>>,
}

impl SourceConfig {
    fn validate(&self) -> Result<(), String> {
        if self.path.is_empty() {
            return Err("source.path cannot be empty".to_string());
        }

        if let Some(extensions) = &self.extensions {
            if extensions.is_empty() {
                return Err("source.extensions cannot be an empty list".to_string());
            }
            if extensions.iter().any(|e| e.trim_start_matches('.').is_empty()) {
                return Err("source.extensions entries cannot be empty".to_string());
            }
        }

        Ok(())
    }
}

/// Destination store configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DestinationConfig {
    /// Root directory of the destination store
    pub path: String,
}

impl DestinationConfig {
    fn validate(&self) -> Result<(), String> {
        if self.path.is_empty() {
            return Err("destination.path cannot be empty".to_string());
        }
        Ok(())
    }
}

/// Migration run settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MigrationConfig {
    /// Write failures tolerated before the run aborts
    #[serde(default = "default_max_write_errors")]
    pub max_write_errors: usize,

    /// Capacity of the bounded group channel between source and orchestrator
    #[serde(default = "default_group_buffer")]
    pub group_buffer: usize,
}

impl MigrationConfig {
    fn validate(&self) -> Result<(), String> {
        if self.group_buffer == 0 {
            return Err("migration.group_buffer must be > 0".to_string());
        }
        Ok(())
    }
}

impl Default for MigrationConfig {
    fn default() -> Self {
        Self {
            max_write_errors: default_max_write_errors(),
            group_buffer: default_group_buffer(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Enable local file logging
    #[serde(default)]
    pub local_enabled: bool,

    /// Local log directory
    #[serde(default = "default_local_path")]
    pub local_path: String,

    /// Log rotation strategy
    #[serde(default = "default_local_rotation")]
    pub local_rotation: String,

    /// Maximum log file size in MB
    #[serde(default = "default_local_max_size_mb")]
    pub local_max_size_mb: usize,
}

impl LoggingConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_rotations = ["daily", "hourly", "never"];
        if !valid_rotations.contains(&self.local_rotation.as_str()) {
            return Err(format!(
                "Invalid logging.local_rotation '{}'. Must be one of: {}",
                self.local_rotation,
                valid_rotations.join(", ")
            ));
        }

        if self.local_max_size_mb == 0 {
            return Err("logging.local_max_size_mb must be > 0".to_string());
        }

        Ok(())
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            local_enabled: false,
            local_path: default_local_path(),
            local_rotation: default_local_rotation(),
            local_max_size_mb: default_local_max_size_mb(),
        }
    }
}

// Default value functions
fn default_log_level() -> String {
    "info".to_string()
}

fn default_max_write_errors() -> usize {
    5
}

fn default_group_buffer() -> usize {
    8
}

fn default_local_path() -> String {
    "logs".to_string()
}

fn default_local_rotation() -> String {
    "daily".to_string()
}

fn default_local_max_size_mb() -> usize {
    100
}
