//! Configuration management for Ferry.
//!
//! This module provides TOML-based configuration loading, parsing, and
//! validation.
//!
//! # Overview
//!
//! Ferry uses TOML configuration files with support for:
//! - Environment variable substitution (`${VAR_NAME}`)
//! - Default values for optional settings
//! - Comprehensive validation
//! - Type-safe configuration structs
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use ferry::config::load_config;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! // Load configuration from file
//! let config = load_config("ferry.toml")?;
//!
//! // Access configuration sections
//! println!("Source: {}", config.source.path);
//! println!("Destination: {}", config.destination.path);
//! println!("Error budget: {}", config.migration.max_write_errors);
//! # Ok(())
//! # }
//! ```
//!
//! # Configuration Structure
//!
//! The configuration is organized into sections:
//!
//! - [`ApplicationConfig`] - Application settings (log level)
//! - [`SourceConfig`] - Source library path and extension filter
//! - [`DestinationConfig`] - Destination store path
//! - [`MigrationConfig`] - Error budget and channel capacity
//! - [`LoggingConfig`] - Logging configuration
//!
//! # Example Configuration
//!
//! ```toml
//! [application]
//! log_level = "info"
//!
//! [source]
//! path = "/photos/takeout"
//! extensions = ["jpg", "heic", "mp4"]
//!
//! [destination]
//! path = "${FERRY_LIBRARY_ROOT}"
//!
//! [migration]
//! max_write_errors = 5
//! group_buffer = 8
//! ```
//!
//! # Environment Variables
//!
//! Use `${VAR_NAME}` syntax for environment variable substitution:
//!
//! ```bash
//! export FERRY_LIBRARY_ROOT="/mnt/library"
//! ```
//!
//! Settings can also be overridden without touching the file through
//! `FERRY_<SECTION>_<KEY>` variables, such as `FERRY_SOURCE_PATH`.

pub mod loader;
pub mod schema;

// Re-export commonly used types
pub use loader::load_config;
pub use schema::{
    ApplicationConfig, DestinationConfig, FerryConfig, LoggingConfig, MigrationConfig,
    SourceConfig,
};
