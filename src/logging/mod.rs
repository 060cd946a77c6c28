//! Logging and observability
//!
//! This module provides structured logging with support for:
//! - Configurable log levels
//! - Console output for interactive use
//! - Local JSON file logging with rotation
//!
//! # Example
//!
//! ```no_run
//! use ferry::logging::init_logging;
//! use ferry::config::LoggingConfig;
//!
//! let config = LoggingConfig::default();
//! let _guard = init_logging("info", &config).expect("Failed to initialize logging");
//!
//! // Use tracing macros for logging
//! tracing::info!("Application started");
//! tracing::error!(error = "Something went wrong", "Error occurred");
//! ```

pub mod structured;

// Re-export commonly used items
pub use structured::{init_logging, LoggingGuard};

/// Log the start of a migration run
///
/// # Example
///
/// ```no_run
/// use ferry::log_migration_start;
///
/// log_migration_start!("folder /photos/takeout", "folder /photos/library");
/// ```
#[macro_export]
macro_rules! log_migration_start {
    ($source:expr, $destination:expr) => {
        tracing::info!(
            source = %$source,
            destination = %$destination,
            "Starting migration"
        );
    };
}

/// Log an error with context
///
/// # Example
///
/// ```no_run
/// use ferry::log_error_with_context;
/// use ferry::domain::FerryError;
///
/// let error = FerryError::Configuration("Invalid config".to_string());
/// log_error_with_context!(&error, "Failed to load configuration");
/// ```
#[macro_export]
macro_rules! log_error_with_context {
    ($error:expr, $context:expr) => {
        tracing::error!(
            error = %$error,
            context = $context,
            "Error occurred"
        );
    };
}
