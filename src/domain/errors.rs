//! Domain error types
//!
//! This module defines the error hierarchy for Ferry. All errors are
//! domain-specific and don't expose third-party types.

use thiserror::Error;

/// Main Ferry error type
///
/// This is the primary error type used throughout the application.
/// It wraps specific error types and provides context for error handling.
#[derive(Debug, Error)]
pub enum FerryError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Source-related errors
    #[error("Source error: {0}")]
    Source(#[from] SourceError),

    /// Destination-related errors
    #[error("Destination error: {0}")]
    Destination(#[from] DestinationError),

    /// The run was cancelled before the source was exhausted
    #[error("Migration cancelled before completion")]
    Cancelled,

    /// The write-error budget was exceeded and the run aborted
    #[error("Too many errors, aborting: {failed} write failures exceeded the limit of {limit}")]
    TooManyErrors {
        /// Write failures accumulated when the run aborted
        failed: usize,
        /// Configured error budget
        limit: usize,
    },

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// Generic errors with context
    #[error("{0}")]
    Other(String),
}

impl FerryError {
    /// Whether this error aborts a run because the error budget was spent.
    pub fn is_budget_exhausted(&self) -> bool {
        matches!(self, FerryError::TooManyErrors { .. })
    }
}

/// Source-specific errors
///
/// Errors that occur while enumerating or reading assets from a source.
#[derive(Debug, Error)]
pub enum SourceError {
    /// Source root directory does not exist or is not readable
    #[error("Source root not found: {0}")]
    RootNotFound(String),

    /// Failed to enumerate the source collection
    #[error("Failed to enumerate source: {0}")]
    Enumeration(String),

    /// Failed to open or read one asset's content
    #[error("Failed to read asset {name}: {reason}")]
    Read {
        /// Logical asset name
        name: String,
        /// Underlying cause
        reason: String,
    },

    /// The asset's resource handle was already released
    #[error("Asset handle already released: {0}")]
    HandleReleased(String),
}

/// Destination-specific errors
///
/// Errors that occur while scanning or writing to a destination store.
/// `AlreadyExists` is the recognizable duplicate classification the
/// orchestrator relies on; it is an expected outcome, not a failure.
#[derive(Debug, Error)]
pub enum DestinationError {
    /// The destination already holds an asset at this path
    #[error("Asset already exists at destination: {0}")]
    AlreadyExists(String),

    /// Destination root directory does not exist and could not be created
    #[error("Destination root not available: {0}")]
    RootUnavailable(String),

    /// Failed to enumerate already-present destination entries
    #[error("Failed to scan destination: {0}")]
    Scan(String),

    /// Failed to persist one asset
    #[error("Failed to write asset {name}: {reason}")]
    Write {
        /// Destination-relative path of the asset
        name: String,
        /// Underlying cause
        reason: String,
    },
}

impl DestinationError {
    /// Returns `true` for the duplicate classification.
    ///
    /// Duplicate writes are skips in the migration outcome model and never
    /// count toward the error budget.
    pub fn is_already_exists(&self) -> bool {
        matches!(self, DestinationError::AlreadyExists(_))
    }
}

// Conversion from std::io::Error
impl From<std::io::Error> for FerryError {
    fn from(err: std::io::Error) -> Self {
        FerryError::Io(err.to_string())
    }
}

// Conversion from serde_json::Error
impl From<serde_json::Error> for FerryError {
    fn from(err: serde_json::Error) -> Self {
        FerryError::Other(format!("Serialization error: {err}"))
    }
}

// Conversion from toml parse errors
impl From<toml::de::Error> for FerryError {
    fn from(err: toml::de::Error) -> Self {
        FerryError::Configuration(format!("TOML parse error: {err}"))
    }
}
