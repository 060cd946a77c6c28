//! Result type alias for Ferry operations

use super::errors::FerryError;

/// Type alias for Results with FerryError
///
/// This simplifies function signatures throughout the codebase.
pub type Result<T> = std::result::Result<T, FerryError>;
