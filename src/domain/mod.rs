//! Domain models and types
//!
//! This module contains the core domain types for Ferry:
//! - Asset and AssetGroup models for the migration pipeline
//! - Error types and Result alias

pub mod asset;
pub mod errors;
pub mod result;

// Re-export commonly used types
pub use asset::{Asset, AssetGroup, AssetPayload};
pub use errors::{DestinationError, FerryError, SourceError};
pub use result::Result;
