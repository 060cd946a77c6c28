//! Destination store abstraction
//!
//! This module defines the traits that destination adapters must implement
//! to receive assets from the migration orchestrator, plus the folder-based
//! implementation.

use std::collections::HashSet;

use async_trait::async_trait;

use crate::domain::{Asset, DestinationError};

pub mod folder;

pub use folder::FolderWriter;

/// Sink for migrated assets
///
/// Writers classify every attempt as written, already-present, or failed.
/// The already-present classification (`DestinationError::AlreadyExists`)
/// is an expected outcome the orchestrator turns into a skip.
#[async_trait]
pub trait AssetWriter: Send + Sync {
    /// Persists one asset
    ///
    /// # Errors
    ///
    /// Returns `DestinationError::AlreadyExists` when the destination already
    /// holds an asset at the computed path, and other variants for genuine
    /// failures. A failed write must leave no partial asset behind.
    async fn write_asset(&self, asset: &mut Asset) -> Result<(), DestinationError>;

    /// Human-readable description of the destination for logs and prompts
    fn describe(&self) -> String;

    /// Optional fast-path capability: local enumeration of existing assets
    ///
    /// Destinations that can cheaply list what they already hold return
    /// `Some`, which lets the orchestrator skip duplicate writes without
    /// attempting them. The default is `None`; absence only disables the
    /// fast path, it is never an error.
    fn as_inventory(&self) -> Option<&dyn DestinationInventory> {
        None
    }
}

/// Local-enumeration capability of a destination
///
/// `scan_existing` and `relative_path_of` must agree: an asset whose
/// computed path is in the scanned set is already present.
#[async_trait]
pub trait DestinationInventory: Send + Sync {
    /// Enumerates the destination-relative paths of every asset already held
    ///
    /// # Errors
    ///
    /// Returns an error if the destination cannot be enumerated. Callers
    /// treat this as fatal for the run.
    async fn scan_existing(&self) -> Result<HashSet<String>, DestinationError>;

    /// Computes the destination-relative path this destination would store
    /// the asset under
    ///
    /// Pure and deterministic: the same asset metadata always yields the
    /// same path, with forward-slash separators.
    fn relative_path_of(&self, asset: &Asset) -> String;
}
