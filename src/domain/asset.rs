//! Asset domain model
//!
//! This module defines the core Asset type moved by a migration, together
//! with the AssetGroup unit the orchestrator consumes.

use chrono::{DateTime, Utc};
use std::io::Cursor;
use std::path::PathBuf;
use tokio::io::AsyncRead;

use super::errors::SourceError;
use super::result::Result;

/// Backing resource for an asset's content
///
/// An asset either points at a file on disk, carries its bytes in memory,
/// or has been released and can no longer be read.
#[derive(Debug, Clone)]
pub enum AssetPayload {
    /// Content lives in a file at this path
    File(PathBuf),

    /// Content is held in memory
    Memory(Vec<u8>),

    /// The resource handle was released; reads are no longer possible
    Released,
}

/// A single media item flowing through the migration pipeline
///
/// Assets are produced by a source, classified against the destination and
/// released exactly once by the orchestrator when their outcome is decided.
///
/// # Examples
///
/// ```
/// use ferry::domain::asset::Asset;
///
/// let mut asset = Asset::from_memory("IMG_0001.jpg", vec![0xFF, 0xD8, 0xFF]);
/// assert_eq!(asset.size, 3);
/// assert!(!asset.is_released());
///
/// asset.release();
/// assert!(asset.is_released());
/// ```
#[derive(Debug, Clone)]
pub struct Asset {
    /// Base file name of the asset, including extension
    pub file_name: String,

    /// Capture timestamp, when one is known
    pub taken_at: Option<DateTime<Utc>>,

    /// Content size in bytes
    pub size: u64,

    /// Backing resource for the asset's content
    pub payload: AssetPayload,
}

impl Asset {
    /// Creates an asset backed by a file on disk
    pub fn from_file(
        file_name: impl Into<String>,
        path: PathBuf,
        size: u64,
        taken_at: Option<DateTime<Utc>>,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            taken_at,
            size,
            payload: AssetPayload::File(path),
        }
    }

    /// Creates an asset backed by an in-memory buffer
    pub fn from_memory(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            taken_at: None,
            size: bytes.len() as u64,
            payload: AssetPayload::Memory(bytes),
        }
    }

    /// Sets the capture timestamp
    pub fn with_taken_at(mut self, taken_at: DateTime<Utc>) -> Self {
        self.taken_at = Some(taken_at);
        self
    }

    /// Opens a reader over the asset's content
    ///
    /// # Errors
    ///
    /// Returns an error if the backing file cannot be opened or if the
    /// handle was already released.
    pub async fn reader(&self) -> Result<Box<dyn AsyncRead + Send + Unpin>> {
        match &self.payload {
            AssetPayload::File(path) => {
                let file = tokio::fs::File::open(path)
                    .await
                    .map_err(|e| SourceError::Read {
                        name: self.file_name.clone(),
                        reason: e.to_string(),
                    })?;
                Ok(Box::new(file))
            }
            AssetPayload::Memory(bytes) => Ok(Box::new(Cursor::new(bytes.clone()))),
            AssetPayload::Released => {
                Err(SourceError::HandleReleased(self.file_name.clone()).into())
            }
        }
    }

    /// Releases the asset's resource handle
    ///
    /// Safe to call more than once; releasing an already-released asset
    /// is a no-op.
    pub fn release(&mut self) {
        self.payload = AssetPayload::Released;
    }

    /// Returns `true` once the resource handle has been released
    pub fn is_released(&self) -> bool {
        matches!(self.payload, AssetPayload::Released)
    }
}

/// A batch of assets that belong together
///
/// Groups are the unit of delivery from a source to the orchestrator. The
/// origin names where the group came from, such as a source directory.
#[derive(Debug, Clone)]
pub struct AssetGroup {
    /// Human-readable origin of the group
    pub origin: String,

    /// The assets in this group, in source order
    pub assets: Vec<Asset>,
}

impl AssetGroup {
    /// Creates a new group
    pub fn new(origin: impl Into<String>, assets: Vec<Asset>) -> Self {
        Self {
            origin: origin.into(),
            assets,
        }
    }

    /// Number of assets in the group
    pub fn len(&self) -> usize {
        self.assets.len()
    }

    /// Whether the group holds no assets
    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }
}
