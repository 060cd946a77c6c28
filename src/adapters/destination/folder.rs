//! Folder-based destination store
//!
//! Lays assets out under `YYYY/YYYY-MM/<file name>` from the capture
//! timestamp, or `undated/<file name>` when no timestamp is known. An
//! existing file at the target path is reported as a duplicate, never
//! overwritten.

use std::collections::HashSet;
use std::path::PathBuf;

use async_trait::async_trait;
use tokio::io::AsyncWriteExt;

use crate::domain::{Asset, DestinationError};

use super::{AssetWriter, DestinationInventory};

/// Destination store backed by a local directory tree
pub struct FolderWriter {
    root: PathBuf,
}

impl FolderWriter {
    /// Creates a folder writer rooted at `root`
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Creates the destination root if it does not exist yet
    ///
    /// # Errors
    ///
    /// Returns `DestinationError::RootUnavailable` if the directory cannot
    /// be created.
    pub async fn ensure_root(&self) -> Result<(), DestinationError> {
        tokio::fs::create_dir_all(&self.root)
            .await
            .map_err(|e| {
                DestinationError::RootUnavailable(format!("{}: {}", self.root.display(), e))
            })
    }

    /// Destination-relative layout path for an asset
    ///
    /// Forward-slash separators on every platform, so layout paths can be
    /// compared against scan keys directly.
    fn layout(asset: &Asset) -> String {
        match asset.taken_at {
            Some(taken_at) => format!(
                "{}/{}/{}",
                taken_at.format("%Y"),
                taken_at.format("%Y-%m"),
                asset.file_name
            ),
            None => format!("undated/{}", asset.file_name),
        }
    }
}

#[async_trait]
impl AssetWriter for FolderWriter {
    async fn write_asset(&self, asset: &mut Asset) -> Result<(), DestinationError> {
        let relative = Self::layout(asset);
        let target = self.root.join(&relative);

        // Open the payload before touching the destination so an unreadable
        // source never creates a destination file.
        let mut reader = asset.reader().await.map_err(|e| DestinationError::Write {
            name: relative.clone(),
            reason: e.to_string(),
        })?;

        if let Some(parent) = target.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| DestinationError::Write {
                    name: relative.clone(),
                    reason: format!("{}: {}", parent.display(), e),
                })?;
        }

        // create_new makes an existing file surface atomically as the
        // duplicate classification instead of being overwritten.
        let mut file = match tokio::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&target)
            .await
        {
            Ok(file) => file,
            Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => {
                return Err(DestinationError::AlreadyExists(relative));
            }
            Err(e) => {
                return Err(DestinationError::Write {
                    name: relative,
                    reason: e.to_string(),
                });
            }
        };

        let copied = tokio::io::copy(&mut reader, &mut file).await;
        let flushed = match copied {
            Ok(_) => file.flush().await,
            Err(e) => Err(e),
        };

        if let Err(e) = flushed {
            drop(file);
            // Remove the partial file so a re-run can retry this asset.
            if let Err(cleanup) = tokio::fs::remove_file(&target).await {
                tracing::warn!(
                    path = %target.display(),
                    error = %cleanup,
                    "Failed to remove partial file"
                );
            }
            return Err(DestinationError::Write {
                name: relative,
                reason: e.to_string(),
            });
        }

        tracing::debug!(path = %relative, size = asset.size, "Wrote asset");
        Ok(())
    }

    fn describe(&self) -> String {
        format!("folder {}", self.root.display())
    }

    fn as_inventory(&self) -> Option<&dyn DestinationInventory> {
        Some(self)
    }
}

#[async_trait]
impl DestinationInventory for FolderWriter {
    async fn scan_existing(&self) -> Result<HashSet<String>, DestinationError> {
        let mut existing = HashSet::new();
        if tokio::fs::metadata(&self.root).await.is_err() {
            // Nothing written yet; an absent root holds no assets.
            return Ok(existing);
        }

        let mut pending = vec![self.root.clone()];
        while let Some(dir) = pending.pop() {
            let mut entries = tokio::fs::read_dir(&dir)
                .await
                .map_err(|e| DestinationError::Scan(format!("{}: {}", dir.display(), e)))?;

            while let Some(entry) = entries
                .next_entry()
                .await
                .map_err(|e| DestinationError::Scan(format!("{}: {}", dir.display(), e)))?
            {
                let file_type = entry
                    .file_type()
                    .await
                    .map_err(|e| DestinationError::Scan(format!("{}: {}", entry.path().display(), e)))?;

                if file_type.is_dir() {
                    pending.push(entry.path());
                } else if file_type.is_file() {
                    if let Ok(relative) = entry.path().strip_prefix(&self.root) {
                        existing.insert(relative.to_string_lossy().replace('\\', "/"));
                    }
                }
            }
        }

        Ok(existing)
    }

    fn relative_path_of(&self, asset: &Asset) -> String {
        Self::layout(asset)
    }
}
