//! Folder-based asset source
//!
//! Walks a directory tree depth-first in lexicographic order, grouping the
//! matching files of each directory into one `AssetGroup`. Hidden entries
//! and known junk files are skipped; files are filtered by a configurable
//! media-extension set.

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::{mpsc, watch};

use crate::domain::errors::SourceError;
use crate::domain::{Asset, AssetGroup};
use crate::journal::{EventKind, Journal};

use super::AssetSource;

/// Media file extensions accepted when no override is configured
const DEFAULT_EXTENSIONS: &[&str] = &[
    "jpg", "jpeg", "png", "gif", "heic", "heif", "tif", "tiff", "webp", "bmp", "dng", "mp4",
    "mov", "avi", "mkv", "webm", "m4v", "3gp",
];

/// Junk file names ignored regardless of extension
const JUNK_FILES: &[&str] = &["thumbs.db", "desktop.ini"];

/// Asset source backed by a local directory tree
///
/// Each directory containing at least one matching file yields one group,
/// with files ordered by name. Directories are visited depth-first in
/// sorted order, so the stream is deterministic for a given tree.
pub struct FolderSource {
    root: PathBuf,
    extensions: HashSet<String>,
    journal: Arc<Journal>,
    group_buffer: usize,
}

impl FolderSource {
    /// Creates a folder source over `root` with the default media extensions
    pub fn new(root: impl Into<PathBuf>, journal: Arc<Journal>) -> Self {
        Self {
            root: root.into(),
            extensions: DEFAULT_EXTENSIONS.iter().map(|e| e.to_string()).collect(),
            journal,
            group_buffer: 8,
        }
    }

    /// Replaces the accepted extension set
    ///
    /// Extensions are matched case-insensitively; a leading dot is allowed.
    pub fn with_extensions(mut self, extensions: &[String]) -> Self {
        self.extensions = extensions
            .iter()
            .map(|e| e.trim_start_matches('.').to_ascii_lowercase())
            .collect();
        self
    }

    /// Sets the bounded channel capacity used by `browse`
    pub fn with_group_buffer(mut self, capacity: usize) -> Self {
        self.group_buffer = capacity.max(1);
        self
    }

    /// Verifies the source root exists and is a directory
    ///
    /// # Errors
    ///
    /// Returns `SourceError::RootNotFound` otherwise.
    pub fn verify_root(&self) -> Result<(), SourceError> {
        if self.root.is_dir() {
            Ok(())
        } else {
            Err(SourceError::RootNotFound(
                self.root.display().to_string(),
            ))
        }
    }
}

impl AssetSource for FolderSource {
    fn browse(&self, cancel: watch::Receiver<bool>) -> mpsc::Receiver<AssetGroup> {
        let (tx, rx) = mpsc::channel(self.group_buffer);
        let root = self.root.clone();
        let extensions = self.extensions.clone();
        let journal = Arc::clone(&self.journal);

        tokio::spawn(async move {
            // Sorted depth-first walk: children are pushed reversed so the
            // stack pops them in lexicographic order.
            let mut pending = vec![root.clone()];

            while let Some(dir) = pending.pop() {
                if *cancel.borrow() {
                    tracing::debug!(directory = %dir.display(), "Source walk cancelled");
                    return;
                }

                let (subdirs, group) = match read_directory(&root, &dir, &extensions).await {
                    Ok(listing) => listing,
                    Err(e) => {
                        tracing::warn!(
                            directory = %dir.display(),
                            error = %e,
                            "Skipping unreadable directory"
                        );
                        continue;
                    }
                };

                for subdir in subdirs.into_iter().rev() {
                    pending.push(subdir);
                }

                if let Some(group) = group {
                    for asset in &group.assets {
                        journal.record(EventKind::Discovered, asset);
                    }

                    tracing::debug!(
                        origin = %group.origin,
                        assets = group.len(),
                        "Discovered asset group"
                    );

                    if tx.send(group).await.is_err() {
                        // Consumer dropped the receiver; stop producing.
                        return;
                    }
                }
            }
        });

        rx
    }

    fn describe(&self) -> String {
        format!("folder {}", self.root.display())
    }
}

/// Reads one directory, returning its sorted subdirectories and, when any
/// file matches, the directory's asset group.
async fn read_directory(
    root: &Path,
    dir: &Path,
    extensions: &HashSet<String>,
) -> Result<(Vec<PathBuf>, Option<AssetGroup>), SourceError> {
    let mut entries = tokio::fs::read_dir(dir)
        .await
        .map_err(|e| SourceError::Enumeration(format!("{}: {}", dir.display(), e)))?;

    let mut subdirs = Vec::new();
    let mut files: Vec<(String, PathBuf)> = Vec::new();

    while let Some(entry) = entries
        .next_entry()
        .await
        .map_err(|e| SourceError::Enumeration(format!("{}: {}", dir.display(), e)))?
    {
        let name = entry.file_name().to_string_lossy().into_owned();
        if is_hidden_or_junk(&name) {
            continue;
        }

        let file_type = match entry.file_type().await {
            Ok(file_type) => file_type,
            Err(e) => {
                tracing::warn!(entry = %entry.path().display(), error = %e, "Skipping entry");
                continue;
            }
        };

        if file_type.is_dir() {
            subdirs.push(entry.path());
        } else if file_type.is_file() && has_matching_extension(&name, extensions) {
            files.push((name, entry.path()));
        }
    }

    subdirs.sort();
    files.sort_by(|a, b| a.0.cmp(&b.0));

    let mut assets = Vec::with_capacity(files.len());
    for (name, path) in files {
        match tokio::fs::metadata(&path).await {
            Ok(metadata) => {
                let taken_at = metadata.modified().ok().map(DateTime::<Utc>::from);
                assets.push(Asset::from_file(name, path, metadata.len(), taken_at));
            }
            Err(e) => {
                tracing::warn!(file = %path.display(), error = %e, "Skipping unreadable file");
            }
        }
    }

    let group = if assets.is_empty() {
        None
    } else {
        Some(AssetGroup::new(origin_of(root, dir), assets))
    };

    Ok((subdirs, group))
}

/// Origin label for a group: the directory path relative to the source root
fn origin_of(root: &Path, dir: &Path) -> String {
    match dir.strip_prefix(root) {
        Ok(relative) if !relative.as_os_str().is_empty() => {
            relative.to_string_lossy().replace('\\', "/")
        }
        _ => ".".to_string(),
    }
}

fn is_hidden_or_junk(name: &str) -> bool {
    name.starts_with('.') || JUNK_FILES.iter().any(|junk| name.eq_ignore_ascii_case(junk))
}

fn has_matching_extension(name: &str, extensions: &HashSet<String>) -> bool {
    Path::new(name)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| extensions.contains(&e.to_ascii_lowercase()))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("IMG_0001.jpg", true ; "lowercase jpeg")]
    #[test_case("IMG_0002.JPG", true ; "uppercase jpeg")]
    #[test_case("living room.HEIC", true ; "heic with spaces")]
    #[test_case("clip.mp4", true ; "video")]
    #[test_case("scan.arw", false ; "raw outside default set")]
    #[test_case("notes.txt", false ; "not media")]
    #[test_case("README", false ; "no extension")]
    fn test_default_extension_matching(name: &str, expected: bool) {
        let extensions: HashSet<String> =
            DEFAULT_EXTENSIONS.iter().map(|e| e.to_string()).collect();
        assert_eq!(has_matching_extension(name, &extensions), expected);
    }

    async fn collect_groups(source: &FolderSource) -> Vec<AssetGroup> {
        let (_stop_tx, stop_rx) = watch::channel(false);
        let mut rx = source.browse(stop_rx);
        let mut groups = Vec::new();
        while let Some(group) = rx.recv().await {
            groups.push(group);
        }
        groups
    }

    #[tokio::test]
    async fn test_walk_groups_by_directory_in_sorted_order() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("b-trip")).unwrap();
        std::fs::create_dir_all(dir.path().join("a-trip")).unwrap();
        std::fs::write(dir.path().join("a-trip/zzz.jpg"), b"z").unwrap();
        std::fs::write(dir.path().join("a-trip/aaa.jpg"), b"a").unwrap();
        std::fs::write(dir.path().join("b-trip/one.png"), b"1").unwrap();
        std::fs::write(dir.path().join("root.jpg"), b"r").unwrap();

        let journal = Arc::new(Journal::new());
        let source = FolderSource::new(dir.path(), Arc::clone(&journal));
        let groups = collect_groups(&source).await;

        let origins: Vec<&str> = groups.iter().map(|g| g.origin.as_str()).collect();
        assert_eq!(origins, vec![".", "a-trip", "b-trip"]);

        let a_trip_files: Vec<&str> = groups[1]
            .assets
            .iter()
            .map(|a| a.file_name.as_str())
            .collect();
        assert_eq!(a_trip_files, vec!["aaa.jpg", "zzz.jpg"]);
    }

    #[tokio::test]
    async fn test_walk_records_discovery_events() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("one.jpg"), b"1").unwrap();
        std::fs::write(dir.path().join("two.jpg"), b"2").unwrap();

        let journal = Arc::new(Journal::new());
        let source = FolderSource::new(dir.path(), Arc::clone(&journal));
        let groups = collect_groups(&source).await;

        assert_eq!(groups.len(), 1);
        assert_eq!(journal.count(EventKind::Discovered), 2);
    }

    #[tokio::test]
    async fn test_walk_skips_hidden_junk_and_unmatched() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("keep.jpg"), b"k").unwrap();
        std::fs::write(dir.path().join(".hidden.jpg"), b"h").unwrap();
        std::fs::write(dir.path().join("Thumbs.db"), b"t").unwrap();
        std::fs::write(dir.path().join("notes.txt"), b"n").unwrap();
        std::fs::create_dir_all(dir.path().join(".cache")).unwrap();
        std::fs::write(dir.path().join(".cache/skip.jpg"), b"s").unwrap();

        let journal = Arc::new(Journal::new());
        let source = FolderSource::new(dir.path(), journal);
        let groups = collect_groups(&source).await;

        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].len(), 1);
        assert_eq!(groups[0].assets[0].file_name, "keep.jpg");
    }

    #[tokio::test]
    async fn test_extension_override_is_case_insensitive() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("scan.ARW"), b"raw").unwrap();
        std::fs::write(dir.path().join("photo.jpg"), b"jpeg").unwrap();

        let journal = Arc::new(Journal::new());
        let source = FolderSource::new(dir.path(), journal)
            .with_extensions(&[".arw".to_string()]);
        let groups = collect_groups(&source).await;

        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].assets[0].file_name, "scan.ARW");
    }

    #[tokio::test]
    async fn test_asset_metadata_populated() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("clip.mp4"), b"0123456789").unwrap();

        let journal = Arc::new(Journal::new());
        let source = FolderSource::new(dir.path(), journal);
        let groups = collect_groups(&source).await;

        let asset = &groups[0].assets[0];
        assert_eq!(asset.size, 10);
        assert!(asset.taken_at.is_some());
        assert!(!asset.is_released());
    }

    #[tokio::test]
    async fn test_browse_respects_cancellation() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("one.jpg"), b"1").unwrap();

        let journal = Arc::new(Journal::new());
        let source = FolderSource::new(dir.path(), journal);

        let (stop_tx, stop_rx) = watch::channel(false);
        stop_tx.send(true).unwrap();

        let mut rx = source.browse(stop_rx);
        assert!(rx.recv().await.is_none());
    }

    #[test]
    fn test_verify_root() {
        let dir = tempfile::tempdir().unwrap();
        let journal = Arc::new(Journal::new());

        let good = FolderSource::new(dir.path(), Arc::clone(&journal));
        assert!(good.verify_root().is_ok());

        let bad = FolderSource::new(dir.path().join("missing"), journal);
        let err = bad.verify_root().unwrap_err();
        assert!(matches!(err, SourceError::RootNotFound(_)));
    }
}
