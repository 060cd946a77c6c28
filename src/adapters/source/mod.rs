//! Asset source abstraction
//!
//! This module defines the trait that asset sources must implement to feed
//! the migration orchestrator, plus the folder-based implementation.

use tokio::sync::{mpsc, watch};

use crate::domain::AssetGroup;

pub mod folder;

pub use folder::FolderSource;

/// Streaming producer of asset groups
///
/// Sources hand the orchestrator the receiving end of a bounded channel and
/// feed it from a spawned producer task. The producer must terminate
/// promptly when the receiver is dropped or the cancel flag flips, so the
/// consumer can abandon the stream at any point without leaking the task.
pub trait AssetSource: Send + Sync {
    /// Starts streaming asset groups
    ///
    /// Groups arrive in deterministic source order and are never empty.
    /// Exhaustion is signalled by the channel closing.
    ///
    /// # Arguments
    ///
    /// * `cancel` - Shutdown flag observed by the producer between groups
    fn browse(&self, cancel: watch::Receiver<bool>) -> mpsc::Receiver<AssetGroup>;

    /// Human-readable description of the source for logs and prompts
    fn describe(&self) -> String;
}
