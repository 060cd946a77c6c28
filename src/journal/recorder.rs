//! Outcome event recording
//!
//! The journal tallies what happened to each asset during a run. It is
//! shared behind an `Arc` between the source producer task (discovery
//! events) and the orchestrator (outcome events), so counts are atomic.

use std::sync::atomic::{AtomicU64, Ordering};

use crate::domain::Asset;

/// Kinds of journal events recorded during a migration run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// An asset was found in the source collection
    Discovered,

    /// An asset was persisted to the destination
    Written,

    /// The destination already held the asset; it was skipped
    ServerDuplicate,
}

impl EventKind {
    /// All event kinds, in reporting order
    pub const ALL: [EventKind; 3] = [
        EventKind::Discovered,
        EventKind::Written,
        EventKind::ServerDuplicate,
    ];

    /// Stable name used in logs and reports
    pub fn as_str(&self) -> &'static str {
        match self {
            EventKind::Discovered => "discovered",
            EventKind::Written => "written",
            EventKind::ServerDuplicate => "server_duplicate",
        }
    }

    fn index(self) -> usize {
        match self {
            EventKind::Discovered => 0,
            EventKind::Written => 1,
            EventKind::ServerDuplicate => 2,
        }
    }
}

impl std::fmt::Display for EventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Tallies migration events per kind
#[derive(Debug, Default)]
pub struct Journal {
    counts: [AtomicU64; 3],
}

impl Journal {
    /// Creates an empty journal
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one event for an asset
    pub fn record(&self, kind: EventKind, asset: &Asset) {
        self.counts[kind.index()].fetch_add(1, Ordering::Relaxed);
        tracing::debug!(
            event = kind.as_str(),
            asset = %asset.file_name,
            size = asset.size,
            "Journal event"
        );
    }

    /// Current tally for one event kind
    pub fn count(&self, kind: EventKind) -> u64 {
        self.counts[kind.index()].load(Ordering::Relaxed)
    }

    /// Sum of all tallies
    pub fn total(&self) -> u64 {
        EventKind::ALL.iter().map(|kind| self.count(*kind)).sum()
    }

    /// Logs the non-zero tallies at info level
    pub fn report(&self) {
        for kind in EventKind::ALL {
            let count = self.count(kind);
            if count > 0 {
                tracing::info!(event = kind.as_str(), count, "Journal tally");
            }
        }
    }
}
