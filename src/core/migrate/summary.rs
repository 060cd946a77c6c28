//! Migration summary and reporting
//!
//! This module defines the structure returned by a completed migration run.

use serde::Serialize;
use std::time::Duration;
use uuid::Uuid;

/// Summary of a migration run
///
/// Counters accumulate monotonically while the run progresses and are
/// returned only on normal completion; aborted runs return an error
/// instead of a summary.
#[derive(Debug, Clone, Serialize)]
pub struct MigrationSummary {
    /// Unique identifier for this run
    pub run_id: Uuid,

    /// Assets written to the destination
    pub written: usize,

    /// Assets skipped because the destination already held them
    pub skipped: usize,

    /// Assets whose write failed
    pub errored: usize,

    /// Groups consumed from the source
    pub groups: usize,

    /// Wall-clock duration of the run
    #[serde(rename = "duration_ms", serialize_with = "serialize_duration_ms")]
    pub duration: Duration,
}

fn serialize_duration_ms<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.serialize_u64(duration.as_millis() as u64)
}

impl MigrationSummary {
    /// Create a new empty summary with a fresh run id
    pub fn new() -> Self {
        Self {
            run_id: Uuid::new_v4(),
            written: 0,
            skipped: 0,
            errored: 0,
            groups: 0,
            duration: Duration::from_secs(0),
        }
    }

    /// Set the duration
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    /// Count one written asset
    pub fn mark_written(&mut self) {
        self.written += 1;
    }

    /// Count one skipped asset
    pub fn mark_skipped(&mut self) {
        self.skipped += 1;
    }

    /// Count one failed write
    pub fn mark_errored(&mut self) {
        self.errored += 1;
    }

    /// Count one consumed group
    pub fn mark_group(&mut self) {
        self.groups += 1;
    }

    /// Total assets that reached a terminal outcome
    pub fn total_assets(&self) -> usize {
        self.written + self.skipped + self.errored
    }

    /// Check if the run completed without write failures
    pub fn is_clean(&self) -> bool {
        self.errored == 0
    }

    /// Share of assets that did not fail, as a percentage
    pub fn success_rate(&self) -> f64 {
        let total = self.total_assets();
        if total == 0 {
            return 100.0;
        }
        ((self.written + self.skipped) as f64 / total as f64) * 100.0
    }

    /// Log the summary
    pub fn log_summary(&self) {
        tracing::info!(
            run_id = %self.run_id,
            written = self.written,
            skipped = self.skipped,
            errored = self.errored,
            groups = self.groups,
            duration_secs = self.duration.as_secs(),
            success_rate = format!("{:.2}%", self.success_rate()),
            "Migration completed"
        );
    }
}

impl Default for MigrationSummary {
    fn default() -> Self {
        Self::new()
    }
}
