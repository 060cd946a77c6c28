//! Migration orchestrator
//!
//! This module coordinates a migration run: it builds the optional
//! existence index, consumes the group stream from the source, classifies
//! every write attempt, and enforces the error budget. Enumeration and
//! persistence are delegated to the source and destination adapters.

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Instant;

use tokio::sync::watch;

use crate::adapters::destination::AssetWriter;
use crate::adapters::source::AssetSource;
use crate::core::migrate::summary::MigrationSummary;
use crate::domain::{Asset, AssetGroup, FerryError, Result};
use crate::journal::{EventKind, Journal};

/// Orchestrator tuning knobs
#[derive(Debug, Clone)]
pub struct MigrateOptions {
    /// Write failures tolerated before the run aborts; the run stops once
    /// the failure count strictly exceeds this limit
    pub max_write_errors: usize,
}

impl Default for MigrateOptions {
    fn default() -> Self {
        Self {
            max_write_errors: 5,
        }
    }
}

/// Migration orchestrator
///
/// Owns the run's control flow: cancellation, the dedup fast path, outcome
/// counting, and the fail-fast error budget. Assets move strictly in
/// stream order; there is no parallel dispatch.
pub struct Migrator {
    source: Arc<dyn AssetSource>,
    destination: Arc<dyn AssetWriter>,
    journal: Arc<Journal>,
    options: MigrateOptions,
}

impl Migrator {
    /// Create a new migrator
    pub fn new(
        source: Arc<dyn AssetSource>,
        destination: Arc<dyn AssetWriter>,
        journal: Arc<Journal>,
        options: MigrateOptions,
    ) -> Self {
        Self {
            source,
            destination,
            journal,
            options,
        }
    }

    /// Execute the migration
    ///
    /// Runs until the source is exhausted, the shutdown flag fires, or the
    /// error budget is exceeded. Only normal exhaustion returns a summary;
    /// cancellation and budget exhaustion return errors and report no
    /// partial counters.
    ///
    /// # Errors
    ///
    /// Returns `FerryError::Cancelled` when the shutdown flag fires,
    /// `FerryError::TooManyErrors` when write failures exceed the budget,
    /// and a destination error if the initial existence scan fails.
    pub async fn run(&self, mut shutdown: watch::Receiver<bool>) -> Result<MigrationSummary> {
        let start_time = Instant::now();
        let mut summary = MigrationSummary::new();

        tracing::info!(
            run_id = %summary.run_id,
            source = %self.source.describe(),
            destination = %self.destination.describe(),
            max_write_errors = self.options.max_write_errors,
            "Starting migration"
        );

        let existing = self.build_existence_index().await?;

        let mut groups = self.source.browse(shutdown.clone());

        loop {
            tokio::select! {
                biased;

                // The cancellation arm comes first so a pending shutdown wins
                // over a ready group.
                _ = shutdown_requested(&mut shutdown) => {
                    tracing::warn!(run_id = %summary.run_id, "Migration cancelled");
                    return Err(FerryError::Cancelled);
                }

                next = groups.recv() => {
                    match next {
                        Some(group) => {
                            self.process_group(group, existing.as_ref(), &mut summary)
                                .await?;
                        }
                        None => {
                            let summary = summary.with_duration(start_time.elapsed());
                            summary.log_summary();
                            self.journal.report();
                            return Ok(summary);
                        }
                    }
                }
            }
        }
    }

    /// Build the existence index when the destination supports enumeration
    ///
    /// A destination without the inventory capability disables the dedup
    /// fast path; a failing scan aborts the run.
    async fn build_existence_index(&self) -> Result<Option<HashSet<String>>> {
        let Some(inventory) = self.destination.as_inventory() else {
            tracing::debug!("Destination has no inventory capability, dedup fast path disabled");
            return Ok(None);
        };

        tracing::info!("Scanning destination for existing assets");
        let existing = inventory.scan_existing().await?;
        tracing::info!(existing = existing.len(), "Destination scan complete");

        Ok(Some(existing))
    }

    /// Process all assets of one group, in order
    async fn process_group(
        &self,
        group: AssetGroup,
        existing: Option<&HashSet<String>>,
        summary: &mut MigrationSummary,
    ) -> Result<()> {
        tracing::debug!(origin = %group.origin, assets = group.len(), "Processing group");
        summary.mark_group();

        for mut asset in group.assets {
            self.process_asset(&mut asset, existing, summary).await?;
        }

        Ok(())
    }

    /// Decide one asset's outcome
    ///
    /// The handle is released on every terminal path. Only genuine write
    /// failures count against the error budget; duplicates are skips.
    async fn process_asset(
        &self,
        asset: &mut Asset,
        existing: Option<&HashSet<String>>,
        summary: &mut MigrationSummary,
    ) -> Result<()> {
        if let (Some(existing), Some(inventory)) = (existing, self.destination.as_inventory()) {
            let relative = inventory.relative_path_of(asset);
            if existing.contains(&relative) {
                self.journal.record(EventKind::ServerDuplicate, asset);
                summary.mark_skipped();
                asset.release();
                return Ok(());
            }
        }

        match self.destination.write_asset(asset).await {
            Ok(()) => {
                asset.release();
                self.journal.record(EventKind::Written, asset);
                summary.mark_written();
            }
            Err(e) if e.is_already_exists() => {
                tracing::debug!(asset = %asset.file_name, "Destination already holds asset");
                self.journal.record(EventKind::ServerDuplicate, asset);
                summary.mark_skipped();
                asset.release();
            }
            Err(e) => {
                tracing::error!(
                    asset = %asset.file_name,
                    error = %e,
                    errored = summary.errored + 1,
                    "Failed to write asset"
                );
                summary.mark_errored();
                asset.release();

                if summary.errored > self.options.max_write_errors {
                    return Err(FerryError::TooManyErrors {
                        failed: summary.errored,
                        limit: self.options.max_write_errors,
                    });
                }
            }
        }

        Ok(())
    }
}

/// Resolves once the shutdown flag flips to `true`
///
/// If the sender side is gone without ever signalling, shutdown can no
/// longer be requested and the future stays pending.
async fn shutdown_requested(shutdown: &mut watch::Receiver<bool>) {
    if shutdown.wait_for(|stop| *stop).await.is_err() {
        std::future::pending::<()>().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options() {
        let options = MigrateOptions::default();
        assert_eq!(options.max_write_errors, 5);
    }

    #[tokio::test]
    async fn test_shutdown_requested_resolves_on_signal() {
        let (stop_tx, mut stop_rx) = watch::channel(false);

        let waiter = tokio::spawn(async move {
            shutdown_requested(&mut stop_rx).await;
        });

        stop_tx.send(true).unwrap();
        waiter.await.unwrap();
    }

    #[tokio::test]
    async fn test_shutdown_requested_ignores_false_updates() {
        let (stop_tx, mut stop_rx) = watch::channel(false);

        let waiter = tokio::spawn(async move {
            tokio::select! {
                _ = shutdown_requested(&mut stop_rx) => true,
                _ = tokio::time::sleep(std::time::Duration::from_millis(50)) => false,
            }
        });

        stop_tx.send(false).unwrap();
        assert!(!waiter.await.unwrap());
    }
}
