//! Migrate command implementation
//!
//! This module implements the `migrate` command for moving assets from the
//! source library to the destination store.

use crate::adapters::destination::{AssetWriter, FolderWriter};
use crate::adapters::source::{AssetSource, FolderSource};
use crate::config::load_config;
use crate::core::migrate::{MigrateOptions, MigrationSummary, Migrator};
use crate::domain::FerryError;
use crate::journal::Journal;
use crate::{log_error_with_context, log_migration_start};
use clap::Args;
use std::sync::Arc;
use tokio::sync::watch;

/// Arguments for the migrate command
#[derive(Args, Debug)]
pub struct MigrateArgs {
    /// Skip confirmation prompt
    #[arg(short, long)]
    pub yes: bool,

    /// Override source library path
    #[arg(long)]
    pub source: Option<String>,

    /// Override destination store path
    #[arg(long)]
    pub destination: Option<String>,

    /// Override the write-error budget
    #[arg(long, value_name = "COUNT")]
    pub max_errors: Option<usize>,

    /// Print the summary as JSON instead of the human-readable report
    #[arg(long)]
    pub json: bool,
}

impl MigrateArgs {
    /// Execute the migrate command
    pub async fn execute(
        &self,
        config_path: &str,
        shutdown_signal: watch::Receiver<bool>,
    ) -> anyhow::Result<i32> {
        tracing::info!("Starting migrate command");

        // Load configuration
        let mut config = match load_config(config_path) {
            Ok(c) => c,
            Err(e) => {
                tracing::error!(error = %e, "Failed to load configuration");
                eprintln!("Failed to load configuration: {e}");
                return Ok(2); // Configuration error exit code
            }
        };

        // Apply CLI overrides
        if let Some(source) = &self.source {
            tracing::info!(source = %source, "Overriding source path from CLI");
            config.source.path = source.clone();
        }

        if let Some(destination) = &self.destination {
            tracing::info!(destination = %destination, "Overriding destination path from CLI");
            config.destination.path = destination.clone();
        }

        if let Some(max_errors) = self.max_errors {
            tracing::info!(max_errors, "Overriding error budget from CLI");
            config.migration.max_write_errors = max_errors;
        }

        // Re-validate after overrides
        if let Err(e) = config.validate() {
            tracing::error!(error = %e, "Configuration validation failed");
            eprintln!("Configuration validation failed: {e}");
            return Ok(2); // Configuration error exit code
        }

        // Confirmation prompt (unless --yes or --json)
        if !self.yes && !self.json {
            println!("Migration Configuration:");
            println!("  Source: {}", config.source.path);
            println!("  Destination: {}", config.destination.path);
            println!(
                "  Extensions: {}",
                match &config.source.extensions {
                    Some(extensions) => extensions.join(", "),
                    None => "default media set".to_string(),
                }
            );
            println!("  Error budget: {}", config.migration.max_write_errors);
            println!();
            print!("Proceed with migration? [y/N]: ");
            use std::io::{self, Write};
            io::stdout().flush()?;

            let mut input = String::new();
            io::stdin().read_line(&mut input)?;

            if !input.trim().eq_ignore_ascii_case("y") {
                println!("Migration cancelled.");
                return Ok(0);
            }
        }

        // Wire up the pipeline
        let journal = Arc::new(Journal::new());

        let mut folder_source =
            FolderSource::new(&config.source.path, Arc::clone(&journal))
                .with_group_buffer(config.migration.group_buffer);
        if let Some(extensions) = &config.source.extensions {
            folder_source = folder_source.with_extensions(extensions);
        }

        if let Err(e) = folder_source.verify_root() {
            tracing::error!(error = %e, "Source root is not usable");
            eprintln!("❌ Source is not usable: {e}");
            return Ok(2); // Configuration error exit code
        }

        let folder_writer = FolderWriter::new(&config.destination.path);
        if let Err(e) = folder_writer.ensure_root().await {
            log_error_with_context!(&e, "Failed to prepare destination root");
            eprintln!("❌ Failed to prepare destination: {e}");
            return Ok(5); // Fatal error exit code
        }

        let source: Arc<dyn AssetSource> = Arc::new(folder_source);
        let destination: Arc<dyn AssetWriter> = Arc::new(folder_writer);

        log_migration_start!(source.describe(), destination.describe());

        if !self.json {
            println!("🚀 Starting migration...");
            println!();
        }

        let migrator = Migrator::new(
            source,
            destination,
            Arc::clone(&journal),
            MigrateOptions {
                max_write_errors: config.migration.max_write_errors,
            },
        );

        match migrator.run(shutdown_signal).await {
            Ok(summary) => {
                self.report_summary(&summary)?;

                if summary.is_clean() {
                    if !self.json {
                        println!("✅ Migration completed successfully!");
                    }
                    Ok(0)
                } else {
                    if !self.json {
                        println!("⚠️  Migration completed with write failures");
                    }
                    Ok(1) // Partial success
                }
            }
            Err(FerryError::Cancelled) => {
                println!();
                println!("⚠️  Migration interrupted before completion.");
                println!("   Already-written assets stay in place; run again to resume.");
                tracing::info!("Migration interrupted by user signal");
                Ok(130) // SIGINT exit code (standard Unix convention)
            }
            Err(e @ FerryError::TooManyErrors { .. }) => {
                eprintln!("❌ {e}");
                eprintln!("   Fix the failing assets or raise migration.max_write_errors.");
                Ok(1)
            }
            Err(e) => {
                log_error_with_context!(&e, "Migration failed");
                eprintln!("❌ Migration failed: {e}");
                Ok(5) // Fatal error exit code
            }
        }
    }

    /// Print the run summary in the requested format
    fn report_summary(&self, summary: &MigrationSummary) -> anyhow::Result<()> {
        if self.json {
            println!("{}", serde_json::to_string_pretty(summary)?);
            return Ok(());
        }

        println!();
        println!("📊 Migration Summary:");
        println!("  Written: {}", summary.written);
        println!("  Skipped (already present): {}", summary.skipped);
        println!("  Failed: {}", summary.errored);
        println!("  Groups: {}", summary.groups);
        println!("  Duration: {:.2}s", summary.duration.as_secs_f64());
        println!("  Success Rate: {:.2}%", summary.success_rate());
        println!();
        Ok(())
    }
}
