//! Status command implementation
//!
//! This module implements the `status` command for inspecting the
//! destination store without migrating anything.

use crate::adapters::destination::{AssetWriter, FolderWriter};
use crate::config::load_config;
use clap::Args;

/// Arguments for the status command
#[derive(Args, Debug)]
pub struct StatusArgs {
    /// Maximum number of stored paths to list
    #[arg(long, default_value = "10", value_name = "COUNT")]
    pub sample: usize,
}

impl StatusArgs {
    /// Execute the status command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        println!("📊 Destination Status");
        println!();

        let config = match load_config(config_path) {
            Ok(c) => c,
            Err(e) => {
                tracing::error!(error = %e, "Failed to load configuration");
                eprintln!("Failed to load configuration: {e}");
                return Ok(2); // Configuration error exit code
            }
        };

        let writer = FolderWriter::new(&config.destination.path);
        println!("Destination: {}", writer.describe());

        let Some(inventory) = writer.as_inventory() else {
            println!("Destination cannot enumerate existing assets.");
            return Ok(0);
        };

        let existing = match inventory.scan_existing().await {
            Ok(paths) => paths,
            Err(e) => {
                tracing::error!(error = %e, "Failed to scan destination");
                eprintln!("❌ Failed to scan destination: {e}");
                return Ok(5); // Fatal error exit code
            }
        };

        if existing.is_empty() {
            println!("Destination store is empty.");
            println!();
            println!("Run 'ferry migrate' to move assets into it.");
            return Ok(0);
        }

        println!("Stored assets: {}", existing.len());
        println!();

        let mut paths: Vec<&String> = existing.iter().collect();
        paths.sort();

        for path in paths.iter().take(self.sample) {
            println!("  {path}");
        }

        if existing.len() > self.sample {
            println!("  ... and {} more", existing.len() - self.sample);
        }

        Ok(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_args_defaults() {
        let args = StatusArgs { sample: 10 };
        assert_eq!(args.sample, 10);
    }

    #[tokio::test]
    async fn test_status_missing_config_reports_config_error() {
        let args = StatusArgs { sample: 10 };
        let code = args
            .execute("/nonexistent/ferry.toml")
            .await
            .unwrap();
        assert_eq!(code, 2);
    }
}
