//! Validate configuration command implementation
//!
//! This module implements the `validate-config` command for checking a
//! configuration file without starting a migration.

use crate::config::load_config;
use clap::Args;

/// Arguments for the validate-config command
#[derive(Args, Debug)]
pub struct ValidateArgs {}

impl ValidateArgs {
    /// Execute the validate-config command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        println!("🔍 Validating configuration file: {config_path}");
        println!();

        // load_config already substitutes environment variables, applies
        // FERRY_* overrides, and validates the result.
        let config = match load_config(config_path) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("❌ Configuration is invalid:");
                eprintln!("   {e}");
                return Ok(2); // Configuration error exit code
            }
        };

        println!("✅ Configuration is valid");
        println!();
        println!("Configuration Summary:");
        println!("  Log Level: {}", config.application.log_level);
        println!("  Source: {}", config.source.path);
        println!(
            "  Extensions: {}",
            match &config.source.extensions {
                Some(extensions) => format!("{} custom ({})", extensions.len(), extensions.join(", ")),
                None => "default media set".to_string(),
            }
        );
        println!("  Destination: {}", config.destination.path);
        println!("  Error budget: {}", config.migration.max_write_errors);
        println!("  Group buffer: {}", config.migration.group_buffer);
        println!(
            "  File logging: {}",
            if config.logging.local_enabled {
                format!("enabled ({}, {} rotation)", config.logging.local_path, config.logging.local_rotation)
            } else {
                "disabled".to_string()
            }
        );

        Ok(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[tokio::test]
    async fn test_validate_missing_file_reports_config_error() {
        let args = ValidateArgs {};
        let code = args.execute("/nonexistent/ferry.toml").await.unwrap();
        assert_eq!(code, 2);
    }

    #[tokio::test]
    async fn test_validate_accepts_valid_config() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
[source]
path = "/mnt/takeout"

[destination]
path = "/mnt/library"
"#
        )
        .unwrap();

        let args = ValidateArgs {};
        let code = args
            .execute(file.path().to_str().unwrap())
            .await
            .unwrap();
        assert_eq!(code, 0);
    }

    #[tokio::test]
    async fn test_validate_rejects_bad_log_level() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
[application]
log_level = "verbose"

[source]
path = "/mnt/takeout"

[destination]
path = "/mnt/library"
"#
        )
        .unwrap();

        let args = ValidateArgs {};
        let code = args
            .execute(file.path().to_str().unwrap())
            .await
            .unwrap();
        assert_eq!(code, 2);
    }
}
