//! Init command implementation
//!
//! This module implements the `init` command for generating a starter
//! configuration file.

use clap::Args;
use std::fs;
use std::path::Path;

/// Arguments for the init command
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Output path for the generated configuration file
    #[arg(short, long, default_value = "ferry.toml")]
    pub output: String,

    /// Include commented examples for optional settings
    #[arg(long)]
    pub with_examples: bool,

    /// Overwrite the output file if it already exists
    #[arg(long)]
    pub force: bool,
}

impl InitArgs {
    /// Execute the init command
    pub async fn execute(&self) -> anyhow::Result<i32> {
        println!("📝 Initializing Ferry configuration");
        println!();

        let output_path = Path::new(&self.output);

        if output_path.exists() && !self.force {
            eprintln!("❌ {} already exists", self.output);
            eprintln!("   Use --force to overwrite it.");
            return Ok(2); // Configuration error exit code
        }

        let contents = if self.with_examples {
            generate_config_with_examples()
        } else {
            generate_minimal_config()
        };

        match fs::write(output_path, contents) {
            Ok(()) => {
                println!("✅ Created {}", self.output);
                println!();
                println!("Next steps:");
                println!("  1. Edit {} and set your source and destination paths", self.output);
                println!("  2. Run 'ferry validate-config' to check the file");
                println!("  3. Run 'ferry migrate' to start moving assets");
                Ok(0)
            }
            Err(e) => {
                tracing::error!(error = %e, path = %self.output, "Failed to write configuration file");
                eprintln!("❌ Failed to write {}: {e}", self.output);
                Ok(5) // Fatal error exit code
            }
        }
    }
}

/// Generate a minimal configuration with only the required settings
fn generate_minimal_config() -> String {
    r#"# Ferry configuration

[application]
log_level = "info"

[source]
# Folder tree to migrate assets from
path = "/path/to/source"

[destination]
# Folder tree to migrate assets into
path = "/path/to/destination"

[migration]
# Abort the run once more than this many writes have failed
max_write_errors = 5

[logging]
local_enabled = false
"#
    .to_string()
}

/// Generate a configuration with commented examples for optional settings
fn generate_config_with_examples() -> String {
    r#"# Ferry configuration
#
# Values support ${VAR} substitution from the environment, and every
# setting can be overridden with a FERRY_<SECTION>_<KEY> variable.

[application]
# Log verbosity: trace, debug, info, warn, error
log_level = "info"

[source]
# Folder tree to migrate assets from
path = "/path/to/source"
# path = "${FERRY_LIBRARY_ROOT}/takeout"

# Restrict discovery to specific file extensions.
# When omitted, the default media set (photos and videos) is used.
# extensions = ["jpg", "png", "mp4"]

[destination]
# Folder tree to migrate assets into
path = "/path/to/destination"

[migration]
# Abort the run once more than this many writes have failed
max_write_errors = 5

# Number of asset groups buffered between discovery and writing
group_buffer = 8

[logging]
# Write JSON logs to rotating files in addition to the console
local_enabled = false
local_path = "logs"
# Rotation policy: daily, hourly, never
local_rotation = "daily"
local_max_size_mb = 100
"#
    .to_string()
}
