//! Configuration loader with TOML parsing and environment variable overrides

use super::schema::FerryConfig;
use crate::domain::errors::FerryError;
use crate::domain::result::Result;
use regex::Regex;
use std::fs;
use std::path::Path;

/// Loads configuration from a TOML file
///
/// This function:
/// 1. Reads the TOML file
/// 2. Performs environment variable substitution (${VAR} syntax)
/// 3. Parses the TOML into FerryConfig
/// 4. Applies environment variable overrides (FERRY_* prefix)
/// 5. Validates the configuration
///
/// # Arguments
///
/// * `path` - Path to the TOML configuration file
///
/// # Errors
///
/// Returns an error if:
/// - File cannot be read
/// - TOML parsing fails
/// - Environment variable substitution fails
/// - Configuration validation fails
///
/// # Examples
///
/// ```no_run
/// use ferry::config::loader::load_config;
///
/// let config = load_config("ferry.toml").expect("Failed to load config");
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<FerryConfig> {
    let path = path.as_ref();

    // Check if file exists
    if !path.exists() {
        return Err(FerryError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    // Read file contents
    let contents = fs::read_to_string(path).map_err(|e| {
        FerryError::Configuration(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    // Perform environment variable substitution
    let contents = substitute_env_vars(&contents)?;

    // Parse TOML
    let mut config: FerryConfig = toml::from_str(&contents)
        .map_err(|e| FerryError::Configuration(format!("Failed to parse TOML: {}", e)))?;

    // Apply environment variable overrides
    apply_env_overrides(&mut config);

    // Validate configuration
    config.validate().map_err(|e| {
        FerryError::Configuration(format!("Configuration validation failed: {}", e))
    })?;

    Ok(config)
}

/// Substitutes environment variables in the format ${VAR_NAME}
///
/// # Arguments
///
/// * `input` - String containing ${VAR} placeholders
///
/// # Errors
///
/// Returns an error if a referenced environment variable is not set
fn substitute_env_vars(input: &str) -> Result<String> {
    let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}")
        .map_err(|e| FerryError::Configuration(format!("Invalid substitution pattern: {e}")))?;
    let mut result = String::new();
    let mut missing_vars = Vec::new();

    // Process line by line to skip comments
    for line in input.lines() {
        let trimmed = line.trim_start();

        // Skip comment lines - don't process env vars in comments
        if trimmed.starts_with('#') {
            result.push_str(line);
            result.push('\n');
            continue;
        }

        // Process non-comment lines for env var substitution
        let mut processed_line = line.to_string();
        for cap in re.captures_iter(line) {
            let var_name = &cap[1];
            match std::env::var(var_name) {
                Ok(value) => {
                    let placeholder = format!("${{{}}}", var_name);
                    processed_line = processed_line.replace(&placeholder, &value);
                }
                Err(_) => {
                    if !missing_vars.contains(&var_name.to_string()) {
                        missing_vars.push(var_name.to_string());
                    }
                }
            }
        }
        result.push_str(&processed_line);
        result.push('\n');
    }

    if !missing_vars.is_empty() {
        return Err(FerryError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(result)
}

/// Applies environment variable overrides using FERRY_* prefix
///
/// Environment variables follow the pattern: FERRY_<SECTION>_<KEY>
/// For example: FERRY_SOURCE_PATH, FERRY_MIGRATION_MAX_WRITE_ERRORS
///
/// # Arguments
///
/// * `config` - Mutable reference to the configuration to update
fn apply_env_overrides(config: &mut FerryConfig) {
    // Application overrides
    if let Ok(val) = std::env::var("FERRY_APPLICATION_LOG_LEVEL") {
        config.application.log_level = val;
    }

    // Source overrides
    if let Ok(val) = std::env::var("FERRY_SOURCE_PATH") {
        config.source.path = val;
    }
    if let Ok(val) = std::env::var("FERRY_SOURCE_EXTENSIONS") {
        let extensions: Vec<String> = val
            .split(',')
            .map(|e| e.trim().to_string())
            .filter(|e| !e.is_empty())
            .collect();
        if !extensions.is_empty() {
            config.source.extensions = Some(extensions);
        }
    }

    // Destination overrides
    if let Ok(val) = std::env::var("FERRY_DESTINATION_PATH") {
        config.destination.path = val;
    }

    // Migration overrides
    if let Ok(val) = std::env::var("FERRY_MIGRATION_MAX_WRITE_ERRORS") {
        if let Ok(limit) = val.parse() {
            config.migration.max_write_errors = limit;
        }
    }
    if let Ok(val) = std::env::var("FERRY_MIGRATION_GROUP_BUFFER") {
        if let Ok(capacity) = val.parse() {
            config.migration.group_buffer = capacity;
        }
    }

    // Logging overrides
    if let Ok(val) = std::env::var("FERRY_LOGGING_LOCAL_ENABLED") {
        config.logging.local_enabled = val.parse().unwrap_or(false);
    }
    if let Ok(val) = std::env::var("FERRY_LOGGING_LOCAL_PATH") {
        config.logging.local_path = val;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_substitute_env_vars() {
        std::env::set_var("FERRY_TEST_SUBST_VAR", "/mnt/photos");
        let input = "path = \"${FERRY_TEST_SUBST_VAR}\"";
        let result = substitute_env_vars(input).unwrap();
        assert_eq!(result, "path = \"/mnt/photos\"\n");
        std::env::remove_var("FERRY_TEST_SUBST_VAR");
    }

    #[test]
    fn test_substitute_env_vars_missing() {
        std::env::remove_var("FERRY_TEST_MISSING_VAR");
        let input = "path = \"${FERRY_TEST_MISSING_VAR}\"";
        let result = substitute_env_vars(input);
        assert!(result.is_err());
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("FERRY_TEST_MISSING_VAR"));
    }

    #[test]
    fn test_substitute_skips_comment_lines() {
        std::env::remove_var("FERRY_TEST_COMMENT_VAR");
        let input = "# path = \"${FERRY_TEST_COMMENT_VAR}\"\nkey = \"value\"";
        let result = substitute_env_vars(input).unwrap();
        assert!(result.contains("${FERRY_TEST_COMMENT_VAR}"));
        assert!(result.contains("key = \"value\""));
    }

    #[test]
    fn test_load_config_missing_file() {
        let result = load_config("nonexistent.toml");
        assert!(result.is_err());
    }

    #[test]
    fn test_load_config_valid() {
        let toml_content = r#"
[source]
path = "/photos/takeout"

[destination]
path = "/photos/library"
"#;

        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(toml_content.as_bytes()).unwrap();
        temp_file.flush().unwrap();

        let result = load_config(temp_file.path());
        assert!(result.is_ok());

        let config = result.unwrap();
        assert_eq!(config.source.path, "/photos/takeout");
        assert_eq!(config.migration.max_write_errors, 5);
    }

    #[test]
    fn test_load_config_invalid_toml() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(b"source = path =").unwrap();
        temp_file.flush().unwrap();

        let result = load_config(temp_file.path());
        assert!(result.is_err());
    }

    #[test]
    fn test_apply_env_overrides() {
        let mut config: FerryConfig = toml::from_str(
            r#"
[source]
path = "/photos/takeout"

[destination]
path = "/photos/library"
"#,
        )
        .unwrap();

        std::env::set_var("FERRY_DESTINATION_PATH", "/mnt/library");
        std::env::set_var("FERRY_LOGGING_LOCAL_PATH", "/var/log/ferry");
        apply_env_overrides(&mut config);
        std::env::remove_var("FERRY_DESTINATION_PATH");
        std::env::remove_var("FERRY_LOGGING_LOCAL_PATH");

        assert_eq!(config.destination.path, "/mnt/library");
        assert_eq!(config.logging.local_path, "/var/log/ferry");
        // Untouched values keep their file-provided settings
        assert_eq!(config.source.path, "/photos/takeout");
    }
}
