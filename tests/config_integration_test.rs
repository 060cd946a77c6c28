//! Integration tests for configuration loading and validation
//!
//! Every test takes ENV_MUTEX because load_config reads FERRY_* override
//! variables; serializing the tests keeps one test's variables from
//! leaking into another's assertions.

use ferry::config::load_config;
use std::io::Write;
use std::sync::Mutex;
use tempfile::NamedTempFile;

// Mutex to serialize tests that touch environment variables
static ENV_MUTEX: Mutex<()> = Mutex::new(());

fn env_lock() -> std::sync::MutexGuard<'static, ()> {
    ENV_MUTEX.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Helper function to clean up environment variables
fn cleanup_env_vars() {
    std::env::remove_var("FERRY_APPLICATION_LOG_LEVEL");
    std::env::remove_var("FERRY_SOURCE_EXTENSIONS");
    std::env::remove_var("FERRY_MIGRATION_MAX_WRITE_ERRORS");
    std::env::remove_var("TEST_SOURCE_ROOT");
}

fn write_config(contents: &str) -> NamedTempFile {
    let mut temp_file = NamedTempFile::new().unwrap();
    temp_file.write_all(contents.as_bytes()).unwrap();
    temp_file.flush().unwrap();
    temp_file
}

#[test]
fn test_load_complete_config() {
    let _lock = env_lock();
    cleanup_env_vars();

    let temp_file = write_config(
        r#"
[application]
log_level = "debug"

[source]
path = "/mnt/photos/takeout"
extensions = ["jpg", "mp4"]

[destination]
path = "/mnt/photos/library"

[migration]
max_write_errors = 10
group_buffer = 16

[logging]
local_enabled = false
local_path = "/tmp/ferry-logs"
local_rotation = "hourly"
local_max_size_mb = 50
"#,
    );

    let config = load_config(temp_file.path()).expect("Failed to load config");

    // Verify application config
    assert_eq!(config.application.log_level, "debug");

    // Verify source config
    assert_eq!(config.source.path, "/mnt/photos/takeout");
    assert_eq!(
        config.source.extensions,
        Some(vec!["jpg".to_string(), "mp4".to_string()])
    );

    // Verify destination config
    assert_eq!(config.destination.path, "/mnt/photos/library");

    // Verify migration config
    assert_eq!(config.migration.max_write_errors, 10);
    assert_eq!(config.migration.group_buffer, 16);

    // Verify logging config
    assert!(!config.logging.local_enabled);
    assert_eq!(config.logging.local_path, "/tmp/ferry-logs");
    assert_eq!(config.logging.local_rotation, "hourly");
    assert_eq!(config.logging.local_max_size_mb, 50);
}

#[test]
fn test_load_minimal_config_with_defaults() {
    let _lock = env_lock();
    cleanup_env_vars();

    let temp_file = write_config(
        r#"
[source]
path = "/mnt/takeout"

[destination]
path = "/mnt/library"
"#,
    );

    let config = load_config(temp_file.path()).expect("Failed to load config");

    // Verify defaults are applied
    assert_eq!(config.application.log_level, "info");
    assert_eq!(config.source.extensions, None);
    assert_eq!(config.migration.max_write_errors, 5);
    assert_eq!(config.migration.group_buffer, 8);
    assert!(!config.logging.local_enabled);
    assert_eq!(config.logging.local_path, "logs");
    assert_eq!(config.logging.local_rotation, "daily");
    assert_eq!(config.logging.local_max_size_mb, 100);
}

#[test]
fn test_env_var_substitution() {
    let _lock = env_lock();
    cleanup_env_vars();
    std::env::set_var("TEST_SOURCE_ROOT", "/mnt/photos");

    let temp_file = write_config(
        r#"
[source]
path = "${TEST_SOURCE_ROOT}/takeout"

[destination]
path = "/mnt/library"
"#,
    );

    let config = load_config(temp_file.path()).expect("Failed to load config");
    assert_eq!(config.source.path, "/mnt/photos/takeout");

    std::env::remove_var("TEST_SOURCE_ROOT");
}

#[test]
fn test_missing_substitution_var_is_reported() {
    let _lock = env_lock();
    cleanup_env_vars();

    let temp_file = write_config(
        r#"
[source]
path = "${TEST_UNSET_FERRY_VAR}/takeout"

[destination]
path = "/mnt/library"
"#,
    );

    let result = load_config(temp_file.path());
    assert!(result.is_err());
    assert!(result
        .unwrap_err()
        .to_string()
        .contains("TEST_UNSET_FERRY_VAR"));
}

#[test]
fn test_env_var_overrides() {
    let _lock = env_lock();
    cleanup_env_vars();
    std::env::set_var("FERRY_APPLICATION_LOG_LEVEL", "trace");
    std::env::set_var("FERRY_MIGRATION_MAX_WRITE_ERRORS", "12");
    std::env::set_var("FERRY_SOURCE_EXTENSIONS", "arw, nef");

    let temp_file = write_config(
        r#"
[application]
log_level = "info"

[source]
path = "/mnt/takeout"

[destination]
path = "/mnt/library"

[migration]
max_write_errors = 5
"#,
    );

    let config = load_config(temp_file.path()).expect("Failed to load config");

    // Verify env var overrides took effect
    assert_eq!(config.application.log_level, "trace");
    assert_eq!(config.migration.max_write_errors, 12);
    assert_eq!(
        config.source.extensions,
        Some(vec!["arw".to_string(), "nef".to_string()])
    );

    cleanup_env_vars();
}

#[test]
fn test_invalid_log_level_fails_validation() {
    let _lock = env_lock();
    cleanup_env_vars();

    let temp_file = write_config(
        r#"
[application]
log_level = "verbose"

[source]
path = "/mnt/takeout"

[destination]
path = "/mnt/library"
"#,
    );

    let result = load_config(temp_file.path());
    assert!(result.is_err());
}

#[test]
fn test_same_source_and_destination_fails_validation() {
    let _lock = env_lock();
    cleanup_env_vars();

    let temp_file = write_config(
        r#"
[source]
path = "/mnt/photos"

[destination]
path = "/mnt/photos"
"#,
    );

    let result = load_config(temp_file.path());
    assert!(result.is_err());
    assert!(result
        .unwrap_err()
        .to_string()
        .contains("must differ"));
}

#[test]
fn test_zero_group_buffer_fails_validation() {
    let _lock = env_lock();
    cleanup_env_vars();

    let temp_file = write_config(
        r#"
[source]
path = "/mnt/takeout"

[destination]
path = "/mnt/library"

[migration]
group_buffer = 0
"#,
    );

    let result = load_config(temp_file.path());
    assert!(result.is_err());
}
