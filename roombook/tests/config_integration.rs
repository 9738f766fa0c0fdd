//! Integration tests for the configuration system.
//!
//! These tests cover file discovery in the data directory, environment
//! overrides, validation, and how the merged configuration reaches the
//! booking service and the database.
//!
//! Tests that modify environment variables are marked with `#[serial]`;
//! environment variables are process-global, so they must not run
//! alongside each other.

use std::env;
use std::fs;
use std::time::Duration;

use roombook::config::{Config, ConfigBuilder, OutputFormat, CONFIG_FILE_NAME};
use roombook::{
    BookingService, BookingStatus, Database, DatabaseConfig, Error, MemoryStore,
    RecurrenceRequest,
};
use serial_test::serial;
use tempfile::TempDir;

const ENV_VARS: [&str; 4] = [
    "ROOMBOOK_DEFAULT_WEEKDAYS",
    "ROOMBOOK_DEFAULT_STATUS",
    "ROOMBOOK_MAXIMUM_LOCK_WAIT_SECONDS",
    "ROOMBOOK_OUTPUT_FORMAT",
];

fn clear_env() {
    for var in ENV_VARS {
        env::remove_var(var);
    }
}

fn write_config(dir: &TempDir, yaml: &str) {
    fs::write(dir.path().join(CONFIG_FILE_NAME), yaml).unwrap();
}

// ============================================================================
// File loading
// ============================================================================

#[test]
#[serial]
fn test_missing_config_file_gives_defaults() {
    clear_env();
    let dir = TempDir::new().unwrap();
    let config = ConfigBuilder::new().with_data_dir(dir.path()).build().unwrap();

    assert_eq!(config, Config::default());
    assert_eq!(config.lock_wait(), Duration::from_secs(5));
    assert_eq!(config.output_format(), OutputFormat::Table);
}

#[test]
#[serial]
fn test_full_config_file() {
    clear_env();
    let dir = TempDir::new().unwrap();
    write_config(
        &dir,
        r"
default_weekdays: [tu, th]
default_status: confirmed
maximum_lock_wait_seconds: 3
output_format: json
",
    );

    let config = ConfigBuilder::new().with_data_dir(dir.path()).build().unwrap();
    assert_eq!(
        config.default_weekdays,
        Some(vec!["tu".to_string(), "th".to_string()])
    );
    assert_eq!(config.default_status, Some(BookingStatus::Confirmed));
    assert_eq!(config.lock_wait(), Duration::from_secs(3));
    assert_eq!(config.output_format(), OutputFormat::Json);
}

#[test]
fn test_unknown_key_rejected() {
    let dir = TempDir::new().unwrap();
    write_config(&dir, "maximum_lock_wait: 3\n");

    let err = ConfigBuilder::new()
        .with_data_dir(dir.path())
        .skip_env()
        .build()
        .unwrap_err();
    assert!(matches!(err, Error::Configuration(_)), "got {err:?}");
}

#[test]
fn test_invalid_values_rejected() {
    for yaml in [
        "default_weekdays: [mo, funday]\n",
        "default_weekdays: [mo, mo]\n",
        "maximum_lock_wait_seconds: 0\n",
    ] {
        let dir = TempDir::new().unwrap();
        write_config(&dir, yaml);
        let result = ConfigBuilder::new()
            .with_data_dir(dir.path())
            .skip_env()
            .build();
        assert!(result.is_err(), "accepted {yaml:?}");
    }
}

// ============================================================================
// Environment overrides
// ============================================================================

#[test]
#[serial]
fn test_environment_overrides_file() {
    clear_env();
    let dir = TempDir::new().unwrap();
    write_config(&dir, "default_status: pending\nmaximum_lock_wait_seconds: 3\n");
    env::set_var("ROOMBOOK_DEFAULT_STATUS", "confirmed");

    let config = ConfigBuilder::new().with_data_dir(dir.path()).build();
    clear_env();
    let config = config.unwrap();

    assert_eq!(config.default_status, Some(BookingStatus::Confirmed));
    assert_eq!(config.maximum_lock_wait_seconds, Some(3));
}

#[test]
#[serial]
fn test_bad_environment_value_is_an_error() {
    clear_env();
    env::set_var("ROOMBOOK_OUTPUT_FORMAT", "xml");
    let result = ConfigBuilder::new().skip_files().build();
    clear_env();
    assert!(result.is_err());
}

// ============================================================================
// Configuration reaching the service and database
// ============================================================================

#[test]
fn test_config_defaults_applied_to_bookings() {
    let config = ConfigBuilder::new()
        .skip_files()
        .skip_env()
        .with_config(Config {
            default_weekdays: Some(vec!["fr".into()]),
            default_status: Some(BookingStatus::Confirmed),
            ..Default::default()
        })
        .build()
        .unwrap();

    let mut service = BookingService::from_config(MemoryStore::new(), &config).unwrap();
    let weekly = RecurrenceRequest::new("R1", "alice")
        .with_start("2024-01-05", "09:00")
        .with_end("2024-01-19", "10:00")
        .with_recurrence_type("WEEKLY");

    let saved = service.create(&weekly).unwrap().into_bookings();
    assert_eq!(saved.len(), 2);
    assert!(saved.iter().all(|b| b.weekdays().codes() == vec!["fr"]));
    assert!(saved.iter().all(|b| b.status() == BookingStatus::Confirmed));

    // An explicit status on the request still wins
    let pending = RecurrenceRequest::new("R2", "bob")
        .with_start("2024-01-05", "09:00")
        .with_end("2024-01-05", "10:00")
        .with_status(BookingStatus::Pending);
    let saved = service.create(&pending).unwrap().into_bookings();
    assert_eq!(saved[0].status(), BookingStatus::Pending);
}

#[test]
fn test_lock_wait_reaches_database() {
    let dir = TempDir::new().unwrap();
    let config = Config {
        maximum_lock_wait_seconds: Some(7),
        ..Default::default()
    };
    let db = Database::open(DatabaseConfig::from_config(dir.path().join("rb.db"), &config))
        .unwrap();
    assert_eq!(db.config().busy_timeout, Duration::from_secs(7));
}
