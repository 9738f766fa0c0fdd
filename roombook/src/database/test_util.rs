//! Shared test utilities for database unit tests.

use chrono::NaiveDate;
use tempfile::tempdir;

use crate::booking::Booking;
use crate::database::{Database, DatabaseConfig};
use crate::time_range::TimeRange;

/// Creates a temporary test database that will be cleaned up automatically.
///
/// # Panics
///
/// Panics if the temporary directory or database cannot be created.
#[must_use]
pub fn create_test_database() -> Database {
    let dir = tempdir().unwrap();
    let path = dir.path().join("test.db");
    let db = Database::open(DatabaseConfig::new(path)).unwrap();

    // Prevent the TempDir from being dropped immediately
    std::mem::forget(dir);

    db
}

/// Creates an unsaved single booking by `alice` on 2024-01-`day`, from
/// `from`:00 to `to`:00.
///
/// # Panics
///
/// Panics if the arguments do not form a valid range.
#[must_use]
pub fn booking_at(room: &str, day: u32, from: u32, to: u32) -> Booking {
    let date = NaiveDate::from_ymd_opt(2024, 1, day).unwrap();
    let range = TimeRange::new(
        date.and_hms_opt(from, 0, 0).unwrap(),
        date.and_hms_opt(to, 0, 0).unwrap(),
    )
    .unwrap();
    Booking::builder(room, "alice", range).build().unwrap()
}
