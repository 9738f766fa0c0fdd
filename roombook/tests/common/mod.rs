//! Common test utilities for integration tests.
//!
//! This module provides helper functions and request builders for testing
//! the roombook library.

use std::path::{Path, PathBuf};
use std::time::Duration;

use roombook::{Database, DatabaseConfig, RecurrenceRequest};
use tempfile::TempDir;

/// A database file in a temporary directory.
///
/// The directory is removed when the fixture is dropped, so keep it alive
/// for as long as any [`Database`] opened from it.
pub struct TestDatabase {
    dir: TempDir,
}

#[allow(dead_code)]
impl TestDatabase {
    /// Creates an empty temporary directory for the database.
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().unwrap(),
        }
    }

    /// Path of the database file.
    pub fn path(&self) -> PathBuf {
        self.dir.path().join("roombook.db")
    }

    /// The temporary data directory.
    pub fn dir(&self) -> &Path {
        self.dir.path()
    }

    /// Opens a new connection to the database.
    pub fn open(&self) -> Database {
        Database::open(DatabaseConfig::new(self.path())).unwrap()
    }

    /// Opens a new connection with a custom busy timeout.
    pub fn open_with_timeout(&self, timeout: Duration) -> Database {
        Database::open(DatabaseConfig::new(self.path()).with_busy_timeout(timeout)).unwrap()
    }
}

/// A single booking request on 2024-01-`day`.
#[allow(dead_code)]
pub fn single(room: &str, requester: &str, day: u32, from: &str, to: &str) -> RecurrenceRequest {
    let date = format!("2024-01-{day:02}");
    RecurrenceRequest::new(room, requester)
        .with_start(date.clone(), from)
        .with_end(date, to)
}

/// A recurring request from 2024-01-`first` to 2024-01-`last`.
#[allow(dead_code)]
pub fn recurring(
    room: &str,
    requester: &str,
    kind: &str,
    first: u32,
    last: u32,
    from: &str,
    to: &str,
) -> RecurrenceRequest {
    RecurrenceRequest::new(room, requester)
        .with_start(format!("2024-01-{first:02}"), from)
        .with_end(format!("2024-01-{last:02}"), to)
        .with_recurrence_type(kind)
}
