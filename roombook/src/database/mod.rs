//! Database layer for persistent storage of bookings.
//!
//! This module provides a SQLite-based [`BookingStore`](crate::BookingStore):
//! connection management, schema versioning, and the booking reads and
//! writes behind [`BookingRepository`](crate::BookingRepository).
//!
//! # Examples
//!
//! ```no_run
//! use roombook::database::{Database, DatabaseConfig};
//! use roombook::{BookingCriteria, BookingRepository, BookingStore};
//!
//! let db = Database::open(DatabaseConfig::new("/tmp/roombook.db")).unwrap();
//!
//! let count = db.read(|repo| repo.count(&BookingCriteria::new())).unwrap();
//! println!("{count} bookings");
//! ```

mod config;
mod connection;
pub mod migrations;
mod operations;
mod schema;
mod transaction;

#[cfg(test)]
pub(crate) mod test_util;

// Re-export public API
pub use config::{
    default_data_dir, resolve_data_dir, resolve_database_path, DatabaseConfig, DATABASE_FILE_NAME,
    DATA_DIR_ENV,
};
pub use connection::Database;
pub use schema::{CURRENT_SCHEMA_VERSION, STORABLE_YEARS, TIMESTAMP_FORMAT};

// Re-export migration functions for advanced use cases
pub use migrations::{check_schema_compatibility, get_schema_version, initialize_schema};
