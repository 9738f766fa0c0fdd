//! Database schema definitions and SQL constants.
//!
//! This module contains the SQL table definitions, indices, and constants
//! for the booking store.

/// Current schema version for the database.
///
/// This version is stored in the metadata table and is used to ensure
/// compatibility between the database and the application.
pub const CURRENT_SCHEMA_VERSION: u32 = 1;

/// Text format of every stored timestamp.
///
/// Fixed-width ISO-8601, so lexical order in SQL matches chronological
/// order.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Years that [`TIMESTAMP_FORMAT`] renders as four unsigned digits.
///
/// Outside this span chrono adds a sign or a fifth digit and text order no
/// longer follows time order.
pub const STORABLE_YEARS: std::ops::RangeInclusive<i32> = 0..=9999;

/// SQL statement to create the metadata table.
///
/// The metadata table stores key-value pairs for database configuration
/// and versioning information.
pub const CREATE_METADATA_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS metadata (
        key TEXT PRIMARY KEY NOT NULL,
        value TEXT NOT NULL
    )";

/// SQL statement to create the bookings table.
///
/// One row per occurrence. The CHECK constraint repeats the `start < end`
/// invariant so that no code path can store an empty range.
pub const CREATE_BOOKINGS_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS bookings (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        room_id TEXT NOT NULL,
        requester_id TEXT NOT NULL,
        start_time TEXT NOT NULL,
        end_time TEXT NOT NULL,
        recurrence_type TEXT NOT NULL,
        weekdays TEXT NOT NULL DEFAULT '',
        status TEXT NOT NULL,
        CHECK (start_time < end_time)
    )";

/// SQL statement to create an index for room overlap lookups.
pub const CREATE_ROOM_TIME_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS idx_bookings_room_time ON bookings(room_id, start_time, end_time)";

/// SQL statement to create an index on the requester column.
pub const CREATE_REQUESTER_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS idx_bookings_requester ON bookings(requester_id)";

/// SQL statement to create an index on the status column.
pub const CREATE_STATUS_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS idx_bookings_status ON bookings(status)";

/// SQL statement to select the schema version from the metadata table.
pub const SELECT_SCHEMA_VERSION: &str = "SELECT value FROM metadata WHERE key = 'schema_version'";

/// SQL statement to insert or update the schema version in the metadata table.
pub const INSERT_SCHEMA_VERSION: &str =
    "INSERT OR REPLACE INTO metadata (key, value) VALUES ('schema_version', ?)";

/// Column list shared by every booking SELECT.
pub const BOOKING_COLUMNS: &str =
    "id, room_id, requester_id, start_time, end_time, recurrence_type, weekdays, status";
