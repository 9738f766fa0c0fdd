//! Error types for the roombook library.
//!
//! This module provides the error hierarchy for every booking operation,
//! using `thiserror` for ergonomic error handling.

use thiserror::Error;

use crate::booking::BookingId;
use crate::conflict::Conflict;

/// Result type alias for operations that may fail with a roombook error.
///
/// # Examples
///
/// ```
/// use roombook::{Error, Result};
///
/// fn example_operation() -> Result<usize> {
///     Ok(3)
/// }
/// ```
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for the roombook library.
#[derive(Debug, Error)]
pub enum Error {
    /// A timestamp field was missing or could not be parsed.
    #[error("invalid input for '{field}': {message}")]
    InvalidInput {
        /// The request field that was rejected.
        field: String,
        /// A description of the problem.
        message: String,
    },

    /// The recurrence type string is not one of the known values.
    #[error("invalid recurrence type '{value}': expected SINGLE, DAILY or WEEKLY")]
    InvalidRecurrenceType {
        /// The rejected recurrence type string.
        value: String,
    },

    /// One or more occurrences overlap bookings that are already committed.
    ///
    /// Nothing from the request was persisted.
    #[error("booking conflict: {}", describe_conflicts(.conflicts))]
    Conflict {
        /// Every occurrence/existing-booking pair that overlaps.
        conflicts: Vec<Conflict>,
    },

    /// The storage layer could not obtain its exclusive unit of work in time.
    ///
    /// The whole request may be retried.
    #[error("storage contention: {details}")]
    StorageContention {
        /// Details reported by the storage layer.
        details: String,
    },

    /// The requested booking does not exist.
    #[error("booking {id} not found")]
    NotFound {
        /// The identifier that was looked up.
        id: BookingId,
    },

    /// A validation error occurred.
    #[error("validation error for '{field}': {message}")]
    Validation {
        /// The field that failed validation.
        field: String,
        /// A description of the validation failure.
        message: String,
    },

    /// A database error occurred.
    #[error("database error: {0}")]
    Database(#[source] rusqlite::Error),

    /// A configuration error occurred.
    #[error("configuration error: {0}")]
    Configuration(#[from] serde_yaml::Error),

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// An unsupported schema version was encountered.
    #[error("unsupported schema version: expected {expected}, found {found}")]
    UnsupportedSchemaVersion {
        /// The expected schema version.
        expected: u32,
        /// The schema version found in the database.
        found: u32,
    },
}

fn describe_conflicts(conflicts: &[Conflict]) -> String {
    match conflicts {
        [] => "no details".to_string(),
        [only] => only.to_string(),
        [first, rest @ ..] => format!("{first} (and {} more)", rest.len()),
    }
}

impl From<rusqlite::Error> for Error {
    fn from(err: rusqlite::Error) -> Self {
        match err {
            rusqlite::Error::SqliteFailure(ref failure, ref message)
                if matches!(
                    failure.code,
                    rusqlite::ErrorCode::DatabaseBusy | rusqlite::ErrorCode::DatabaseLocked
                ) =>
            {
                Self::StorageContention {
                    details: message.clone().unwrap_or_else(|| failure.to_string()),
                }
            }
            other => Self::Database(other),
        }
    }
}

impl From<crate::booking::ValidationError> for Error {
    fn from(err: crate::booking::ValidationError) -> Self {
        Self::Validation {
            field: err.field,
            message: err.message,
        }
    }
}

impl Error {
    /// Returns true when re-running the whole request may succeed.
    ///
    /// # Examples
    ///
    /// ```
    /// use roombook::Error;
    ///
    /// let err = Error::StorageContention { details: "database is locked".into() };
    /// assert!(err.is_retryable());
    ///
    /// let err = Error::InvalidRecurrenceType { value: "MONTHLY".into() };
    /// assert!(!err.is_retryable());
    /// ```
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::StorageContention { .. })
    }

    /// Returns the conflicts carried by a [`Error::Conflict`], if any.
    #[must_use]
    pub fn conflicts(&self) -> Option<&[Conflict]> {
        match self {
            Self::Conflict { conflicts } => Some(conflicts),
            _ => None,
        }
    }
}
