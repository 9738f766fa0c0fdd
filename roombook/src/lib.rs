#![deny(missing_docs, unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

//! # roombook
//!
//! A library for conflict-safe room reservations.
//!
//! A booking request names a room, a requester, a start and end, and a
//! recurrence (`SINGLE`, `DAILY` or `WEEKLY`). The request is expanded into
//! concrete occurrences, every occurrence is checked against the bookings
//! already committed for that room, and the occurrences are stored only if
//! none of them overlaps. A request is never partially booked.
//!
//! ## Core Types
//!
//! - [`TimeRange`]: A half-open `[start, end)` interval
//! - [`RecurrenceRequest`] and [`RecurrenceExpander`]: Requests and their expansion
//! - [`Booking`], [`BookingId`] and [`BookingStatus`]: Stored bookings
//! - [`ConflictDetector`] and [`Conflict`]: Overlap detection
//! - [`BookingService`]: The create/update/delete lifecycle
//! - [`BookingStore`]: Units of work, backed by [`Database`] or [`MemoryStore`]
//! - [`Error`] and [`Result`]: Error handling types
//! - [`Logger`] and [`LogLevel`]: Logging infrastructure
//!
//! ## Examples
//!
//! ```
//! use roombook::{BookingService, MemoryStore, RecurrenceRequest};
//!
//! let mut service = BookingService::new(MemoryStore::new());
//!
//! let request = RecurrenceRequest::new("R1", "alice")
//!     .with_start("2024-01-01", "09:00")
//!     .with_end("2024-01-22", "10:00")
//!     .with_recurrence_type("WEEKLY");
//!
//! let outcome = service.create(&request).unwrap();
//! assert_eq!(outcome.bookings().len(), 3);
//! ```

pub mod booking;
pub mod config;
pub mod conflict;
pub mod database;
pub mod error;
pub mod logging;
pub mod recurrence;
pub mod service;
pub mod store;
pub mod time_range;

// Re-export key types at crate root for convenience
pub use booking::{Booking, BookingBuilder, BookingId, BookingStatus, ValidationError};
pub use config::{Config, ConfigBuilder, OutputFormat};
pub use conflict::{Conflict, ConflictDetector};
pub use database::{Database, DatabaseConfig};
pub use error::{Error, Result};
pub use logging::{init_logger, LogLevel, Logger};
pub use recurrence::{Recurrence, RecurrenceExpander, RecurrenceRequest, RecurrenceType, WeekdaySet};
pub use service::{BookingOutcome, BookingService};
pub use store::{BookingCriteria, BookingRepository, BookingStore, MemoryStore};
pub use time_range::{InvalidRangeError, TimeRange};
