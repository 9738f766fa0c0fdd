//! Recurrence rules and the raw requests they come from.
//!
//! A [`RecurrenceRequest`] is what the API boundary hands over: untrusted
//! strings for the date/time range and recurrence type. The
//! [`RecurrenceExpander`] validates it and turns it into concrete
//! [`Booking`](crate::Booking) occurrences, one per stored row.
//!
//! # Examples
//!
//! ```
//! use roombook::{RecurrenceExpander, RecurrenceRequest};
//!
//! let request = RecurrenceRequest::new("R1", "alice")
//!     .with_start("2024-01-01", "09:30")
//!     .with_end("2024-01-04", "10:30")
//!     .with_recurrence_type("DAILY");
//!
//! let occurrences = RecurrenceExpander::new().expand(&request).unwrap();
//! assert_eq!(occurrences.len(), 3);
//! ```

mod expander;
mod weekday;

#[cfg(test)]
mod proptests;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::booking::BookingStatus;
use crate::error::Error;

pub use expander::RecurrenceExpander;
pub use weekday::{parse_weekday, weekday_code, InvalidWeekdayError, WeekdaySet};

/// The recurrence tag stored on every booking row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RecurrenceType {
    /// A single occurrence.
    Single,
    /// One occurrence per calendar day.
    Daily,
    /// One occurrence per elapsed week.
    Weekly,
}

impl RecurrenceType {
    /// Returns the canonical uppercase name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Single => "SINGLE",
            Self::Daily => "DAILY",
            Self::Weekly => "WEEKLY",
        }
    }
}

impl fmt::Display for RecurrenceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RecurrenceType {
    type Err = Error;

    /// Parses a recurrence type, ignoring case.
    ///
    /// `ONLY` is accepted as a legacy spelling of `SINGLE`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "SINGLE" | "ONLY" => Ok(Self::Single),
            "DAILY" => Ok(Self::Daily),
            "WEEKLY" => Ok(Self::Weekly),
            _ => Err(Error::InvalidRecurrenceType {
                value: s.to_string(),
            }),
        }
    }
}

/// A resolved recurrence rule.
///
/// Only the weekly rule carries weekdays, so a daily or single booking can
/// never end up with a weekday tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Recurrence {
    /// Exactly one occurrence spanning the requested range.
    Single,
    /// One occurrence per calendar day of the range.
    Daily,
    /// One occurrence per elapsed week, tagged with these weekdays.
    Weekly(WeekdaySet),
}

impl Recurrence {
    /// Returns the tag stored on each occurrence.
    #[must_use]
    pub const fn kind(&self) -> RecurrenceType {
        match self {
            Self::Single => RecurrenceType::Single,
            Self::Daily => RecurrenceType::Daily,
            Self::Weekly(_) => RecurrenceType::Weekly,
        }
    }

    /// Returns the weekday tag, empty for anything but weekly rules.
    #[must_use]
    pub const fn weekdays(&self) -> WeekdaySet {
        match self {
            Self::Weekly(days) => *days,
            Self::Single | Self::Daily => WeekdaySet::new(),
        }
    }
}

/// A raw reservation request as received from the API boundary.
///
/// Dates use `YYYY-MM-DD` and times `HH:MM` (seconds optional). Nothing is
/// validated until the request is expanded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecurrenceRequest {
    /// The room being reserved.
    pub room_id: String,
    /// The person making the reservation.
    pub requester_id: String,
    /// First day of the range.
    pub start_date: String,
    /// Start time of day.
    pub start_time: String,
    /// Last day of the range.
    pub end_date: String,
    /// End time of day.
    pub end_time: String,
    /// `SINGLE`, `DAILY` or `WEEKLY`.
    pub recurrence_type: String,
    /// Weekday codes for weekly requests.
    #[serde(default)]
    pub weekdays: Option<Vec<String>>,
    /// Status given to every occurrence. Falls back to the expander default.
    #[serde(default)]
    pub status: Option<BookingStatus>,
}

impl RecurrenceRequest {
    /// Creates a single-occurrence request with an empty time range.
    ///
    /// Use the `with_*` methods to fill in the rest.
    #[must_use]
    pub fn new(room_id: impl Into<String>, requester_id: impl Into<String>) -> Self {
        Self {
            room_id: room_id.into(),
            requester_id: requester_id.into(),
            start_date: String::new(),
            start_time: String::new(),
            end_date: String::new(),
            end_time: String::new(),
            recurrence_type: RecurrenceType::Single.as_str().to_string(),
            weekdays: None,
            status: None,
        }
    }

    /// Sets the start date and time.
    #[must_use]
    pub fn with_start(mut self, date: impl Into<String>, time: impl Into<String>) -> Self {
        self.start_date = date.into();
        self.start_time = time.into();
        self
    }

    /// Sets the end date and time.
    #[must_use]
    pub fn with_end(mut self, date: impl Into<String>, time: impl Into<String>) -> Self {
        self.end_date = date.into();
        self.end_time = time.into();
        self
    }

    /// Sets the recurrence type string.
    #[must_use]
    pub fn with_recurrence_type(mut self, recurrence_type: impl Into<String>) -> Self {
        self.recurrence_type = recurrence_type.into();
        self
    }

    /// Sets the weekday codes.
    #[must_use]
    pub fn with_weekdays<I, S>(mut self, weekdays: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.weekdays = Some(weekdays.into_iter().map(Into::into).collect());
        self
    }

    /// Sets the status for every occurrence.
    #[must_use]
    pub const fn with_status(mut self, status: BookingStatus) -> Self {
        self.status = Some(status);
        self
    }
}
