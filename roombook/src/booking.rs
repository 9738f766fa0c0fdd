//! Booking types for tracking room reservations.
//!
//! A [`Booking`] is one concrete occurrence of a reservation request: a room,
//! a requester, a half-open [`TimeRange`] and the recurrence it came from.
//! Recurring requests are stored as independent bookings, one per
//! occurrence.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::recurrence::{Recurrence, RecurrenceType, WeekdaySet};
use crate::time_range::TimeRange;

/// The storage-assigned identifier of a booking.
///
/// # Examples
///
/// ```
/// use roombook::BookingId;
///
/// let id = BookingId::new(42);
/// assert_eq!(id.value(), 42);
/// assert_eq!(id.to_string(), "#42");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BookingId(i64);

impl BookingId {
    /// Wraps a raw identifier.
    #[must_use]
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    /// Returns the raw identifier.
    #[must_use]
    pub const fn value(self) -> i64 {
        self.0
    }
}

impl fmt::Display for BookingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl FromStr for BookingId {
    type Err = std::num::ParseIntError;

    /// Parses `42` or `#42`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        s.strip_prefix('#').unwrap_or(s).parse().map(Self)
    }
}

/// Lifecycle state of a booking.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    /// Awaiting approval.
    #[default]
    Pending,
    /// Approved.
    Confirmed,
    /// Declined.
    Rejected,
    /// Withdrawn by the requester.
    Cancelled,
}

impl BookingStatus {
    /// Returns the lowercase name stored in the database.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
            Self::Rejected => "rejected",
            Self::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BookingStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pending" => Ok(Self::Pending),
            "confirmed" => Ok(Self::Confirmed),
            "rejected" => Ok(Self::Rejected),
            "cancelled" | "canceled" => Ok(Self::Cancelled),
            other => Err(ValidationError {
                field: "status".into(),
                message: format!(
                    "unknown status '{other}': expected pending, confirmed, rejected or cancelled"
                ),
            }),
        }
    }
}

/// One stored occurrence of a room reservation.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use roombook::{Booking, RecurrenceType, TimeRange};
///
/// let day = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
/// let range = TimeRange::new(
///     day.and_hms_opt(9, 0, 0).unwrap(),
///     day.and_hms_opt(10, 0, 0).unwrap(),
/// ).unwrap();
///
/// let booking = Booking::builder("R1", "alice", range).build().unwrap();
///
/// assert_eq!(booking.room_id(), "R1");
/// assert_eq!(booking.recurrence_type(), RecurrenceType::Single);
/// assert!(booking.id().is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawBooking")]
pub struct Booking {
    id: Option<BookingId>,
    room_id: String,
    requester_id: String,
    range: TimeRange,
    recurrence_type: RecurrenceType,
    weekdays: WeekdaySet,
    status: BookingStatus,
}

#[derive(Deserialize)]
struct RawBooking {
    id: Option<BookingId>,
    room_id: String,
    requester_id: String,
    range: TimeRange,
    recurrence_type: RecurrenceType,
    #[serde(default)]
    weekdays: WeekdaySet,
    #[serde(default)]
    status: BookingStatus,
}

impl TryFrom<RawBooking> for Booking {
    type Error = ValidationError;

    fn try_from(raw: RawBooking) -> Result<Self, Self::Error> {
        let mut builder = Self::builder(raw.room_id, raw.requester_id, raw.range)
            .recurrence_type(raw.recurrence_type)
            .weekdays(raw.weekdays)
            .status(raw.status);
        if let Some(id) = raw.id {
            builder = builder.id(id);
        }
        builder.build()
    }
}

impl Booking {
    /// Creates a new booking builder.
    ///
    /// The builder starts as an unsaved, single, pending booking.
    #[must_use]
    pub fn builder(
        room_id: impl Into<String>,
        requester_id: impl Into<String>,
        range: TimeRange,
    ) -> BookingBuilder {
        BookingBuilder {
            id: None,
            room_id: room_id.into(),
            requester_id: requester_id.into(),
            range,
            recurrence_type: RecurrenceType::Single,
            weekdays: WeekdaySet::new(),
            status: BookingStatus::default(),
        }
    }

    /// Returns the storage identifier, `None` until the booking is saved.
    #[must_use]
    pub const fn id(&self) -> Option<BookingId> {
        self.id
    }

    /// Returns the room identifier.
    #[must_use]
    pub fn room_id(&self) -> &str {
        &self.room_id
    }

    /// Returns the requester identifier.
    #[must_use]
    pub fn requester_id(&self) -> &str {
        &self.requester_id
    }

    /// Returns the occupied time range.
    #[must_use]
    pub const fn range(&self) -> TimeRange {
        self.range
    }

    /// Returns the inclusive start instant.
    #[must_use]
    pub const fn start_time(&self) -> NaiveDateTime {
        self.range.start()
    }

    /// Returns the exclusive end instant.
    #[must_use]
    pub const fn end_time(&self) -> NaiveDateTime {
        self.range.end()
    }

    /// Returns the recurrence this occurrence was expanded from.
    #[must_use]
    pub const fn recurrence_type(&self) -> RecurrenceType {
        self.recurrence_type
    }

    /// Returns the weekday tag. Always empty unless the booking is weekly.
    #[must_use]
    pub const fn weekdays(&self) -> WeekdaySet {
        self.weekdays
    }

    /// Returns the lifecycle status.
    #[must_use]
    pub const fn status(&self) -> BookingStatus {
        self.status
    }

    /// Returns a copy of this booking carrying the given identifier.
    #[must_use]
    pub fn with_id(mut self, id: BookingId) -> Self {
        self.id = Some(id);
        self
    }
}

/// Builder for creating `Booking` instances.
#[derive(Debug)]
pub struct BookingBuilder {
    id: Option<BookingId>,
    room_id: String,
    requester_id: String,
    range: TimeRange,
    recurrence_type: RecurrenceType,
    weekdays: WeekdaySet,
    status: BookingStatus,
}

impl BookingBuilder {
    /// Sets the storage identifier.
    #[must_use]
    pub const fn id(mut self, id: BookingId) -> Self {
        self.id = Some(id);
        self
    }

    /// Sets the recurrence tag and its weekdays from a resolved rule.
    #[must_use]
    pub const fn recurrence(mut self, recurrence: Recurrence) -> Self {
        self.recurrence_type = recurrence.kind();
        self.weekdays = recurrence.weekdays();
        self
    }

    /// Sets the recurrence tag directly, as read back from storage.
    #[must_use]
    pub const fn recurrence_type(mut self, recurrence_type: RecurrenceType) -> Self {
        self.recurrence_type = recurrence_type;
        self
    }

    /// Sets the weekday tag directly, as read back from storage.
    #[must_use]
    pub const fn weekdays(mut self, weekdays: WeekdaySet) -> Self {
        self.weekdays = weekdays;
        self
    }

    /// Sets the lifecycle status.
    #[must_use]
    pub const fn status(mut self, status: BookingStatus) -> Self {
        self.status = status;
        self
    }

    /// Builds the booking.
    ///
    /// Room and requester identifiers are trimmed of surrounding whitespace.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The room or requester identifier is empty after trimming
    /// - A weekday tag is set on a booking that is not weekly
    pub fn build(self) -> Result<Booking, ValidationError> {
        let room_id = non_empty("room_id", &self.room_id)?;
        let requester_id = non_empty("requester_id", &self.requester_id)?;

        if self.recurrence_type != RecurrenceType::Weekly && !self.weekdays.is_empty() {
            return Err(ValidationError {
                field: "weekdays".into(),
                message: format!(
                    "weekdays are only allowed on WEEKLY bookings, not {}",
                    self.recurrence_type
                ),
            });
        }

        Ok(Booking {
            id: self.id,
            room_id,
            requester_id,
            range: self.range,
            recurrence_type: self.recurrence_type,
            weekdays: self.weekdays,
            status: self.status,
        })
    }
}

fn non_empty(field: &str, value: &str) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError {
            field: field.into(),
            message: format!("{field} must be non-empty after trimming whitespace"),
        });
    }
    Ok(trimmed.to_string())
}

/// Error type for validation failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// The field that failed validation.
    pub field: String,
    /// A description of the validation failure.
    pub message: String,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "validation error for '{}': {}", self.field, self.message)
    }
}

impl std::error::Error for ValidationError {}
