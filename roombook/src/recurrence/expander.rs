//! Expansion of recurrence requests into concrete occurrences.

use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta, Timelike};

use crate::booking::{Booking, BookingStatus};
use crate::config::Config;
use crate::database::STORABLE_YEARS;
use crate::error::{Error, Result};
use crate::time_range::TimeRange;

use super::{Recurrence, RecurrenceRequest, RecurrenceType, WeekdaySet};

const DATE_FORMAT: &str = "%Y-%m-%d";
const TIME_FORMATS: [&str; 2] = ["%H:%M", "%H:%M:%S"];

/// Turns [`RecurrenceRequest`]s into ordered, independent booking values.
///
/// Expansion is deterministic and touches no storage.
///
/// - `SINGLE` yields one occurrence spanning the whole range.
/// - `DAILY` yields one occurrence per calendar day between the start and
///   end dates (end date excluded), each ending at the end time of day.
/// - `WEEKLY` yields one occurrence per whole week in the range, on the
///   start weekday, each ending at the end time of day and tagged with the
///   resolved weekday set. Weekdays are a label only: they do not select
///   which days are booked.
///
/// A daily or weekly range that spans no whole day/week yields an empty
/// sequence.
#[derive(Debug, Clone)]
pub struct RecurrenceExpander {
    default_weekdays: WeekdaySet,
    default_status: BookingStatus,
}

impl Default for RecurrenceExpander {
    fn default() -> Self {
        Self::new()
    }
}

impl RecurrenceExpander {
    /// Creates an expander with Monday–Friday as the weekly default and
    /// `pending` as the default status.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            default_weekdays: WeekdaySet::workweek(),
            default_status: BookingStatus::Pending,
        }
    }

    /// Creates an expander using the defaults from a configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured default weekdays are invalid.
    pub fn from_config(config: &Config) -> Result<Self> {
        let mut expander = Self::new();
        if let Some(days) = config.default_weekday_set()? {
            expander = expander.with_default_weekdays(days);
        }
        if let Some(status) = config.default_status {
            expander = expander.with_default_status(status);
        }
        Ok(expander)
    }

    /// Sets the weekday tag used when a weekly request names none.
    ///
    /// An empty set is ignored.
    #[must_use]
    pub fn with_default_weekdays(mut self, days: WeekdaySet) -> Self {
        if !days.is_empty() {
            self.default_weekdays = days;
        }
        self
    }

    /// Sets the status used when a request names none.
    #[must_use]
    pub const fn with_default_status(mut self, status: BookingStatus) -> Self {
        self.default_status = status;
        self
    }

    /// Returns the weekly default weekday set.
    #[must_use]
    pub const fn default_weekdays(&self) -> WeekdaySet {
        self.default_weekdays
    }

    /// Expands a request into its occurrences, in start order.
    ///
    /// Every returned booking is unsaved (no id) and satisfies
    /// `start < end`.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidInput`] if a date or time is missing or
    ///   unparseable, a weekday code is unknown, or an occurrence would end
    ///   at or before its start.
    /// - [`Error::InvalidRecurrenceType`] for an unknown recurrence type.
    /// - [`Error::Validation`] if the room or requester is blank.
    pub fn expand(&self, request: &RecurrenceRequest) -> Result<Vec<Booking>> {
        let start = parse_date_time("start", &request.start_date, &request.start_time)?;
        let end = parse_date_time("end", &request.end_date, &request.end_time)?;
        let recurrence = self.resolve_recurrence(request)?;
        let status = request.status.unwrap_or(self.default_status);

        let ranges = occurrence_ranges(start, end, recurrence.kind())?;

        let bookings = ranges
            .into_iter()
            .map(|range| {
                Booking::builder(request.room_id.clone(), request.requester_id.clone(), range)
                    .recurrence(recurrence)
                    .status(status)
                    .build()
            })
            .collect::<std::result::Result<Vec<_>, _>>()?;

        log::debug!(
            "expanded {} request for room {} into {} occurrence(s)",
            recurrence.kind(),
            request.room_id,
            bookings.len()
        );

        Ok(bookings)
    }

    fn resolve_recurrence(&self, request: &RecurrenceRequest) -> Result<Recurrence> {
        let recurrence = match request.recurrence_type.parse::<RecurrenceType>()? {
            RecurrenceType::Single => Recurrence::Single,
            RecurrenceType::Daily => Recurrence::Daily,
            RecurrenceType::Weekly => {
                let requested = match &request.weekdays {
                    Some(codes) => {
                        WeekdaySet::from_codes(codes).map_err(|e| Error::InvalidInput {
                            field: "weekdays".into(),
                            message: e.to_string(),
                        })?
                    }
                    None => WeekdaySet::new(),
                };
                if requested.is_empty() {
                    Recurrence::Weekly(self.default_weekdays)
                } else {
                    Recurrence::Weekly(requested)
                }
            }
        };
        Ok(recurrence)
    }
}

/// Parses a `YYYY-MM-DD` date and an `HH:MM[:SS]` time into one timestamp.
fn parse_date_time(field: &str, date: &str, time: &str) -> Result<NaiveDateTime> {
    let (date, time) = (date.trim(), time.trim());
    if date.is_empty() || time.is_empty() {
        return Err(Error::InvalidInput {
            field: field.into(),
            message: "date and time are required".into(),
        });
    }

    let invalid = || Error::InvalidInput {
        field: field.into(),
        message: format!("cannot parse '{date} {time}' as YYYY-MM-DD HH:MM"),
    };

    let day = NaiveDate::parse_from_str(date, DATE_FORMAT).map_err(|_| invalid())?;
    if !STORABLE_YEARS.contains(&day.year()) {
        return Err(Error::InvalidInput {
            field: field.into(),
            message: format!("year {} is outside 0000-9999", day.year()),
        });
    }
    let time_of_day = TIME_FORMATS
        .iter()
        .find_map(|format| NaiveTime::parse_from_str(time, format).ok())
        .ok_or_else(invalid)?;

    Ok(day.and_time(time_of_day))
}

/// Computes the occurrence ranges for a validated start/end pair.
fn occurrence_ranges(
    start: NaiveDateTime,
    end: NaiveDateTime,
    kind: RecurrenceType,
) -> Result<Vec<TimeRange>> {
    match kind {
        RecurrenceType::Single => Ok(vec![checked_range(start, end)?]),
        RecurrenceType::Daily => {
            let days = (end.date() - start.date()).num_days();
            repeat_with_step(start, end, days, TimeDelta::days(1))
        }
        RecurrenceType::Weekly => {
            let weeks = (end.date() - start.date()).num_days().div_euclid(7);
            repeat_with_step(start, end, weeks, TimeDelta::weeks(1))
        }
    }
}

/// Emits `count` occurrences, each `step` after the previous one, ending at
/// the hour and minute of `end` on the occurrence's own date.
fn repeat_with_step(
    start: NaiveDateTime,
    end: NaiveDateTime,
    count: i64,
    step: TimeDelta,
) -> Result<Vec<TimeRange>> {
    if count <= 0 {
        return Ok(Vec::new());
    }

    let end_of_day = NaiveTime::from_hms_opt(end.hour(), end.minute(), 0).ok_or_else(|| {
        Error::InvalidInput {
            field: "end".into(),
            message: "end time of day is out of range".into(),
        }
    })?;

    (0..count)
        .map(|i| {
            let occurrence_start = start + step * i32::try_from(i).unwrap_or(i32::MAX);
            let occurrence_end = occurrence_start.date().and_time(end_of_day);
            checked_range(occurrence_start, occurrence_end)
        })
        .collect()
}

fn checked_range(start: NaiveDateTime, end: NaiveDateTime) -> Result<TimeRange> {
    TimeRange::new(start, end).map_err(|e| Error::InvalidInput {
        field: "end".into(),
        message: e.to_string(),
    })
}
