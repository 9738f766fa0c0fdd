//! Half-open time ranges.
//!
//! A [`TimeRange`] is the interval `[start, end)`: the end instant is
//! excluded, so two ranges that merely touch never overlap.

use std::fmt;

use chrono::{NaiveDateTime, TimeDelta};
use serde::{Deserialize, Serialize};

/// Display format shared by ranges and the CLI.
pub const DISPLAY_FORMAT: &str = "%Y-%m-%d %H:%M";

/// A validated half-open interval `[start, end)` with `start < end`.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use roombook::TimeRange;
///
/// let day = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
/// let morning = TimeRange::new(
///     day.and_hms_opt(10, 0, 0).unwrap(),
///     day.and_hms_opt(11, 0, 0).unwrap(),
/// ).unwrap();
/// let later = TimeRange::new(
///     day.and_hms_opt(11, 0, 0).unwrap(),
///     day.and_hms_opt(12, 0, 0).unwrap(),
/// ).unwrap();
///
/// assert!(!morning.overlaps(&later));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "RawTimeRange")]
pub struct TimeRange {
    start: NaiveDateTime,
    end: NaiveDateTime,
}

#[derive(Deserialize)]
struct RawTimeRange {
    start: NaiveDateTime,
    end: NaiveDateTime,
}

impl TryFrom<RawTimeRange> for TimeRange {
    type Error = InvalidRangeError;

    fn try_from(raw: RawTimeRange) -> Result<Self, Self::Error> {
        Self::new(raw.start, raw.end)
    }
}

impl TimeRange {
    /// Creates a new range.
    ///
    /// # Errors
    ///
    /// Returns an error if `start` is not strictly before `end`.
    pub fn new(start: NaiveDateTime, end: NaiveDateTime) -> Result<Self, InvalidRangeError> {
        if start >= end {
            return Err(InvalidRangeError { start, end });
        }
        Ok(Self { start, end })
    }

    /// Returns the inclusive start instant.
    #[must_use]
    pub const fn start(&self) -> NaiveDateTime {
        self.start
    }

    /// Returns the exclusive end instant.
    #[must_use]
    pub const fn end(&self) -> NaiveDateTime {
        self.end
    }

    /// Returns the length of the range.
    #[must_use]
    pub fn duration(&self) -> TimeDelta {
        self.end - self.start
    }

    /// Returns true if the two ranges share at least one instant.
    ///
    /// `[a, b)` and `[c, d)` overlap iff `a < d && b > c`. Storage
    /// predicates use the exact same comparison.
    #[must_use]
    pub fn overlaps(&self, other: &Self) -> bool {
        self.start < other.end && self.end > other.start
    }

    /// Returns true if `instant` lies inside the range.
    #[must_use]
    pub fn contains(&self, instant: NaiveDateTime) -> bool {
        self.start <= instant && instant < self.end
    }
}

impl fmt::Display for TimeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}, {})",
            self.start.format(DISPLAY_FORMAT),
            self.end.format(DISPLAY_FORMAT)
        )
    }
}

/// Error returned when a range would be empty or inverted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidRangeError {
    /// The rejected start instant.
    pub start: NaiveDateTime,
    /// The rejected end instant.
    pub end: NaiveDateTime,
}

impl fmt::Display for InvalidRangeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "end {} is not after start {}",
            self.end.format(DISPLAY_FORMAT),
            self.start.format(DISPLAY_FORMAT)
        )
    }
}

impl std::error::Error for InvalidRangeError {}
