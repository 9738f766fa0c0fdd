//! Weekday sets attached to weekly bookings.

use std::fmt;
use std::str::FromStr;

use chrono::Weekday;
use serde::{Deserialize, Serialize};

const ALL_DAYS: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

/// Returns the two-letter lowercase code for a weekday (`mo`, `tu`, ...).
#[must_use]
pub const fn weekday_code(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "mo",
        Weekday::Tue => "tu",
        Weekday::Wed => "we",
        Weekday::Thu => "th",
        Weekday::Fri => "fr",
        Weekday::Sat => "sa",
        Weekday::Sun => "su",
    }
}

/// Parses a weekday from its two-letter code, three-letter abbreviation or
/// full English name, ignoring case and surrounding whitespace.
#[must_use]
pub fn parse_weekday(s: &str) -> Option<Weekday> {
    let day = match s.trim().to_lowercase().as_str() {
        "mo" | "mon" | "monday" => Weekday::Mon,
        "tu" | "tue" | "tuesday" => Weekday::Tue,
        "we" | "wed" | "wednesday" => Weekday::Wed,
        "th" | "thu" | "thursday" => Weekday::Thu,
        "fr" | "fri" | "friday" => Weekday::Fri,
        "sa" | "sat" | "saturday" => Weekday::Sat,
        "su" | "sun" | "sunday" => Weekday::Sun,
        _ => return None,
    };
    Some(day)
}

/// An ordered set of weekdays, Monday first.
///
/// The textual form is the comma-separated list of two-letter codes, e.g.
/// `"mo, we, fr"`; this is also how it is stored.
///
/// # Examples
///
/// ```
/// use roombook::WeekdaySet;
///
/// let set: WeekdaySet = "fr, mo".parse().unwrap();
/// assert_eq!(set.to_string(), "mo, fr");
/// assert_eq!(WeekdaySet::workweek().len(), 5);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct WeekdaySet {
    bits: u8,
}

impl WeekdaySet {
    /// Creates an empty set.
    #[must_use]
    pub const fn new() -> Self {
        Self { bits: 0 }
    }

    /// Monday through Friday, the default for weekly requests.
    #[must_use]
    pub const fn workweek() -> Self {
        Self { bits: 0b001_1111 }
    }

    /// Adds a day to the set. Returns false if it was already present.
    pub fn insert(&mut self, day: Weekday) -> bool {
        let mask = 1 << day.num_days_from_monday();
        let added = self.bits & mask == 0;
        self.bits |= mask;
        added
    }

    /// Returns true if the day is in the set.
    #[must_use]
    pub fn contains(&self, day: Weekday) -> bool {
        self.bits & (1 << day.num_days_from_monday()) != 0
    }

    /// Returns the number of days in the set.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.bits.count_ones() as usize
    }

    /// Returns true if no day is in the set.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.bits == 0
    }

    /// Iterates the days in Monday-first order.
    pub fn iter(&self) -> impl Iterator<Item = Weekday> + '_ {
        ALL_DAYS.into_iter().filter(|day| self.contains(*day))
    }

    /// Builds a set from day codes, rejecting unknown codes.
    ///
    /// # Errors
    ///
    /// Returns the first code that is not a recognised weekday.
    pub fn from_codes<I, S>(codes: I) -> Result<Self, InvalidWeekdayError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = Self::new();
        for code in codes {
            let code = code.as_ref();
            if code.trim().is_empty() {
                continue;
            }
            let day = parse_weekday(code).ok_or_else(|| InvalidWeekdayError {
                code: code.trim().to_string(),
            })?;
            set.insert(day);
        }
        Ok(set)
    }

    /// Returns the two-letter codes of the days in the set.
    #[must_use]
    pub fn codes(&self) -> Vec<&'static str> {
        self.iter().map(weekday_code).collect()
    }
}

impl FromIterator<Weekday> for WeekdaySet {
    fn from_iter<T: IntoIterator<Item = Weekday>>(iter: T) -> Self {
        let mut set = Self::new();
        for day in iter {
            set.insert(day);
        }
        set
    }
}

impl fmt::Display for WeekdaySet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.codes().join(", "))
    }
}

impl FromStr for WeekdaySet {
    type Err = InvalidWeekdayError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_codes(s.split(','))
    }
}

impl TryFrom<Vec<String>> for WeekdaySet {
    type Error = InvalidWeekdayError;

    fn try_from(codes: Vec<String>) -> Result<Self, Self::Error> {
        Self::from_codes(codes)
    }
}

impl From<WeekdaySet> for Vec<String> {
    fn from(set: WeekdaySet) -> Self {
        set.codes().into_iter().map(String::from).collect()
    }
}

/// Error for a weekday code that is not recognised.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidWeekdayError {
    /// The rejected code.
    pub code: String,
}

impl fmt::Display for InvalidWeekdayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown weekday '{}': expected one of mo, tu, we, th, fr, sa, su",
            self.code
        )
    }
}

impl std::error::Error for InvalidWeekdayError {}
