//! Configuration schema definitions.
//!
//! This module defines the configuration structure for roombook: recurrence
//! defaults, storage lock waits and listing output.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::booking::BookingStatus;
use crate::error::{Error, Result};
use crate::recurrence::WeekdaySet;

/// Lock wait used when none is configured.
pub const DEFAULT_LOCK_WAIT_SECONDS: u64 = 5;

/// Complete configuration structure.
///
/// Every field is optional so that sources can be layered; unset fields
/// fall back to built-in defaults through the accessor methods.
///
/// # Examples
///
/// ```
/// use roombook::config::{Config, OutputFormat};
///
/// let config: Config = serde_yaml::from_str(
///     "default_weekdays: [mo, we]\noutput_format: json\n",
/// ).unwrap();
/// assert_eq!(config.output_format(), OutputFormat::Json);
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Weekday codes tagged on weekly bookings that name none.
    pub default_weekdays: Option<Vec<String>>,

    /// Status given to bookings whose request names none.
    pub default_status: Option<BookingStatus>,

    /// Maximum time to wait for the storage lock (seconds).
    pub maximum_lock_wait_seconds: Option<u64>,

    /// Output format for list commands.
    pub output_format: Option<OutputFormat>,
}

impl Config {
    /// Returns the configured weekly default set, if any.
    ///
    /// # Errors
    ///
    /// Returns a validation error if a configured code is not a weekday.
    pub fn default_weekday_set(&self) -> Result<Option<WeekdaySet>> {
        self.default_weekdays
            .as_ref()
            .map(|codes| {
                WeekdaySet::from_codes(codes).map_err(|e| Error::Validation {
                    field: "default_weekdays".into(),
                    message: e.to_string(),
                })
            })
            .transpose()
    }

    /// Returns the storage lock wait, defaulting to five seconds.
    #[must_use]
    pub fn lock_wait(&self) -> Duration {
        Duration::from_secs(
            self.maximum_lock_wait_seconds
                .unwrap_or(DEFAULT_LOCK_WAIT_SECONDS),
        )
    }

    /// Returns the listing format, defaulting to a table.
    #[must_use]
    pub fn output_format(&self) -> OutputFormat {
        self.output_format.unwrap_or_default()
    }
}

/// Output format for listing bookings.
///
/// # Examples
///
/// ```
/// use roombook::config::OutputFormat;
///
/// let format: OutputFormat = "CSV".parse().unwrap();
/// assert_eq!(format.to_string(), "csv");
/// ```
#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable table format.
    #[default]
    Table,
    /// JSON output format.
    Json,
    /// CSV output format.
    Csv,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Table => write!(f, "table"),
            Self::Json => write!(f, "json"),
            Self::Csv => write!(f, "csv"),
        }
    }
}

impl FromStr for OutputFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "table" => Ok(Self::Table),
            "json" => Ok(Self::Json),
            "csv" => Ok(Self::Csv),
            _ => Err(Error::Validation {
                field: "output_format".into(),
                message: format!("unknown format '{s}': expected table, json or csv"),
            }),
        }
    }
}
