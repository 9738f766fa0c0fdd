//! Configuration validation.

use crate::config::schema::Config;
use crate::error::{Error, Result};
use crate::recurrence::parse_weekday;
use std::collections::HashSet;

/// Validates a merged configuration.
///
/// # Examples
///
/// ```
/// use roombook::config::{Config, ConfigValidator};
///
/// ConfigValidator::validate(&Config::default()).unwrap();
///
/// let bad = Config { maximum_lock_wait_seconds: Some(0), ..Default::default() };
/// assert!(ConfigValidator::validate(&bad).is_err());
/// ```
#[derive(Debug)]
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate a complete configuration.
    ///
    /// # Errors
    ///
    /// Returns a validation error if:
    /// - `default_weekdays` is empty, names an unknown day, or names a day twice
    /// - `maximum_lock_wait_seconds` is zero
    pub fn validate(config: &Config) -> Result<()> {
        if let Some(ref days) = config.default_weekdays {
            Self::validate_weekdays(days)?;
        }

        if config.maximum_lock_wait_seconds == Some(0) {
            return Err(Error::Validation {
                field: "maximum_lock_wait_seconds".into(),
                message: "Timeout must be greater than 0".into(),
            });
        }

        Ok(())
    }

    fn validate_weekdays(days: &[String]) -> Result<()> {
        if days.is_empty() {
            return Err(Error::Validation {
                field: "default_weekdays".into(),
                message: "at least one weekday is required".into(),
            });
        }

        let mut seen = HashSet::new();
        for code in days {
            let day = parse_weekday(code).ok_or_else(|| Error::Validation {
                field: "default_weekdays".into(),
                message: format!("unknown weekday '{code}'"),
            })?;
            if !seen.insert(day) {
                return Err(Error::Validation {
                    field: "default_weekdays".into(),
                    message: format!("weekday '{code}' is listed more than once"),
                });
            }
        }

        Ok(())
    }
}
