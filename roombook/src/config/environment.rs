//! Environment variable handling for configuration overrides.
//!
//! This module provides support for `ROOMBOOK_*` environment variables that
//! override configuration file values.

use crate::config::schema::{Config, OutputFormat};
use crate::error::{Error, Result};
use std::env;

/// Handles environment variable overrides for configuration.
///
/// # Examples
///
/// ```no_run
/// use roombook::config::{Config, EnvironmentConfig};
///
/// let mut config = Config::default();
/// EnvironmentConfig::apply_overrides(&mut config).unwrap();
/// ```
#[derive(Debug)]
pub struct EnvironmentConfig;

impl EnvironmentConfig {
    /// Apply environment variable overrides to config.
    ///
    /// Recognized variables:
    /// - `ROOMBOOK_DEFAULT_WEEKDAYS` (comma-separated codes)
    /// - `ROOMBOOK_DEFAULT_STATUS`
    /// - `ROOMBOOK_MAXIMUM_LOCK_WAIT_SECONDS`
    /// - `ROOMBOOK_OUTPUT_FORMAT`
    ///
    /// # Errors
    ///
    /// Returns an error if any environment variable value is invalid.
    pub fn apply_overrides(config: &mut Config) -> Result<()> {
        if let Ok(days) = env::var("ROOMBOOK_DEFAULT_WEEKDAYS") {
            config.default_weekdays = Some(Self::parse_list(&days));
        }

        if let Ok(status) = env::var("ROOMBOOK_DEFAULT_STATUS") {
            config.default_status = Some(status.parse().map_err(|_| Error::Validation {
                field: "ROOMBOOK_DEFAULT_STATUS".into(),
                message: format!(
                    "Invalid status '{status}' (expected pending/confirmed/rejected/cancelled)"
                ),
            })?);
        }

        if let Ok(seconds) = env::var("ROOMBOOK_MAXIMUM_LOCK_WAIT_SECONDS") {
            config.maximum_lock_wait_seconds =
                Some(seconds.trim().parse().map_err(|_| Error::Validation {
                    field: "ROOMBOOK_MAXIMUM_LOCK_WAIT_SECONDS".into(),
                    message: "Must be a positive integer".into(),
                })?);
        }

        if let Ok(format) = env::var("ROOMBOOK_OUTPUT_FORMAT") {
            config.output_format = Some(format.parse::<OutputFormat>().map_err(|_| {
                Error::Validation {
                    field: "ROOMBOOK_OUTPUT_FORMAT".into(),
                    message: format!("Invalid format '{format}' (expected table/json/csv)"),
                }
            })?);
        }

        Ok(())
    }

    /// Split a comma-separated list, dropping blank entries.
    fn parse_list(s: &str) -> Vec<String> {
        s.split(',')
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .map(String::from)
            .collect()
    }
}
