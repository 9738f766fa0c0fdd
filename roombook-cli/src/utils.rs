//! Utility functions for CLI operations.
//!
//! This module provides common utility functions used across CLI commands,
//! including configuration loading, database management, the shared booking
//! request arguments and output formatting.

use crate::error::CliError;
use clap::Args;
use roombook::database::resolve_database_path;
use roombook::time_range::DISPLAY_FORMAT;
use roombook::{
    Booking, BookingService, BookingStatus, Config, ConfigBuilder, Database, DatabaseConfig,
    OutputFormat, RecurrenceRequest,
};
use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;

/// Column headers for table and CSV output.
const COLUMN_HEADERS: [&str; 8] = [
    "id",
    "room",
    "requester",
    "start",
    "end",
    "recurrence",
    "weekdays",
    "status",
];

/// Global CLI options shared across all commands.
#[derive(Debug, Clone)]
pub struct GlobalOptions {
    /// Suppress non-essential output.
    pub quiet: bool,

    /// Override the data directory location.
    pub data_dir: Option<PathBuf>,

    /// Override the storage lock wait (in seconds).
    pub busy_timeout: Option<u64>,

    /// Disable automatic database initialization.
    pub disable_autoinit: bool,
}

/// The booking request shared by `book`, `update` and `expand`.
#[derive(Args, Debug, Clone)]
pub struct RequestArgs {
    /// Room to book
    #[arg(long, value_name = "ROOM")]
    pub room: String,

    /// Person making the booking
    #[arg(long, value_name = "NAME", env = "ROOMBOOK_REQUESTER")]
    pub requester: String,

    /// First day (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    pub date: String,

    /// Start time of day (HH:MM)
    #[arg(long, value_name = "TIME")]
    pub from: String,

    /// End time of day (HH:MM)
    #[arg(long, value_name = "TIME")]
    pub to: String,

    /// Last day of a recurring range (YYYY-MM-DD, default: --date)
    #[arg(long, value_name = "DATE")]
    pub until: Option<String>,

    /// Recurrence: single, daily or weekly
    #[arg(long, value_name = "TYPE", default_value = "single")]
    pub repeat: String,

    /// Weekday codes for weekly bookings (e.g. mo,we,fr)
    #[arg(long, value_name = "DAYS", value_delimiter = ',')]
    pub weekdays: Vec<String>,

    /// Status for every occurrence (default from configuration)
    #[arg(long, value_name = "STATUS")]
    pub status: Option<BookingStatus>,
}

impl RequestArgs {
    /// Builds the library request. Values are validated on expansion.
    pub fn to_request(&self) -> RecurrenceRequest {
        let until = self.until.clone().unwrap_or_else(|| self.date.clone());
        let mut request = RecurrenceRequest::new(&self.room, &self.requester)
            .with_start(&self.date, &self.from)
            .with_end(until, &self.to)
            .with_recurrence_type(self.repeat.to_uppercase());
        if !self.weekdays.is_empty() {
            request = request.with_weekdays(&self.weekdays);
        }
        if let Some(status) = self.status {
            request = request.with_status(status);
        }
        request
    }
}

/// Load layered configuration.
///
/// Configuration is merged from multiple sources with precedence:
/// 1. Environment variables (highest priority)
/// 2. `<data_dir>/config.yaml`
/// 3. Built-in defaults (lowest priority)
pub fn load_configuration(global: &GlobalOptions) -> Result<Config, CliError> {
    let mut builder = ConfigBuilder::new();
    if let Some(ref data_dir) = global.data_dir {
        builder = builder.with_data_dir(data_dir);
    }

    builder.build().map_err(|e| CliError::Config(e.to_string()))
}

/// Open database with configuration.
///
/// # Errors
///
/// Returns `NoDataDirectory` if the database doesn't exist and auto-init is disabled.
pub fn open_database(global: &GlobalOptions, config: &Config) -> Result<Database, CliError> {
    let db_path = resolve_database_path(global.data_dir.as_deref())?;

    if !db_path.exists() && global.disable_autoinit {
        return Err(CliError::NoDataDirectory);
    }
    log::debug!("using database {}", db_path.display());

    let mut db_config = DatabaseConfig::from_config(db_path, config);
    if let Some(seconds) = global.busy_timeout {
        db_config = db_config.with_busy_timeout(Duration::from_secs(seconds));
    }

    Database::open(db_config).map_err(CliError::from)
}

/// Loads configuration and opens a booking service over the database.
pub fn open_service(global: &GlobalOptions) -> Result<(BookingService<Database>, Config), CliError> {
    let config = load_configuration(global)?;
    let db = open_database(global, &config)?;
    let service = BookingService::from_config(db, &config)?;
    Ok((service, config))
}

fn id_text(booking: &Booking) -> String {
    booking
        .id()
        .map_or_else(|| "-".to_string(), |id| id.value().to_string())
}

fn fields(booking: &Booking) -> [String; 8] {
    [
        id_text(booking),
        booking.room_id().to_string(),
        booking.requester_id().to_string(),
        booking.start_time().format(DISPLAY_FORMAT).to_string(),
        booking.end_time().format(DISPLAY_FORMAT).to_string(),
        booking.recurrence_type().to_string(),
        booking.weekdays().to_string(),
        booking.status().to_string(),
    ]
}

/// Write bookings to stdout in the requested format.
pub fn print_bookings(bookings: &[Booking], format: OutputFormat) -> Result<(), CliError> {
    let stdout = std::io::stdout();
    let mut handle = stdout.lock();

    match format {
        OutputFormat::Table => {
            let header_line = COLUMN_HEADERS
                .iter()
                .map(|s| s.to_uppercase())
                .collect::<Vec<_>>()
                .join("\t");
            writeln!(handle, "{header_line}")?;
            for booking in bookings {
                let mut row = fields(booking);
                if row[6].is_empty() {
                    row[6] = "-".to_string();
                }
                writeln!(handle, "{}", row.join("\t"))?;
            }
        }
        OutputFormat::Json => {
            let json_data: Vec<serde_json::Value> = bookings
                .iter()
                .map(|b| {
                    serde_json::json!({
                        "id": b.id().map(|id| id.value()),
                        "room_id": b.room_id(),
                        "requester_id": b.requester_id(),
                        "start_time": b.start_time().format(DISPLAY_FORMAT).to_string(),
                        "end_time": b.end_time().format(DISPLAY_FORMAT).to_string(),
                        "recurrence_type": b.recurrence_type().as_str(),
                        "weekdays": b.weekdays().codes(),
                        "status": b.status().as_str(),
                    })
                })
                .collect();
            serde_json::to_writer_pretty(&mut handle, &json_data)?;
            writeln!(handle)?;
        }
        OutputFormat::Csv => {
            let mut writer = csv::Writer::from_writer(handle);
            writer.write_record(COLUMN_HEADERS)?;
            for booking in bookings {
                writer.write_record(fields(booking))?;
            }
            writer.flush()?;
        }
    }

    Ok(())
}
