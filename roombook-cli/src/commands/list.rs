//! List command implementation.
//!
//! This module implements the `list` command, which displays bookings in
//! various formats (table, JSON, CSV), and the filters it shares with
//! `count`.

use crate::error::CliError;
use crate::utils::{open_service, print_bookings, GlobalOptions};
use chrono::{NaiveDate, NaiveTime};
use clap::Args;
use roombook::{BookingCriteria, BookingStatus, OutputFormat, TimeRange};

/// Booking filters shared by `list` and `count`.
#[derive(Args, Debug, Clone, Default)]
pub struct FilterArgs {
    /// Filter by room
    #[arg(long, value_name = "ROOM")]
    pub room: Option<String>,

    /// Filter by requester
    #[arg(long, value_name = "NAME")]
    pub requester: Option<String>,

    /// Filter by status
    #[arg(long, value_name = "STATUS")]
    pub status: Option<BookingStatus>,

    /// Keep bookings overlapping the window starting at this date (YYYY-MM-DD)
    #[arg(long, value_name = "DATE", requires = "to")]
    pub from: Option<NaiveDate>,

    /// End of the window, exclusive (YYYY-MM-DD)
    #[arg(long, value_name = "DATE", requires = "from")]
    pub to: Option<NaiveDate>,
}

impl FilterArgs {
    /// Converts the flags into library criteria.
    pub fn to_criteria(&self) -> Result<BookingCriteria, CliError> {
        let mut criteria = BookingCriteria::new();
        if let Some(ref room) = self.room {
            criteria = criteria.room(room);
        }
        if let Some(ref requester) = self.requester {
            criteria = criteria.requester(requester);
        }
        if let Some(status) = self.status {
            criteria = criteria.status(status);
        }
        if let (Some(from), Some(to)) = (self.from, self.to) {
            let window = TimeRange::new(from.and_time(NaiveTime::MIN), to.and_time(NaiveTime::MIN))
                .map_err(|e| CliError::InvalidArguments(format!("--from/--to: {e}")))?;
            criteria = criteria.window(window);
        }
        Ok(criteria)
    }
}

/// List bookings.
#[derive(Args)]
pub struct ListCommand {
    #[command(flatten)]
    pub filter: FilterArgs,

    /// Output format (table, json, csv)
    #[arg(long, value_name = "FORMAT")]
    pub format: Option<OutputFormat>,
}

impl ListCommand {
    /// Execute the list command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let criteria = self.filter.to_criteria()?;
        let (service, config) = open_service(global)?;
        let bookings = service.list(&criteria)?;

        print_bookings(&bookings, self.format.unwrap_or(config.output_format()))
    }
}
