//! Update command implementation.
//!
//! This module implements the `update` command, which replaces a booking
//! with the occurrences of a new request. The booking being replaced never
//! conflicts with itself.

use crate::error::CliError;
use crate::utils::{open_service, print_bookings, GlobalOptions, RequestArgs};
use clap::Args;
use roombook::{BookingId, BookingOutcome, OutputFormat};

/// Replace an existing booking.
#[derive(Args)]
pub struct UpdateCommand {
    /// Booking id (e.g. 42 or #42)
    #[arg(value_name = "ID")]
    pub id: BookingId,

    #[command(flatten)]
    pub request: RequestArgs,

    /// Output format (table, json, csv)
    #[arg(long, value_name = "FORMAT")]
    pub format: Option<OutputFormat>,
}

impl UpdateCommand {
    /// Execute the update command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let (mut service, config) = open_service(global)?;

        match service.update(self.id, &self.request.to_request())? {
            BookingOutcome::Committed(bookings) => {
                if !global.quiet {
                    eprintln!("Updated booking {}", self.id);
                }
                print_bookings(&bookings, self.format.unwrap_or(config.output_format()))
            }
            BookingOutcome::NoOccurrences => Err(CliError::SemanticFailure(format!(
                "Request expands to no occurrences; booking {} left unchanged",
                self.id
            ))),
        }
    }
}
