//! Book command implementation.
//!
//! This module implements the `book` command, which expands a request and
//! books every occurrence, or none of them if any occurrence conflicts.

use crate::error::CliError;
use crate::utils::{open_service, print_bookings, GlobalOptions, RequestArgs};
use clap::Args;
use roombook::{BookingOutcome, OutputFormat};

/// Book a room.
#[derive(Args)]
pub struct BookCommand {
    #[command(flatten)]
    pub request: RequestArgs,

    /// Output format (table, json, csv)
    #[arg(long, value_name = "FORMAT")]
    pub format: Option<OutputFormat>,
}

impl BookCommand {
    /// Execute the book command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let (mut service, config) = open_service(global)?;

        match service.create(&self.request.to_request())? {
            BookingOutcome::Committed(bookings) => {
                if !global.quiet {
                    eprintln!(
                        "Booked {} occurrence(s) of room {}",
                        bookings.len(),
                        self.request.room
                    );
                }
                print_bookings(&bookings, self.format.unwrap_or(config.output_format()))
            }
            BookingOutcome::NoOccurrences => Err(CliError::SemanticFailure(
                "Request expands to no occurrences; nothing booked".to_string(),
            )),
        }
    }
}
