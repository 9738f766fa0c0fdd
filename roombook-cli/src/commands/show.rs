//! Show command implementation.

use crate::error::CliError;
use crate::utils::{open_service, print_bookings, GlobalOptions};
use clap::Args;
use roombook::{BookingId, Error, OutputFormat};

/// Show one booking.
#[derive(Args)]
pub struct ShowCommand {
    /// Booking id (e.g. 42 or #42)
    #[arg(value_name = "ID")]
    pub id: BookingId,

    /// Output format (table, json, csv)
    #[arg(long, value_name = "FORMAT")]
    pub format: Option<OutputFormat>,
}

impl ShowCommand {
    /// Execute the show command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let (service, config) = open_service(global)?;
        let booking = service
            .get(self.id)?
            .ok_or(Error::NotFound { id: self.id })?;

        print_bookings(&[booking], self.format.unwrap_or(config.output_format()))
    }
}
