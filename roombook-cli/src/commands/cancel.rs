//! Cancel command implementation.

use crate::error::CliError;
use crate::utils::{open_service, GlobalOptions};
use clap::Args;
use roombook::BookingId;

/// Remove a booking.
#[derive(Args)]
pub struct CancelCommand {
    /// Booking id (e.g. 42 or #42)
    #[arg(value_name = "ID")]
    pub id: BookingId,
}

impl CancelCommand {
    /// Execute the cancel command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let (mut service, _) = open_service(global)?;
        let removed = service.delete(self.id)?;

        if !global.quiet {
            eprintln!(
                "Cancelled booking {} in room {} at {}",
                self.id,
                removed.room_id(),
                removed.range()
            );
        }
        Ok(())
    }
}
