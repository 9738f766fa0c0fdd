//! Count command implementation.

use crate::commands::FilterArgs;
use crate::error::CliError;
use crate::utils::{open_service, GlobalOptions};
use clap::Args;

/// Count bookings.
#[derive(Args)]
pub struct CountCommand {
    #[command(flatten)]
    pub filter: FilterArgs,
}

impl CountCommand {
    /// Execute the count command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let criteria = self.filter.to_criteria()?;
        let (service, _) = open_service(global)?;
        println!("{}", service.count(&criteria)?);
        Ok(())
    }
}
