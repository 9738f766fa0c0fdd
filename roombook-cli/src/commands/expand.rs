//! Expand command implementation.
//!
//! Prints the occurrences a request would book. Storage is never opened, so
//! nothing is checked for conflicts.

use crate::error::CliError;
use crate::utils::{load_configuration, print_bookings, GlobalOptions, RequestArgs};
use clap::Args;
use roombook::{OutputFormat, RecurrenceExpander};

/// Preview the occurrences of a request.
#[derive(Args)]
pub struct ExpandCommand {
    #[command(flatten)]
    pub request: RequestArgs,

    /// Output format (table, json, csv)
    #[arg(long, value_name = "FORMAT")]
    pub format: Option<OutputFormat>,
}

impl ExpandCommand {
    /// Execute the expand command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        let expander = RecurrenceExpander::from_config(&config)?;
        let occurrences = expander.expand(&self.request.to_request())?;

        if occurrences.is_empty() && !global.quiet {
            eprintln!("Request expands to no occurrences");
        }
        print_bookings(&occurrences, self.format.unwrap_or(config.output_format()))
    }
}
