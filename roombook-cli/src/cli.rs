//! CLI structure and command definitions.
//!
//! This module defines the main CLI structure using clap's derive macros,
//! including global options and subcommands.

use crate::commands::{
    BookCommand, CancelCommand, CompletionsCommand, CountCommand, ExpandCommand, ListCommand,
    ShowCommand, UpdateCommand,
};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Command-line tool for conflict-safe room reservations.
#[derive(Parser)]
#[command(name = "roombook")]
#[command(version, about = "Book rooms without double-booking", long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(long, global = true)]
    pub verbose: bool,

    /// Suppress non-essential output
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Override the data directory location
    #[arg(long, value_name = "PATH", global = true, env = "ROOMBOOK_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Override the storage lock wait (in seconds)
    #[arg(long, value_name = "SECONDS", global = true)]
    pub busy_timeout: Option<u64>,

    /// Fail instead of creating a missing database
    #[arg(long, global = true, env = "ROOMBOOK_DISABLE_AUTOINIT")]
    pub disable_autoinit: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Subcommand)]
pub enum Command {
    /// Book a room, once or on a recurring schedule
    Book(BookCommand),

    /// Replace an existing booking
    Update(UpdateCommand),

    /// Remove a booking
    Cancel(CancelCommand),

    /// Show one booking
    Show(ShowCommand),

    /// List bookings
    List(ListCommand),

    /// Count bookings
    Count(CountCommand),

    /// Print the occurrences a request expands to, without booking
    Expand(ExpandCommand),

    /// Generate shell completion scripts
    Completions(CompletionsCommand),
}
