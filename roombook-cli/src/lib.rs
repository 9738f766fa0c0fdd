//! Library exports for roombook-cli.
//!
//! This module exports the CLI structure for use by tests and
//! documentation tooling.

pub mod cli;
pub mod commands;
pub mod error;
pub mod utils;

// Re-export CLI for completions and tests
pub use cli::Cli;
