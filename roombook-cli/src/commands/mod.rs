//! CLI command implementations.
//!
//! This module contains the implementations of all CLI commands:
//! - `book`: Book a room, once or on a recurring schedule
//! - `update`: Replace an existing booking
//! - `cancel`: Remove a booking
//! - `show`: Show one booking
//! - `list`: List bookings matching filters
//! - `count`: Count bookings matching filters
//! - `expand`: Preview the occurrences of a request
//! - `completions`: Generate shell completion scripts

pub mod book;
pub mod cancel;
pub mod completions;
pub mod count;
pub mod expand;
pub mod list;
pub mod show;
pub mod update;

pub use book::BookCommand;
pub use cancel::CancelCommand;
pub use completions::CompletionsCommand;
pub use count::CountCommand;
pub use expand::ExpandCommand;
pub use list::{FilterArgs, ListCommand};
pub use show::ShowCommand;
pub use update::UpdateCommand;
