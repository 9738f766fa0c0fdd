//! Build script for roombook-cli.
//!
//! This script generates the man page at build time using clap_mangen.
//! The generated man page is placed in OUT_DIR for inclusion in release builds.
//!
//! Note: We build a minimal command structure here rather than importing from
//! the main crate, since build scripts cannot depend on the crate being built.

use clap::{Arg, Command};
use clap_mangen::Man;
use std::fs;
use std::path::PathBuf;

/// Build the CLI command structure for man page generation.
///
/// Keep this structure synchronized with src/cli.rs.
fn build_cli() -> Command {
    Command::new("roombook")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Book rooms without double-booking")
        .long_about(
            "Command-line tool for room reservations. Recurring requests are expanded \
             into occurrences and booked all-or-nothing: if any occurrence overlaps an \
             existing booking in the same room, nothing is booked.",
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .help("Enable verbose output")
                .global(true)
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("quiet")
                .long("quiet")
                .help("Suppress non-essential output")
                .global(true)
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("data-dir")
                .long("data-dir")
                .help("Override the data directory location")
                .value_name("PATH")
                .global(true)
                .env("ROOMBOOK_DATA_DIR"),
        )
        .arg(
            Arg::new("busy-timeout")
                .long("busy-timeout")
                .help("Override the storage lock wait (in seconds)")
                .value_name("SECONDS")
                .global(true),
        )
        .arg(
            Arg::new("disable-autoinit")
                .long("disable-autoinit")
                .help("Fail instead of creating a missing database")
                .global(true)
                .action(clap::ArgAction::SetTrue)
                .env("ROOMBOOK_DISABLE_AUTOINIT"),
        )
        .subcommands(vec![
            Command::new("book")
                .about("Book a room, once or on a recurring schedule")
                .long_about("Expand a request and book every occurrence, or none if any conflicts"),
            Command::new("update")
                .about("Replace an existing booking")
                .long_about("Replace a booking with the occurrences of a new request"),
            Command::new("cancel")
                .about("Remove a booking")
                .long_about("Remove a booking by id"),
            Command::new("show")
                .about("Show one booking")
                .long_about("Display a single booking by id"),
            Command::new("list")
                .about("List bookings")
                .long_about("List bookings filtered by room, requester, status or date window"),
            Command::new("count")
                .about("Count bookings")
                .long_about("Count bookings using the same filters as list"),
            Command::new("expand")
                .about("Print the occurrences a request expands to, without booking")
                .long_about("Preview a request's occurrences without touching storage"),
            Command::new("completions")
                .about("Generate shell completion scripts")
                .long_about("Generate shell completion scripts for bash, zsh, fish, or PowerShell"),
        ])
}

fn main() {
    let out_dir = PathBuf::from(std::env::var("OUT_DIR").unwrap());
    let man_dir = out_dir.join("man");
    fs::create_dir_all(&man_dir).unwrap();

    let man = Man::new(build_cli());
    let mut buffer = Vec::new();
    man.render(&mut buffer).unwrap();

    fs::write(man_dir.join("roombook.1"), buffer).unwrap();

    println!("cargo:rerun-if-changed=src/cli.rs");
    println!("cargo:rerun-if-changed=src/commands/");
}
