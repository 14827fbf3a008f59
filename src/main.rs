//! # embuild CLI
//!
//! This is the binary entry point for the `embuild` command-line tool.
//!
//! Its primary responsibilities are:
//! - Parsing command-line arguments using `clap`.
//! - Executing the appropriate command based on the parsed arguments.
//! - Turning any error into a one-line message on stderr (the full error
//!   chain too with `--verbose`) and exit code 1.
//!
//! The core application logic is defined in the `lib.rs` library crate, ensuring
//! that the binary is a thin wrapper around the reusable library functionality.

mod cli;
mod commands;

use clap::Parser;
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = cli::Cli::parse();
    let verbose = cli.verbose();

    match cli.execute() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            if verbose {
                eprintln!("{:?}", e);
            }
            ExitCode::FAILURE
        }
    }
}
