//! # Check Command Implementation
//!
//! This module implements the `check` subcommand, which verifies that the
//! tools an embuild project depends on (`git`, `cmake`, `ninja`) are
//! installed and runnable.
//!
//! This command is a safe, read-only operation.

use anyhow::Result;
use clap::Args;
use console::style;
use std::env;

use embuild::defaults::REQUIRED_TOOLS;
use embuild::error::Error;
use embuild::process::check_tool;
use embuild::settings::Settings;

/// Verify that required tools are installed
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Additional tools to check besides git, cmake and ninja.
    #[arg(value_name = "TOOL")]
    pub tools: Vec<String>,
}

/// Execute the `check` command.
///
/// Every tool is checked and reported; the command fails on the first
/// missing one once all have been tried.
pub fn execute(args: CheckArgs, settings: &Settings) -> Result<()> {
    let runner = settings.runner();
    let cwd = env::current_dir()?;

    let tools = REQUIRED_TOOLS
        .iter()
        .map(|t| t.to_string())
        .chain(args.tools);

    let mut first_missing: Option<Error> = None;
    for tool in tools {
        match check_tool(&runner, &tool, &cwd) {
            Ok(()) => println!("  {} {}", style("✓").green(), tool),
            Err(e) => {
                println!("  {} {}", style("✗").red(), tool);
                first_missing.get_or_insert(e);
            }
        }
    }

    match first_missing {
        Some(e) => Err(e.into()),
        None => Ok(()),
    }
}
