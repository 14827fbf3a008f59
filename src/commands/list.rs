//! # List Command Implementation
//!
//! This module implements the `list` subcommand, which prints the name of
//! every library in the catalog, one per line and sorted, so the output can
//! be piped into other tools.

use anyhow::Result;
use clap::Args;

use embuild::settings::Settings;

/// List the libraries available in the catalog
#[derive(Args, Debug)]
pub struct ListArgs {
    /// Also print the source locator of each library.
    #[arg(short, long)]
    pub long: bool,
}

/// Execute the `list` command.
pub fn execute(args: ListArgs, settings: &Settings) -> Result<()> {
    let catalog = settings.open_catalog()?;

    for name in catalog.names() {
        if args.long {
            println!("{}\t{}", name, catalog.get(name).unwrap_or_default());
        } else {
            println!("{}", name);
        }
    }

    Ok(())
}
