//! # Update Command Implementation
//!
//! This module implements the `update` subcommand, which fetches every
//! library the project needs (directly or through other libraries),
//! regenerates the libraries `CMakeLists.txt` and removes library
//! directories that are no longer referenced.
//!
//! ## Modes
//!
//! - **Incremental** (default): existing checkouts are refreshed with
//!   `git pull`; orphaned directories are deleted afterwards.
//! - **Clean** (`--clean`): the libraries directory is deleted first and
//!   everything is cloned again.

use anyhow::Result;
use clap::Args;
use console::style;
use std::path::{Path, PathBuf};

use embuild::catalog::Catalog;
use embuild::settings::Settings;
use embuild::update::{check_project, update, UpdateOptions, UpdateReport};

use super::project_root;

/// Fetch all libraries and regenerate the libraries CMakeLists.txt
#[derive(Args, Debug)]
pub struct UpdateArgs {
    /// Delete the libraries directory and fetch everything from scratch.
    #[arg(long)]
    pub clean: bool,

    /// Project directory (defaults to the current directory).
    #[arg(long, value_name = "DIR")]
    pub project: Option<PathBuf>,
}

/// Execute the `update` command.
pub fn execute(args: UpdateArgs, settings: &Settings) -> Result<()> {
    let root = project_root(args.project)?;
    check_project(&root)?;
    let catalog = settings.open_catalog()?;
    run_update(&root, UpdateOptions { clean: args.clean }, &catalog, settings)
}

/// Runs an update of the project at `root` against an already opened
/// catalog and prints a summary.
///
/// Shared with `add`, which triggers an update after changing the
/// descriptor.
pub fn run_update(
    root: &Path,
    options: UpdateOptions,
    catalog: &Catalog,
    settings: &Settings,
) -> Result<()> {
    let fetcher = settings.fetcher();
    let runner = settings.runner();

    let report = update(root, options, catalog, &fetcher, &runner)?;
    print_summary(&report);
    Ok(())
}

fn print_summary(report: &UpdateReport) {
    for library in &report.libraries {
        println!("  {} {}", style("•").cyan(), library.name);
    }
    for path in &report.pruned.removed {
        println!("  {} removed {}", style("-").yellow(), path.display());
    }
    for (path, reason) in &report.pruned.failures {
        println!(
            "  {} could not remove {}: {}",
            style("!").red(),
            path.display(),
            reason
        );
    }
    println!(
        "{} {} libraries ready, wrote {}",
        style("✓").green(),
        report.libraries.len(),
        report.manifest.display()
    );
}
