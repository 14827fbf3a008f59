//! # Add Command Implementation
//!
//! This module implements the `add` subcommand, which appends library
//! references to the project's `embuild.yaml` and then runs an update.
//!
//! ## Functionality
//!
//! - **Several references at once**: each one is tried independently. A
//!   reference that is already declared, or a bare name the catalog does
//!   not know, is reported and skipped; the others are still added.
//! - **One update**: after all references are processed the descriptor is
//!   saved once and a single incremental update runs, provided at least one
//!   reference was added.

use anyhow::Result;
use clap::Args;
use console::style;
use log::warn;
use std::path::PathBuf;

use embuild::catalog::Catalog;
use embuild::descriptor::ProjectDescriptor;
use embuild::error::Error;
use embuild::resolver::LibraryReference;
use embuild::settings::Settings;
use embuild::update::UpdateOptions;

use super::project_root;
use super::update::run_update;

/// Add libraries to the project and update
#[derive(Args, Debug)]
pub struct AddArgs {
    /// Library references: catalog names, owner/repo, or git URLs.
    #[arg(value_name = "LIBRARY", required = true)]
    pub libraries: Vec<String>,

    /// Project directory (defaults to the current directory).
    #[arg(long, value_name = "DIR")]
    pub project: Option<PathBuf>,
}

/// Execute the `add` command.
pub fn execute(args: AddArgs, settings: &Settings) -> Result<()> {
    let root = project_root(args.project)?;
    let mut descriptor = ProjectDescriptor::load_required(&root)?;
    let catalog = settings.open_catalog()?;

    let added = add_references(&mut descriptor, &args.libraries, &catalog);
    if added.is_empty() {
        println!("No libraries added");
        return Ok(());
    }

    descriptor.store_in_dir(&root)?;
    for reference in &added {
        println!("{} Added {}", style("+").green(), reference);
    }

    run_update(&root, UpdateOptions::default(), &catalog, settings)
}

/// Adds each reference that is valid and new; returns the ones added.
fn add_references(
    descriptor: &mut ProjectDescriptor,
    references: &[String],
    catalog: &Catalog,
) -> Vec<String> {
    let mut added = Vec::new();
    for reference in references {
        match try_add(descriptor, reference, catalog) {
            Ok(()) => added.push(reference.trim().to_string()),
            Err(e) => warn!("Skipping {}: {}", reference, e),
        }
    }
    added
}

fn try_add(
    descriptor: &mut ProjectDescriptor,
    reference: &str,
    catalog: &Catalog,
) -> embuild::error::Result<()> {
    if let LibraryReference::Catalog(name) = LibraryReference::parse(reference)? {
        if !catalog.contains(&name) {
            return Err(Error::UnknownLibrary { name });
        }
    }
    descriptor.add_library(reference)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_references_skips_failures_and_keeps_going() {
        let catalog = Catalog::from_entries([("gpio", "https://x/gpio"), ("uart", "https://x/uart")]);
        let mut descriptor = ProjectDescriptor::new("app");
        descriptor.libraries.push("gpio".to_string());

        let added = add_references(
            &mut descriptor,
            &[
                "gpio".to_string(),
                "nowhere".to_string(),
                "uart".to_string(),
                "acme/log".to_string(),
                "".to_string(),
            ],
            &catalog,
        );

        assert_eq!(added, vec!["uart", "acme/log"]);
        assert_eq!(descriptor.libraries, vec!["gpio", "uart", "acme/log"]);
    }
}
