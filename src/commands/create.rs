//! # Create Command Implementation
//!
//! This module implements the `create` subcommand, which scaffolds a new
//! project directory: `embuild.yaml`, a top-level `CMakeLists.txt` wired to
//! the generated libraries file, a `main.c` stub and a `.gitignore`.

use anyhow::Result;
use clap::Args;
use console::style;
use std::path::PathBuf;

use embuild::descriptor::ProjectDescriptor;
use embuild::scaffold::{create_project, default_project_name};

/// Create a new project in a directory
#[derive(Args, Debug)]
pub struct CreateArgs {
    /// Directory to create the project in.
    #[arg(value_name = "DESTINATION")]
    pub destination: PathBuf,

    /// Project name (defaults to the destination directory name).
    #[arg(long)]
    pub name: Option<String>,

    /// Library references to declare right away.
    #[arg(short, long = "library", value_name = "LIBRARY")]
    pub libraries: Vec<String>,
}

/// Execute the `create` command.
pub fn execute(args: CreateArgs) -> Result<()> {
    let name = args
        .name
        .unwrap_or_else(|| default_project_name(&args.destination));

    let mut descriptor = ProjectDescriptor::new(name);
    for library in &args.libraries {
        descriptor.add_library(library)?;
    }

    let written = create_project(&args.destination, &descriptor)?;
    for path in &written {
        log::debug!("Wrote {}", path.display());
    }

    println!(
        "{} Created project '{}' in {}",
        style("✓").green(),
        descriptor.name,
        args.destination.display()
    );
    println!("Run `embuild update` inside it to fetch libraries");
    Ok(())
}
