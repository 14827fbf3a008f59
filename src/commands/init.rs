//! # Init Command Implementation
//!
//! This module implements the `init` subcommand, which creates an
//! `embuild.yaml` in an existing directory.
//!
//! By default the user is asked for the project name, description, author
//! and license. With `--yes` the defaults are taken without prompting.

use anyhow::Result;
use clap::Args;
use console::style;
use dialoguer::{theme::ColorfulTheme, Input};
use std::path::PathBuf;

use embuild::descriptor::ProjectDescriptor;
use embuild::scaffold::{default_project_name, init_project};

use super::project_root;

/// Create an embuild.yaml in an existing directory
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Project directory (defaults to the current directory).
    #[arg(long, value_name = "DIR")]
    pub project: Option<PathBuf>,

    /// Non-interactive mode: accept defaults without prompting
    #[arg(short, long)]
    pub yes: bool,
}

/// Execute the `init` command.
pub fn execute(args: InitArgs) -> Result<()> {
    let root = project_root(args.project)?;
    let mut descriptor = ProjectDescriptor::new(default_project_name(&root));

    if !args.yes {
        prompt_metadata(&mut descriptor)?;
    }

    let path = init_project(&root, &descriptor)?;
    println!("{} Created {}", style("✓").green(), path.display());
    println!("Add libraries with `embuild add <library>`");
    Ok(())
}

fn prompt_metadata(descriptor: &mut ProjectDescriptor) -> Result<()> {
    let theme = ColorfulTheme::default();
    descriptor.name = Input::with_theme(&theme)
        .with_prompt("Project name")
        .default(descriptor.name.clone())
        .interact_text()?;
    descriptor.description = Input::with_theme(&theme)
        .with_prompt("Description")
        .default(descriptor.description.clone())
        .interact_text()?;
    descriptor.author = Input::with_theme(&theme)
        .with_prompt("Author")
        .default(descriptor.author.clone())
        .interact_text()?;
    descriptor.license = Input::with_theme(&theme)
        .with_prompt("License")
        .default(descriptor.license.clone())
        .interact_text()?;
    Ok(())
}
