//! # Run Command Implementation
//!
//! This module implements the `run` subcommand, which executes a script
//! declared under `scripts` in `embuild.yaml`. Any arguments after the
//! script name are appended to the script's command line. As with every
//! other subprocess, the script's output is shown only with `--verbose`.

use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

use embuild::descriptor::ProjectDescriptor;
use embuild::scripts::run_script;
use embuild::settings::Settings;

use super::project_root;

/// Run a script declared in embuild.yaml
#[derive(Args, Debug)]
pub struct RunArgs {
    /// Name of the script.
    #[arg(value_name = "SCRIPT")]
    pub script: String,

    /// Extra arguments passed to the script.
    #[arg(value_name = "ARGS", trailing_var_arg = true, allow_hyphen_values = true)]
    pub args: Vec<String>,

    /// Project directory (defaults to the current directory).
    #[arg(long, value_name = "DIR")]
    pub project: Option<PathBuf>,
}

/// Execute the `run` command.
pub fn execute(args: RunArgs, settings: &Settings) -> Result<()> {
    let root = project_root(args.project)?;
    let descriptor = ProjectDescriptor::load_required(&root)?;

    run_script(
        &root,
        &descriptor,
        &args.script,
        &args.args,
        &settings.runner(),
    )?;
    Ok(())
}
