//! # CLI Command Implementations
//!
//! This module contains the implementation for each subcommand of the `embuild`
//! command-line tool. Each subcommand is defined in its own file to keep the
//! logic separated and maintainable.
//!
//! ## Structure
//!
//! Each command module typically contains:
//! - An `Args` struct that defines the command-specific arguments and options,
//!   derived using `clap`.
//! - An `execute` function that takes the parsed `Args` and performs the
//!   command's logic, calling into the `embuild` library.

use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};

pub mod add;
pub mod check;
pub mod completions;
pub mod create;
pub mod init;
pub mod list;
pub mod run;
pub mod update;

/// Resolves an optional `--project` argument to a project root.
pub fn project_root(project: Option<PathBuf>) -> Result<PathBuf> {
    match project {
        Some(dir) => Ok(dir),
        None => env::current_dir().context("Failed to determine the current directory"),
    }
}
