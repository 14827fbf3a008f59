//! Default values for embuild configuration.
//!
//! This module provides centralized default values used across commands,
//! ensuring consistency and avoiding duplication.

use std::path::PathBuf;

/// File name of the project descriptor at a project or library root.
pub const DESCRIPTOR_FILENAME: &str = "embuild.yaml";

/// Shared libraries directory, relative to the project root, used when the
/// descriptor has no `libraries_destination` override.
pub const DEFAULT_LIBRARIES_DESTINATION: &str = "libraries";

/// Name of the generated aggregation file inside the libraries directory.
pub const MANIFEST_FILENAME: &str = "CMakeLists.txt";

/// First line of the generated aggregation file.
pub const MANIFEST_HEADER: &str = "# This file is auto-generated by embuild. Do not edit!";

/// Git repository holding the library catalog.
pub const CATALOG_REPOSITORY: &str = "git@github.com:g2labs-grzegorz-grzeda/embuild-repository.git";

/// Record file inside the catalog repository.
pub const CATALOG_FILENAME: &str = "repository.json";

/// Host prepended to `owner/repo` shorthand references.
pub const SHORTHAND_HOST: &str = "https://github.com/";

/// Tools the generated projects need on `PATH`.
pub const REQUIRED_TOOLS: [&str; 3] = ["git", "cmake", "ninja"];

/// Returns the default local checkout of the library catalog.
///
/// Resolves to `~/.embuild/repository`. Falls back to `.embuild/repository`
/// in the current directory if the home directory cannot be determined.
///
/// This can be overridden by the `--catalog-dir` CLI flag or the
/// `EMBUILD_CATALOG_DIR` environment variable.
pub fn default_catalog_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".embuild")
        .join("repository")
}
