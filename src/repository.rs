//! # Source Fetching
//!
//! This module provides the `SourceFetcher`, the single entry point the rest
//! of the crate uses to materialize a source tree at a destination path.
//!
//! ## Design
//!
//! The `SourceFetcher` is built around the **`GitOperations`** trait, which
//! defines the two primitives it needs: a shallow clone into a fresh
//! directory and a refresh of an existing checkout. In the application
//! `SystemGit` wraps the `git` command; in tests a mock records calls and
//! fabricates checkouts on disk, which lets the closure engine be exercised
//! without network access.
//!
//! The fetch policy itself is deliberately simple: clone if the destination
//! is absent, refresh otherwise.

use std::fmt;
use std::path::Path;

use log::info;

use crate::error::Result;

/// Trait for git operations - allows mocking in tests
pub trait GitOperations {
    /// Clones `url` into `target_dir`, which does not exist yet.
    fn clone_shallow(&self, url: &str, target_dir: &Path) -> Result<()>;

    /// Refreshes the existing checkout at `target_dir`.
    fn pull(&self, target_dir: &Path) -> Result<()>;
}

/// The default implementation of `GitOperations`, which uses the system's
/// `git` command.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemGit {
    verbose: bool,
}

impl SystemGit {
    /// Creates the default git backend. `verbose` surfaces git's own output.
    pub fn new(verbose: bool) -> Self {
        Self { verbose }
    }
}

impl GitOperations for SystemGit {
    fn clone_shallow(&self, url: &str, target_dir: &Path) -> Result<()> {
        crate::git::clone_shallow(url, target_dir, self.verbose)
    }

    fn pull(&self, target_dir: &Path) -> Result<()> {
        crate::git::pull(target_dir, self.verbose)
    }
}

/// What `SourceFetcher::fetch` did to a destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchAction {
    /// The destination was absent and has been cloned.
    Cloned,
    /// The destination existed and has been refreshed.
    Refreshed,
}

impl fmt::Display for FetchAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchAction::Cloned => write!(f, "cloned"),
            FetchAction::Refreshed => write!(f, "refreshed"),
        }
    }
}

/// Materializes source trees through a `GitOperations` backend.
pub struct SourceFetcher {
    git_ops: Box<dyn GitOperations>,
}

impl SourceFetcher {
    /// Creates a fetcher backed by the system `git` command.
    pub fn new(verbose: bool) -> Self {
        Self {
            git_ops: Box::new(SystemGit::new(verbose)),
        }
    }

    /// Creates a fetcher with a custom `GitOperations` implementation.
    ///
    /// This is primarily used for testing to inject mock operations.
    pub fn with_operations(git_ops: Box<dyn GitOperations>) -> Self {
        Self { git_ops }
    }

    /// Clones `locator` into `destination` when it is absent, refreshes it
    /// otherwise.
    pub fn fetch(&self, locator: &str, destination: &Path) -> Result<FetchAction> {
        if destination.exists() {
            info!("Updating {}", destination.display());
            self.git_ops.pull(destination)?;
            Ok(FetchAction::Refreshed)
        } else {
            info!("Cloning {} into {}", locator, destination.display());
            self.git_ops.clone_shallow(locator, destination)?;
            Ok(FetchAction::Cloned)
        }
    }
}
