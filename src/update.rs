//! # Update Orchestration
//!
//! Runs a complete update of a project's libraries:
//!
//! 1.  Load the root `embuild.yaml` and check it declares libraries and a
//!     libraries directory inside the project.
//! 2.  Run the root project's own preconditions in the project root.
//! 3.  In clean mode, delete the shared libraries directory.
//! 4.  Resolve and fetch the dependency closure.
//! 5.  Write the generated `CMakeLists.txt`.
//! 6.  In incremental mode, delete library directories nothing references
//!     any more.
//!
//! Any error up to and including step 5 aborts the update. Directories
//! fetched before the failure are left in place.

use std::fs;
use std::path::{Path, PathBuf};

use log::info;

use crate::catalog::Catalog;
use crate::closure::ClosureEngine;
use crate::descriptor::{descriptor_path, ProjectDescriptor};
use crate::error::{Error, Result};
use crate::manifest::write_manifest;
use crate::process::{run_preconditions, ProcessRunner};
use crate::prune::{prune, PruneReport};
use crate::repository::{FetchAction, SourceFetcher};
use crate::resolver::ResolvedLibrary;

/// Options for a single update run.
#[derive(Debug, Clone, Copy, Default)]
pub struct UpdateOptions {
    /// Wipe the libraries directory and fetch everything fresh.
    pub clean: bool,
}

/// What an update did.
#[derive(Debug)]
pub struct UpdateReport {
    /// Resolved libraries in visit order.
    pub libraries: Vec<ResolvedLibrary>,
    /// Fetch actions in the order they happened.
    pub fetches: Vec<(String, FetchAction)>,
    /// Path of the generated aggregation file.
    pub manifest: PathBuf,
    /// Result of the prune pass.
    pub pruned: PruneReport,
}

/// Loads the root descriptor and checks it can be updated.
///
/// Returns the descriptor and its libraries directory. Nothing outside
/// the project is touched, so callers run this before syncing the catalog.
pub fn check_project(project_root: &Path) -> Result<(ProjectDescriptor, PathBuf)> {
    let descriptor = ProjectDescriptor::load_required(project_root)?;
    if descriptor.libraries.is_empty() {
        return Err(Error::NoLibrariesDeclared {
            descriptor: descriptor_path(project_root),
        });
    }
    let destination_root = descriptor.libraries_root(project_root)?;
    Ok((descriptor, destination_root))
}

/// Updates the libraries of the project rooted at `project_root`.
pub fn update(
    project_root: &Path,
    options: UpdateOptions,
    catalog: &Catalog,
    fetcher: &SourceFetcher,
    runner: &dyn ProcessRunner,
) -> Result<UpdateReport> {
    let (descriptor, destination_root) = check_project(project_root)?;

    run_preconditions(
        runner,
        &descriptor.name,
        &descriptor.preconditions,
        project_root,
    )?;

    if options.clean && destination_root.exists() {
        info!("Removing {}", destination_root.display());
        fs::remove_dir_all(&destination_root)?;
    }

    let engine = ClosureEngine::new(catalog, fetcher, runner);
    let closure = engine.resolve_closure(&descriptor.libraries, &destination_root)?;

    let manifest = write_manifest(&destination_root, closure.visit_order())?;
    let pruned = prune(&destination_root, &closure.destinations(), options.clean);

    Ok(UpdateReport {
        libraries: closure.libraries().cloned().collect(),
        fetches: closure.fetches().to_vec(),
        manifest,
        pruned,
    })
}
