//! Removal of library directories that are no longer referenced.
//!
//! After an incremental update, every immediate subdirectory of the shared
//! libraries directory that is not the destination of a resolved library
//! is an orphan and gets deleted. Deletion is best effort: the contents can
//! always be fetched again, so a directory that cannot be removed is logged
//! and reported but does not fail the update.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use log::{info, warn};

/// Outcome of a prune pass.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct PruneReport {
    /// Directories that were deleted.
    pub removed: Vec<PathBuf>,
    /// Directories that could not be deleted, with the reason.
    pub failures: Vec<(PathBuf, String)>,
}

impl PruneReport {
    /// Whether nothing was removed and nothing failed.
    pub fn is_empty(&self) -> bool {
        self.removed.is_empty() && self.failures.is_empty()
    }
}

/// Deletes orphaned subdirectories of `destination_root`.
///
/// In clean mode the caller has already wiped the directory before
/// resolution, so there is nothing to do. Files (the generated manifest
/// among them) are never touched.
pub fn prune(destination_root: &Path, resolved: &HashSet<PathBuf>, clean: bool) -> PruneReport {
    let mut report = PruneReport::default();
    if clean {
        return report;
    }

    let entries = match fs::read_dir(destination_root) {
        Ok(entries) => entries,
        Err(e) => {
            if destination_root.exists() {
                warn!("Cannot list {}: {}", destination_root.display(), e);
            }
            return report;
        }
    };

    let mut orphans: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.is_dir() && !resolved.contains(path))
        .collect();
    orphans.sort();

    for orphan in orphans {
        match fs::remove_dir_all(&orphan) {
            Ok(()) => {
                info!("Removed unused library {}", orphan.display());
                report.removed.push(orphan);
            }
            Err(e) => {
                warn!("Failed to remove {}: {}", orphan.display(), e);
                report.failures.push((orphan, e.to_string()));
            }
        }
    }

    report
}
