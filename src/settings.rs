//! Run-wide settings shared by every command.
//!
//! Verbosity and the catalog location are decided once from the command
//! line and passed down explicitly; nothing in the library reads them from
//! global state.

use std::path::PathBuf;

use crate::catalog::{Catalog, CatalogSource};
use crate::defaults::{default_catalog_dir, CATALOG_REPOSITORY};
use crate::error::Result;
use crate::process::ShellRunner;
use crate::repository::{SourceFetcher, SystemGit};

/// Settings for one invocation.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Surface subprocess output.
    pub verbose: bool,
    /// Where the library catalog comes from.
    pub catalog: CatalogSource,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            verbose: false,
            catalog: CatalogSource {
                url: CATALOG_REPOSITORY.to_string(),
                dir: default_catalog_dir(),
                sync: true,
            },
        }
    }
}

impl Settings {
    /// Builds settings, falling back to defaults for unset values.
    pub fn new(
        verbose: bool,
        catalog_url: Option<String>,
        catalog_dir: Option<PathBuf>,
        sync_catalog: bool,
    ) -> Self {
        Self {
            verbose,
            catalog: CatalogSource {
                url: catalog_url.unwrap_or_else(|| CATALOG_REPOSITORY.to_string()),
                dir: catalog_dir.unwrap_or_else(default_catalog_dir),
                sync: sync_catalog,
            },
        }
    }

    /// Shell runner honoring the verbosity setting.
    pub fn runner(&self) -> ShellRunner {
        ShellRunner::new(self.verbose)
    }

    /// Library fetcher honoring the verbosity setting.
    pub fn fetcher(&self) -> SourceFetcher {
        SourceFetcher::new(self.verbose)
    }

    /// Synchronizes and loads the library catalog.
    pub fn open_catalog(&self) -> Result<Catalog> {
        self.catalog.open(Box::new(SystemGit::new(self.verbose)))
    }
}
