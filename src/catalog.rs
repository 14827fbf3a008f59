//! # Library Catalog
//!
//! The catalog maps short library names to the git locators they are
//! fetched from. It lives in its own git repository as a single
//! `repository.json` record:
//!
//! ```json
//! { "libraries": { "gpio": "git@github.com:acme/gpio.git" } }
//! ```
//!
//! A local checkout (by default `~/.embuild/repository`) is cloned on first
//! use and refreshed on every later run unless syncing is disabled. The
//! catalog is loaded once per run and never mutated.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, info};
use serde::Deserialize;

use crate::defaults::CATALOG_FILENAME;
use crate::error::{Error, Result};
use crate::repository::{FetchAction, GitOperations, SourceFetcher};

#[derive(Debug, Deserialize)]
struct CatalogRecord {
    libraries: BTreeMap<String, String>,
}

/// Immutable name-to-locator lookup.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    libraries: BTreeMap<String, String>,
}

impl Catalog {
    /// Builds a catalog from explicit entries.
    pub fn from_entries<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            libraries: entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Parses the JSON catalog record.
    pub fn parse(json: &str) -> Result<Self> {
        let record: CatalogRecord = serde_json::from_str(json).map_err(|e| Error::ConfigParse {
            message: format!("invalid {}: {}", CATALOG_FILENAME, e),
            hint: Some("expected an object with a `libraries` mapping".to_string()),
        })?;
        Ok(Self {
            libraries: record.libraries,
        })
    }

    /// Loads `repository.json` from a catalog checkout.
    pub fn load(dir: &Path) -> Result<Self> {
        let path = dir.join(CATALOG_FILENAME);
        let content = fs::read_to_string(&path).map_err(|e| Error::ConfigParse {
            message: format!("cannot read library catalog {}: {}", path.display(), e),
            hint: Some(
                "check --catalog-dir, or drop --no-catalog-sync to fetch the catalog"
                    .to_string(),
            ),
        })?;
        Self::parse(&content)
    }

    /// Locator for a catalog name.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.libraries.get(name).map(String::as_str)
    }

    /// Whether `name` is a catalog key.
    pub fn contains(&self, name: &str) -> bool {
        self.libraries.contains_key(name)
    }

    /// All catalog names, sorted.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.libraries.keys().map(String::as_str)
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.libraries.len()
    }

    /// Whether the catalog has no entries.
    pub fn is_empty(&self) -> bool {
        self.libraries.is_empty()
    }
}

/// Where the catalog comes from and whether to synchronize it.
#[derive(Debug, Clone)]
pub struct CatalogSource {
    /// Git URL of the catalog repository.
    pub url: String,
    /// Local checkout directory.
    pub dir: PathBuf,
    /// Clone or pull before loading. When false the checkout is used as-is.
    pub sync: bool,
}

impl CatalogSource {
    /// Synchronizes the local checkout (when enabled) and loads the catalog.
    pub fn open(&self, git_ops: Box<dyn GitOperations>) -> Result<Catalog> {
        if self.sync {
            let fetcher = SourceFetcher::with_operations(git_ops);
            let action = fetcher
                .fetch(&self.url, &self.dir)
                .map_err(|e| Error::CatalogSync {
                    url: self.url.clone(),
                    message: e.to_string(),
                })?;
            if action == FetchAction::Cloned {
                info!("Library catalog cloned into {}", self.dir.display());
            }
        } else {
            debug!("Using catalog at {} without syncing", self.dir.display());
        }

        let catalog = Catalog::load(&self.dir)?;
        debug!("Catalog provides {} libraries", catalog.len());
        Ok(catalog)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::mock::MockGitOperations;
    use tempfile::TempDir;

    const RECORD: &str = r#"{
        "libraries": {
            "uart": "https://github.com/acme/uart",
            "gpio": "git@github.com:acme/gpio.git"
        }
    }"#;

    #[test]
    fn test_parse_catalog_record() {
        let catalog = Catalog::parse(RECORD).unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.get("gpio"), Some("git@github.com:acme/gpio.git"));
        assert!(catalog.contains("uart"));
        assert!(!catalog.contains("spi"));
    }

    #[test]
    fn test_names_are_sorted() {
        let catalog = Catalog::parse(RECORD).unwrap();
        assert_eq!(catalog.names().collect::<Vec<_>>(), vec!["gpio", "uart"]);
    }

    #[test]
    fn test_parse_rejects_record_without_libraries() {
        let err = Catalog::parse(r#"{"packages": {}}"#).unwrap_err();
        assert!(matches!(err, Error::ConfigParse { .. }));
    }

    #[test]
    fn test_load_missing_record_names_the_file() {
        let temp_dir = TempDir::new().unwrap();
        let err = Catalog::load(temp_dir.path()).unwrap_err();

        assert!(matches!(err, Error::ConfigParse { hint: Some(_), .. }));
        assert!(err.to_string().contains(CATALOG_FILENAME));
    }

    #[test]
    fn test_open_without_sync_reads_checkout() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join(CATALOG_FILENAME), RECORD).unwrap();

        let mock = MockGitOperations::new();
        let source = CatalogSource {
            url: "git@example.com:catalog.git".to_string(),
            dir: temp_dir.path().to_path_buf(),
            sync: false,
        };
        let catalog = source.open(Box::new(mock.clone())).unwrap();

        assert_eq!(catalog.len(), 2);
        assert!(mock.cloned_urls().is_empty());
        assert!(mock.pulled().is_empty());
    }

    #[test]
    fn test_open_clones_missing_checkout() {
        let temp_dir = TempDir::new().unwrap();
        let dir = temp_dir.path().join(".embuild/repository");
        let mock = MockGitOperations::new()
            .with_repo("git@example.com:catalog.git", &[(CATALOG_FILENAME, RECORD)]);

        let source = CatalogSource {
            url: "git@example.com:catalog.git".to_string(),
            dir: dir.clone(),
            sync: true,
        };
        let catalog = source.open(Box::new(mock.clone())).unwrap();

        assert_eq!(catalog.get("uart"), Some("https://github.com/acme/uart"));
        assert_eq!(mock.cloned_urls(), vec!["git@example.com:catalog.git"]);
    }

    #[test]
    fn test_open_pulls_existing_checkout() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join(CATALOG_FILENAME), RECORD).unwrap();
        let mock = MockGitOperations::new();

        let source = CatalogSource {
            url: "git@example.com:catalog.git".to_string(),
            dir: temp_dir.path().to_path_buf(),
            sync: true,
        };
        source.open(Box::new(mock.clone())).unwrap();

        assert_eq!(mock.pulled(), vec![temp_dir.path().to_path_buf()]);
    }

    #[test]
    fn test_open_reports_sync_failure() {
        let temp_dir = TempDir::new().unwrap();
        let source = CatalogSource {
            url: "git@example.com:unreachable.git".to_string(),
            dir: temp_dir.path().join("repository"),
            sync: true,
        };

        let err = source.open(Box::new(MockGitOperations::new())).unwrap_err();
        assert!(matches!(err, Error::CatalogSync { ref url, .. } if url == "git@example.com:unreachable.git"));
    }
}
