//! # Library Resolution
//!
//! Turns a library reference, as written in a descriptor's `libraries`
//! list, into a [`ResolvedLibrary`]: its canonical name, the locator it is
//! fetched from, and its destination directory.
//!
//! Three spellings are accepted:
//!
//! | Reference                          | Locator                              | Name    |
//! |------------------------------------|--------------------------------------|---------|
//! | `https://host/x/log.git`           | verbatim                             | `log`   |
//! | `git@host:x/log.git`               | verbatim                             | `log`   |
//! | `acme/log`                         | `https://github.com/acme/log`        | `log`   |
//! | `log`                              | catalog value for `log`              | `log`   |
//!
//! Resolution is a pure function of its inputs and never touches the disk.

use std::fmt;
use std::path::{Path, PathBuf};

use crate::catalog::Catalog;
use crate::defaults::SHORTHAND_HOST;
use crate::error::{Error, Result};

/// A parsed library reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LibraryReference {
    /// A full source locator, used verbatim.
    Locator(String),
    /// `owner/repo` on the default host.
    Shorthand(String),
    /// A catalog key.
    Catalog(String),
}

impl LibraryReference {
    /// Classifies a reference string.
    pub fn parse(reference: &str) -> Result<Self> {
        let reference = reference.trim();
        if reference.is_empty() {
            return Err(Error::InvalidReference {
                reference: reference.to_string(),
                message: "reference is empty".to_string(),
            });
        }

        if reference.contains("://") || reference.starts_with("git@") {
            Ok(Self::Locator(reference.to_string()))
        } else if reference.contains('/') {
            Ok(Self::Shorthand(reference.trim_matches('/').to_string()))
        } else {
            Ok(Self::Catalog(reference.to_string()))
        }
    }
}

impl fmt::Display for LibraryReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Locator(s) | Self::Shorthand(s) | Self::Catalog(s) => write!(f, "{}", s),
        }
    }
}

/// A library with a known identity and destination.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedLibrary {
    /// Canonical name; also the destination directory name and manifest key.
    pub name: String,
    /// Where the source is fetched from.
    pub locator: String,
    /// `<libraries root>/<name>`.
    pub destination: PathBuf,
}

impl ResolvedLibrary {
    /// Whether both libraries are fetched from the same repository, however
    /// their locators are spelled.
    pub fn same_repository(&self, other: &ResolvedLibrary) -> bool {
        repository_key(&self.locator) == repository_key(&other.locator)
    }
}

/// Reduces a locator to `host/path` for comparison.
///
/// The scheme, any user name, and a trailing `/` or `.git` are dropped, and
/// the scp form `git@host:path` becomes `host/path`. The host is compared
/// case-insensitively.
pub fn repository_key(locator: &str) -> String {
    let locator = locator.trim();
    let address = match locator.split_once("://") {
        Some((_, rest)) => rest.to_string(),
        None => match locator.split_once(':') {
            Some((host, path)) => format!("{}/{}", host, path.trim_start_matches('/')),
            None => locator.to_string(),
        },
    };

    let address = match address.split_once('/') {
        Some((authority, path)) => {
            let host = authority
                .rsplit_once('@')
                .map_or(authority, |(_, host)| host);
            format!("{}/{}", host.to_ascii_lowercase(), path)
        }
        None => address,
    };

    let trimmed = address.trim_end_matches('/');
    let trimmed = trimmed.strip_suffix(".git").unwrap_or(trimmed);
    trimmed.trim_end_matches('/').to_string()
}

/// Derives the canonical name of a locator: the last path segment without
/// a trailing `.git`.
pub fn canonical_name(locator: &str) -> Result<String> {
    let trimmed = locator.trim().trim_end_matches('/');
    let segment = trimmed.rsplit(['/', ':']).next().unwrap_or(trimmed);
    let name = segment.strip_suffix(".git").unwrap_or(segment);

    if name.is_empty() || name == "." || name == ".." {
        return Err(Error::InvalidReference {
            reference: locator.to_string(),
            message: "cannot derive a library name from it".to_string(),
        });
    }
    Ok(name.to_string())
}

/// Resolves `reference` against `catalog`, placing it under
/// `destination_root`.
pub fn resolve(reference: &str, destination_root: &Path, catalog: &Catalog) -> Result<ResolvedLibrary> {
    let (name, locator) = match LibraryReference::parse(reference)? {
        LibraryReference::Locator(locator) => (canonical_name(&locator)?, locator),
        LibraryReference::Shorthand(path) => {
            let locator = format!("{}{}", SHORTHAND_HOST, path);
            (canonical_name(&locator)?, locator)
        }
        LibraryReference::Catalog(name) => {
            let locator = catalog
                .get(&name)
                .ok_or_else(|| Error::UnknownLibrary { name: name.clone() })?
                .to_string();
            (name, locator)
        }
    };

    Ok(ResolvedLibrary {
        destination: destination_root.join(&name),
        name,
        locator,
    })
}
