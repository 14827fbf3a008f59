//! # Project Descriptor
//!
//! This module defines the data structure stored as `embuild.yaml` at a
//! project root and at the root of any fetched library that is itself an
//! embuild project, together with load/store helpers.
//!
//! ## Format
//!
//! ```yaml
//! name: blinky
//! description: Blinks an LED
//! author: Jane Doe
//! license: MIT
//! libraries:
//!   - gpio                           # catalog name
//!   - acme/ring-buffer               # owner/repo shorthand
//!   - https://git.example.com/x/log  # full locator
//! preconditions:
//!   - python3 tools/gen_regs.py
//! libraries_destination: third_party
//! scripts:
//!   build: cmake -B build -G Ninja && ninja -C build
//! ```
//!
//! `name`, `description`, `author`, `license` are required. Everything else
//! is optional. The root descriptor is read and written by the CLI; nested
//! descriptors inside fetched libraries are only ever read.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Component, Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::defaults::{DEFAULT_LIBRARIES_DESTINATION, DESCRIPTOR_FILENAME};
use crate::error::{Error, Result};

/// Contents of an `embuild.yaml` file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectDescriptor {
    /// Project name.
    pub name: String,
    /// One-line description.
    pub description: String,
    /// Author, free form.
    pub author: String,
    /// License identifier.
    pub license: String,
    /// Library references, in declaration order.
    #[serde(default)]
    pub libraries: Vec<String>,
    /// Shell commands that must succeed before this project's libraries are
    /// processed. They run with the project root as working directory.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub preconditions: Vec<String>,
    /// Override for the shared libraries directory, relative to the project
    /// root.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub libraries_destination: Option<PathBuf>,
    /// Named shell command templates for `embuild run`.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub scripts: BTreeMap<String, String>,
}

impl ProjectDescriptor {
    /// Creates a descriptor with placeholder metadata and no libraries.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: "Project description".to_string(),
            author: "Author".to_string(),
            license: "MIT".to_string(),
            libraries: Vec::new(),
            preconditions: Vec::new(),
            libraries_destination: None,
            scripts: BTreeMap::new(),
        }
    }

    /// Parses a descriptor from YAML text.
    pub fn parse(yaml_content: &str) -> Result<Self> {
        serde_yaml::from_str(yaml_content).map_err(|e| Error::ConfigParse {
            message: format!("invalid {}: {}", DESCRIPTOR_FILENAME, e),
            hint: Some(
                "required keys are name, description, author, license and libraries"
                    .to_string(),
            ),
        })
    }

    /// Loads a descriptor from an explicit file path.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Loads the descriptor of the project rooted at `dir`.
    ///
    /// Returns `Ok(None)` when the directory has no `embuild.yaml`, which is
    /// the normal case for plain libraries.
    pub fn load_from_dir(dir: &Path) -> Result<Option<Self>> {
        let path = descriptor_path(dir);
        if !path.is_file() {
            return Ok(None);
        }
        Self::load(&path).map(Some)
    }

    /// Loads the descriptor of the project rooted at `dir`, failing with
    /// `MissingProject` when there is none.
    pub fn load_required(dir: &Path) -> Result<Self> {
        Self::load_from_dir(dir)?.ok_or_else(|| Error::MissingProject {
            root: dir.to_path_buf(),
        })
    }

    /// Serializes the descriptor to `path`, replacing any previous content.
    pub fn store<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = serde_yaml::to_string(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Writes the descriptor as `embuild.yaml` inside `dir`.
    pub fn store_in_dir(&self, dir: &Path) -> Result<PathBuf> {
        let path = descriptor_path(dir);
        self.store(&path)?;
        Ok(path)
    }

    /// Shared libraries directory for a project rooted at `project_root`.
    ///
    /// An override must name a subdirectory of the project root. Everything
    /// under that directory is owned by embuild and may be deleted, so an
    /// empty, absolute or escaping path is rejected.
    pub fn libraries_root(&self, project_root: &Path) -> Result<PathBuf> {
        let destination = match &self.libraries_destination {
            Some(destination) => destination,
            None => return Ok(project_root.join(DEFAULT_LIBRARIES_DESTINATION)),
        };

        let escapes = destination.components().any(|c| {
            matches!(
                c,
                Component::ParentDir | Component::RootDir | Component::Prefix(_)
            )
        });
        let has_name = destination
            .components()
            .any(|c| matches!(c, Component::Normal(_)));
        if escapes || !has_name {
            return Err(Error::ConfigParse {
                message: format!(
                    "invalid libraries_destination '{}' in {}",
                    destination.display(),
                    DESCRIPTOR_FILENAME
                ),
                hint: Some(
                    "use a subdirectory relative to the project root, such as `libraries`"
                        .to_string(),
                ),
            });
        }
        Ok(project_root.join(destination))
    }

    /// Appends a library reference.
    ///
    /// The comparison is on the reference text as written; two spellings of
    /// the same library are not detected here.
    pub fn add_library(&mut self, reference: &str) -> Result<()> {
        let reference = reference.trim();
        if self.libraries.iter().any(|existing| existing == reference) {
            return Err(Error::DuplicateLibrary {
                reference: reference.to_string(),
            });
        }
        self.libraries.push(reference.to_string());
        Ok(())
    }

    /// Looks up a named script.
    pub fn script(&self, name: &str) -> Option<&str> {
        self.scripts.get(name).map(String::as_str)
    }
}

/// Path of the descriptor file for a project rooted at `dir`.
pub fn descriptor_path(dir: &Path) -> PathBuf {
    dir.join(DESCRIPTOR_FILENAME)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_parse_full_descriptor() {
        let yaml = r#"
name: blinky
description: Blinks an LED
author: Jane Doe
license: MIT
libraries:
  - gpio
  - acme/ring-buffer
preconditions:
  - python3 tools/gen_regs.py
libraries_destination: third_party
scripts:
  build: ninja -C build
"#;
        let descriptor = ProjectDescriptor::parse(yaml).unwrap();
        assert_eq!(descriptor.name, "blinky");
        assert_eq!(descriptor.libraries, vec!["gpio", "acme/ring-buffer"]);
        assert_eq!(descriptor.preconditions, vec!["python3 tools/gen_regs.py"]);
        assert_eq!(
            descriptor.libraries_destination,
            Some(PathBuf::from("third_party"))
        );
        assert_eq!(descriptor.script("build"), Some("ninja -C build"));
        assert_eq!(descriptor.script("flash"), None);
    }

    #[test]
    fn test_parse_minimal_descriptor_defaults() {
        let yaml = "name: a\ndescription: b\nauthor: c\nlicense: d\n";
        let descriptor = ProjectDescriptor::parse(yaml).unwrap();
        assert!(descriptor.libraries.is_empty());
        assert!(descriptor.preconditions.is_empty());
        assert!(descriptor.scripts.is_empty());
        assert_eq!(descriptor.libraries_destination, None);
    }

    #[test]
    fn test_parse_missing_required_key() {
        let yaml = "name: a\nlibraries: []\n";
        let err = ProjectDescriptor::parse(yaml).unwrap_err();
        assert!(matches!(err, Error::ConfigParse { .. }));
        assert!(err.to_string().contains("hint:"));
    }

    #[test]
    fn test_store_and_load_round_trip() {
        let temp_dir = TempDir::new().unwrap();
        let mut descriptor = ProjectDescriptor::new("blinky");
        descriptor.libraries.push("gpio".to_string());
        descriptor
            .scripts
            .insert("build".to_string(), "ninja".to_string());

        let path = descriptor.store_in_dir(temp_dir.path()).unwrap();
        assert!(path.ends_with(DESCRIPTOR_FILENAME));

        let loaded = ProjectDescriptor::load_from_dir(temp_dir.path())
            .unwrap()
            .unwrap();
        assert_eq!(loaded, descriptor);
    }

    #[test]
    fn test_store_omits_empty_optional_keys() {
        let temp_dir = TempDir::new().unwrap();
        let descriptor = ProjectDescriptor::new("blinky");
        let path = descriptor.store_in_dir(temp_dir.path()).unwrap();

        let content = fs::read_to_string(path).unwrap();
        assert!(content.contains("libraries: []"));
        assert!(!content.contains("preconditions"));
        assert!(!content.contains("scripts"));
        assert!(!content.contains("libraries_destination"));
    }

    #[test]
    fn test_load_from_dir_without_descriptor() {
        let temp_dir = TempDir::new().unwrap();
        assert!(ProjectDescriptor::load_from_dir(temp_dir.path())
            .unwrap()
            .is_none());

        let err = ProjectDescriptor::load_required(temp_dir.path()).unwrap_err();
        assert!(matches!(err, Error::MissingProject { .. }));
    }

    #[test]
    fn test_libraries_root_default_and_override() {
        let root = Path::new("/work/blinky");
        let mut descriptor = ProjectDescriptor::new("blinky");
        assert_eq!(
            descriptor.libraries_root(root).unwrap(),
            PathBuf::from("/work/blinky/libraries")
        );

        descriptor.libraries_destination = Some(PathBuf::from("third_party/libs"));
        assert_eq!(
            descriptor.libraries_root(root).unwrap(),
            PathBuf::from("/work/blinky/third_party/libs")
        );

        descriptor.libraries_destination = Some(PathBuf::from("./vendor"));
        assert_eq!(
            descriptor.libraries_root(root).unwrap(),
            PathBuf::from("/work/blinky/./vendor")
        );
    }

    #[test]
    fn test_libraries_root_rejects_project_root_and_outside() {
        let root = Path::new("/work/blinky");
        let mut descriptor = ProjectDescriptor::new("blinky");

        for bad in ["", ".", "./", "..", "../shared", "libs/../..", "/opt/libs"] {
            descriptor.libraries_destination = Some(PathBuf::from(bad));
            let err = descriptor.libraries_root(root).unwrap_err();
            assert!(
                matches!(err, Error::ConfigParse { hint: Some(_), .. }),
                "{:?} should be rejected",
                bad
            );
        }
    }

    #[test]
    fn test_dot_destination_from_yaml_is_rejected_when_used() {
        let descriptor = ProjectDescriptor::parse(
            "name: a\ndescription: d\nauthor: x\nlicense: MIT\nlibraries: [gpio]\nlibraries_destination: .\n",
        )
        .unwrap();
        assert!(descriptor.libraries_root(Path::new("/p")).is_err());
    }

    #[test]
    fn test_add_library_rejects_duplicates() {
        let mut descriptor = ProjectDescriptor::new("blinky");
        descriptor.add_library("gpio").unwrap();
        descriptor.add_library(" uart ").unwrap();

        let err = descriptor.add_library("gpio").unwrap_err();
        assert!(matches!(err, Error::DuplicateLibrary { ref reference } if reference == "gpio"));
        assert_eq!(descriptor.libraries, vec!["gpio", "uart"]);
    }
}
