//! Shared test utilities for integration and E2E tests.
//!
//! ## Usage
//!
//! Add `mod common;` to your test file, then use the helpers:
//!
//! ```rust,ignore
//! mod common;
//! use common::prelude::*;
//!
//! #[test]
//! fn test_example() {
//!     let fixture = TestFixture::new().with_catalog(&[("gpio", "https://x/gpio")]);
//!     fixture.command().arg("list").assert().success();
//! }
//! ```

use assert_cmd::cargo::cargo_bin_cmd;
use assert_fs::prelude::*;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Re-export commonly used test dependencies for convenience.
pub mod prelude {
    pub use assert_fs::prelude::*;
    pub use predicates::prelude::*;

    #[allow(unused_imports)]
    pub use super::descriptors;
    #[allow(unused_imports)]
    pub use super::init_git_repo;
    pub use super::TestFixture;
}

/// Common descriptor snippets for testing.
#[allow(dead_code)]
pub mod descriptors {
    /// Descriptor with metadata only.
    pub const EMPTY: &str = r#"name: app
description: test project
author: tester
license: MIT
libraries: []
"#;

    /// Descriptor declaring one library that is not in any catalog.
    pub const MISSING_LIBRARY: &str = r#"name: app
description: test project
author: tester
license: MIT
libraries:
  - missing-lib
"#;

    /// Descriptor with scripts.
    pub const WITH_SCRIPTS: &str = r#"name: app
description: test project
author: tester
license: MIT
libraries: []
scripts:
  hello: echo hello >> out.txt
  fail: exit 3
"#;

    /// Builds a descriptor declaring `libraries`.
    pub fn with_libraries(name: &str, libraries: &[&str]) -> String {
        let mut yaml = format!(
            "name: {}\ndescription: test\nauthor: tester\nlicense: MIT\n",
            name
        );
        if libraries.is_empty() {
            yaml.push_str("libraries: []\n");
        } else {
            yaml.push_str("libraries:\n");
            for library in libraries {
                yaml.push_str(&format!("  - \"{}\"\n", library));
            }
        }
        yaml
    }
}

/// Creates a git repository at `path` with `files` committed.
///
/// Requires a `git` binary; only used by tests gated behind the
/// `integration-tests` feature.
#[allow(dead_code)]
pub fn init_git_repo(path: &Path, files: &[(&str, &str)]) {
    std::fs::create_dir_all(path).unwrap();
    for (name, content) in files {
        std::fs::write(path.join(name), content).unwrap();
    }
    let git = |args: &[&str]| {
        let status = Command::new("git")
            .args(["-c", "user.name=test", "-c", "user.email=test@example.com"])
            .args(args)
            .current_dir(path)
            .status()
            .expect("git must be installed for integration tests");
        assert!(status.success(), "git {:?} failed", args);
    };
    git(&["init", "--quiet"]);
    git(&["add", "--all"]);
    git(&["commit", "--quiet", "--allow-empty", "-m", "initial"]);
}

/// A temporary workspace holding a project directory and a local catalog
/// checkout.
///
/// ```text
/// <tmp>/project/   embuild.yaml lives here; commands run here
/// <tmp>/catalog/   repository.json
/// <tmp>/remotes/   scratch space for git repositories
/// <tmp>/home/      HOME for the spawned binary
/// ```
pub struct TestFixture {
    temp_dir: assert_fs::TempDir,
}

impl TestFixture {
    /// Create a new test fixture with empty project and catalog directories.
    pub fn new() -> Self {
        let temp_dir = assert_fs::TempDir::new().expect("Failed to create temp directory");
        for dir in ["project", "catalog", "remotes", "home"] {
            temp_dir
                .child(dir)
                .create_dir_all()
                .expect("Failed to create fixture directory");
        }
        Self { temp_dir }
    }

    /// Write `embuild.yaml` into the project with the given content.
    pub fn with_descriptor(self, content: &str) -> Self {
        self.project()
            .child("embuild.yaml")
            .write_str(content)
            .expect("Failed to write descriptor");
        self
    }

    /// Write the catalog record with the given entries.
    pub fn with_catalog(self, entries: &[(&str, &str)]) -> Self {
        let libraries: serde_json::Map<String, serde_json::Value> = entries
            .iter()
            .map(|(k, v)| (k.to_string(), serde_json::Value::String(v.to_string())))
            .collect();
        let record = serde_json::json!({ "libraries": libraries });
        self.temp_dir
            .child("catalog/repository.json")
            .write_str(&record.to_string())
            .expect("Failed to write catalog");
        self
    }

    /// Add a file under the project directory.
    #[allow(dead_code)]
    pub fn with_file(self, path: &str, content: &str) -> Self {
        self.project()
            .child(path)
            .write_str(content)
            .expect("Failed to write file");
        self
    }

    /// The project directory.
    pub fn project(&self) -> assert_fs::fixture::ChildPath {
        self.temp_dir.child("project")
    }

    /// The project directory as a path.
    pub fn path(&self) -> PathBuf {
        self.project().path().to_path_buf()
    }

    /// Scratch directory for git repositories.
    #[allow(dead_code)]
    pub fn remotes(&self) -> PathBuf {
        self.temp_dir.path().join("remotes")
    }

    /// Create a command running in the project directory against the local
    /// catalog, without syncing it.
    pub fn command(&self) -> assert_cmd::Command {
        let mut cmd = cargo_bin_cmd!("embuild");
        cmd.current_dir(self.path())
            .env("EMBUILD_CATALOG_DIR", self.temp_dir.path().join("catalog"))
            .env("EMBUILD_NO_CATALOG_SYNC", "true")
            .env("HOME", self.temp_dir.path().join("home"))
            .env_remove("RUST_LOG")
            .env_remove("EMBUILD_CATALOG_URL");
        cmd
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}
