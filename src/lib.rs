//! # embuild
//!
//! This library provides the core of the `embuild` command-line tool: it
//! turns a project's declared library list into a set of fetched library
//! checkouts plus a generated CMake file that adds all of them to the
//! project's build.
//!
//! ## Quick Example
//!
//! ```
//! use std::path::Path;
//! use embuild::catalog::Catalog;
//! use embuild::resolver::resolve;
//!
//! let catalog = Catalog::from_entries([("gpio", "git@github.com:acme/gpio.git")]);
//! let gpio = resolve("gpio", Path::new("libraries"), &catalog).unwrap();
//! assert_eq!(gpio.destination, Path::new("libraries/gpio"));
//!
//! let log = resolve("acme/log", Path::new("libraries"), &catalog).unwrap();
//! assert_eq!(log.locator, "https://github.com/acme/log");
//! ```
//!
//! ## Core Concepts
//!
//! - **Descriptor (`descriptor`)**: the `embuild.yaml` file at a project or
//!   library root, declaring the libraries it needs.
//! - **Catalog (`catalog`)**: a remote name-to-locator lookup for short
//!   library names.
//! - **Resolver (`resolver`)**: maps a reference to a canonical name, locator
//!   and destination directory.
//! - **Closure (`closure`)**: fetches libraries and follows their own
//!   descriptors until the full dependency set is known.
//! - **Manifest (`manifest`)** and **Prune (`prune`)**: write the generated
//!   `CMakeLists.txt` and delete directories nothing references any more.
//!
//! ## Execution Flow
//!
//! `update::update` drives a run: load the root descriptor, run its
//! preconditions, resolve the closure, write the manifest, prune. All
//! external effects go through the `GitOperations` and `ProcessRunner`
//! traits so the whole flow can be tested without git or a shell.

pub mod catalog;
pub mod closure;
pub mod defaults;
pub mod descriptor;
pub mod error;
pub mod git;
pub mod manifest;
pub mod process;
pub mod prune;
pub mod repository;
pub mod resolver;
pub mod scaffold;
pub mod scripts;
pub mod settings;
pub mod update;
