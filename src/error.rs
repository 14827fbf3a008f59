//! # Error Handling
//!
//! This module defines the centralized error type for the `embuild` library.
//! It uses the `thiserror` library to build a single `Error` enum covering
//! every failure mode of an update run, so that callers (the CLI in
//! particular) can report a one-line message and exit.
//!
//! ## Key Components
//!
//! - **`Error`**: The main enum. Each variant corresponds to a specific
//!   failure and carries the context needed to explain it to an operator
//!   (library name, locator, command, path).
//!
//! - **`Result<T>`**: A type alias for `std::result::Result<T, Error>`, used
//!   throughout the library.
//!
//! Every error raised inside the resolver, the closure engine or the fetcher
//! is fatal to the current command. Nothing retries.

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for embuild operations
#[derive(Error, Debug)]
pub enum Error {
    /// A bare library name was not found in the catalog.
    #[error("Unknown library '{name}': not present in the catalog")]
    UnknownLibrary { name: String },

    /// A library reference could not be turned into a canonical name.
    #[error("Invalid library reference '{reference}': {message}")]
    InvalidReference { reference: String, message: String },

    /// Cloning or refreshing a library source failed.
    #[error("Failed to fetch {locator} into {}: {message}", destination.display())]
    FetchFailed {
        locator: String,
        destination: PathBuf,
        message: String,
    },

    /// A precondition declared by a project descriptor exited non-zero.
    #[error("Precondition '{command}' of '{project}' failed")]
    PreconditionFailed { project: String, command: String },

    /// `update` was invoked on a project that declares no libraries.
    #[error("No libraries declared in {}", descriptor.display())]
    NoLibrariesDeclared { descriptor: PathBuf },

    /// No project descriptor exists where one is required.
    #[error("No embuild project found in {} (missing embuild.yaml)", root.display())]
    MissingProject { root: PathBuf },

    /// `add` was invoked for a reference that is already declared.
    #[error("Library '{reference}' is already declared")]
    DuplicateLibrary { reference: String },

    /// Two different locators produce the same canonical name.
    ///
    /// Both would be fetched into the same destination directory, so the
    /// update is aborted instead of letting one silently replace the other.
    #[error("Library name collision for '{name}': {existing} and {incoming} share a destination")]
    NameCollision {
        name: String,
        existing: String,
        incoming: String,
    },

    /// A project descriptor or catalog file could not be parsed.
    #[error("Configuration parsing error: {message}{}", hint.as_ref().map(|h| format!("\n  hint: {}", h)).unwrap_or_default())]
    ConfigParse {
        message: String,
        /// Optional hint for how to fix the file
        hint: Option<String>,
    },

    /// The catalog checkout could not be cloned or refreshed.
    #[error("Failed to synchronize library catalog from {url}: {message}")]
    CatalogSync { url: String, message: String },

    /// `run` was asked for a script the descriptor does not declare.
    #[error("Script '{name}' not found{}", if available.is_empty() { String::new() } else { format!(" (available: {})", available.join(", ")) })]
    ScriptNotFound {
        name: String,
        available: Vec<String>,
    },

    /// A named script exited non-zero.
    #[error("Script '{name}' failed: {command}")]
    ScriptFailed { name: String, command: String },

    /// A project already exists where a new one was requested.
    #[error("Project already exists: {}", path.display())]
    ProjectExists { path: PathBuf },

    /// A required external tool is not installed or not on `PATH`.
    #[error("{tool} is not installed")]
    ToolMissing { tool: String },

    /// An I/O error, wrapped from `std::io::Error`.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A YAML error, wrapped from `serde_yaml::Error`.
    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// A JSON error, wrapped from `serde_json::Error`.
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A convenient type alias for `Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;
