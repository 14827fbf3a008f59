//! Generated aggregation file.
//!
//! The shared libraries directory gets a `CMakeLists.txt` that pulls every
//! resolved library into the consuming project's build:
//!
//! ```cmake
//! # This file is auto-generated by embuild. Do not edit!
//! add_subdirectory(alpha)
//! add_subdirectory(beta)
//! ```
//!
//! The file is rewritten from scratch on every update.

use std::fs;
use std::path::{Path, PathBuf};

use log::debug;

use crate::defaults::{MANIFEST_FILENAME, MANIFEST_HEADER};
use crate::error::Result;

/// Renders the manifest text for `names`, in the given order.
pub fn render_manifest<S: AsRef<str>>(names: &[S]) -> String {
    let mut content = String::from(MANIFEST_HEADER);
    content.push('\n');
    for name in names {
        content.push_str(&format!("add_subdirectory({})\n", name.as_ref()));
    }
    content
}

/// Writes the manifest into `destination_root`, creating the directory if
/// needed. Returns the path written.
pub fn write_manifest<S: AsRef<str>>(destination_root: &Path, names: &[S]) -> Result<PathBuf> {
    fs::create_dir_all(destination_root)?;
    let path = destination_root.join(MANIFEST_FILENAME);
    fs::write(&path, render_manifest(names))?;
    debug!("Wrote {} with {} entries", path.display(), names.len());
    Ok(path)
}
