//! Project scaffolding for `embuild create` and `embuild init`.
//!
//! A created project is the smallest CMake project that consumes the
//! generated libraries file:
//!
//! ```text
//! <destination>/
//! ├── embuild.yaml
//! ├── CMakeLists.txt      add_subdirectory(libraries)
//! ├── main.c
//! └── .gitignore          /libraries/  /build/
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use crate::defaults::DEFAULT_LIBRARIES_DESTINATION;
use crate::descriptor::{descriptor_path, ProjectDescriptor};
use crate::error::{Error, Result};

const MAIN_C: &str = r#"#include <stdio.h>

int main(void)
{
    printf("Hello from embuild!\n");
    return 0;
}
"#;

fn cmake_lists(project: &str, libraries_dir: &str) -> String {
    format!(
        "cmake_minimum_required(VERSION 3.20)\n\
         project({project} C)\n\
         \n\
         add_subdirectory({libraries_dir})\n\
         \n\
         add_executable(${{PROJECT_NAME}} main.c)\n"
    )
}

fn gitignore(libraries_dir: &str) -> String {
    format!("/{}/\n/build/\n", libraries_dir)
}

/// Creates a new project directory at `destination`.
///
/// Fails with `ProjectExists` if `destination` already holds a descriptor.
/// Existing unrelated files are left alone; scaffold files that already
/// exist are not overwritten.
pub fn create_project(destination: &Path, descriptor: &ProjectDescriptor) -> Result<Vec<PathBuf>> {
    let descriptor_file = descriptor_path(destination);
    if descriptor_file.exists() {
        return Err(Error::ProjectExists {
            path: destination.to_path_buf(),
        });
    }
    fs::create_dir_all(destination)?;

    let libraries_dir = descriptor
        .libraries_destination
        .as_ref()
        .map(|p| p.to_string_lossy().replace('\\', "/"))
        .unwrap_or_else(|| DEFAULT_LIBRARIES_DESTINATION.to_string());

    let mut written = vec![descriptor.store_in_dir(destination)?];
    let files = [
        ("CMakeLists.txt", cmake_lists(&descriptor.name, &libraries_dir)),
        ("main.c", MAIN_C.to_string()),
        (".gitignore", gitignore(&libraries_dir)),
    ];
    for (name, content) in files {
        let path = destination.join(name);
        if !path.exists() {
            fs::write(&path, content)?;
            written.push(path);
        }
    }
    Ok(written)
}

/// Writes a descriptor into an existing directory.
pub fn init_project(dir: &Path, descriptor: &ProjectDescriptor) -> Result<PathBuf> {
    if descriptor_path(dir).exists() {
        return Err(Error::ProjectExists {
            path: dir.to_path_buf(),
        });
    }
    descriptor.store_in_dir(dir)
}

/// Default project name for a directory: its final component.
pub fn default_project_name(dir: &Path) -> String {
    dir.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .filter(|n| !n.is_empty())
        .unwrap_or_else(|| "project".to_string())
}
