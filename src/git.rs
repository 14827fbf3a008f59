use std::ffi::OsString;
use std::fs;
use std::path::Path;
use std::process::{Command, Output};

use log::debug;

use crate::error::Error;

/// Clone a repository using a shallow clone
///
/// This uses the system git command, which automatically handles:
/// - SSH keys from ~/.ssh/
/// - Git credential helpers
/// - Personal access tokens
/// - Any authentication configured in ~/.gitconfig
pub fn clone_shallow(url: &str, target_dir: &Path, verbose: bool) -> Result<(), Error> {
    // Create parent directory if it doesn't exist
    if let Some(parent) = target_dir.parent() {
        fs::create_dir_all(parent)?;
    }

    let output = Command::new("git")
        .args(clone_args(url, target_dir))
        .output()
        .map_err(|e| fetch_failed(url, target_dir, e.to_string()))?;
    surface(&output, verbose);

    if !output.status.success() {
        return Err(fetch_failed(url, target_dir, describe_failure(&output)));
    }

    Ok(())
}

/// Arguments for a shallow clone. `--` keeps a locator starting with `-`
/// from being read as an option.
fn clone_args(url: &str, target_dir: &Path) -> Vec<OsString> {
    vec![
        "clone".into(),
        "--depth".into(),
        "1".into(),
        "--".into(),
        url.into(),
        target_dir.as_os_str().to_owned(),
    ]
}

/// Refresh an existing checkout with `git pull`
pub fn pull(target_dir: &Path, verbose: bool) -> Result<(), Error> {
    let output = Command::new("git")
        .arg("pull")
        .current_dir(target_dir)
        .output()
        .map_err(|e| fetch_failed("(existing checkout)", target_dir, e.to_string()))?;
    surface(&output, verbose);

    if !output.status.success() {
        let locator = remote_url(target_dir).unwrap_or_else(|| "(existing checkout)".to_string());
        return Err(fetch_failed(&locator, target_dir, describe_failure(&output)));
    }

    Ok(())
}

/// Read the `origin` URL of a checkout, if it has one
pub fn remote_url(target_dir: &Path) -> Option<String> {
    let output = Command::new("git")
        .args(["remote", "get-url", "origin"])
        .current_dir(target_dir)
        .output()
        .ok()?;
    if !output.status.success() {
        return None;
    }
    let url = String::from_utf8_lossy(&output.stdout).trim().to_string();
    (!url.is_empty()).then_some(url)
}

fn fetch_failed(url: &str, target_dir: &Path, message: String) -> Error {
    Error::FetchFailed {
        locator: url.to_string(),
        destination: target_dir.to_path_buf(),
        message,
    }
}

fn surface(output: &Output, verbose: bool) {
    if !verbose {
        return;
    }
    for stream in [&output.stdout, &output.stderr] {
        let text = String::from_utf8_lossy(stream);
        for line in text.lines().filter(|l| !l.trim().is_empty()) {
            debug!("git: {}", line);
        }
    }
}

fn describe_failure(output: &Output) -> String {
    let stderr = String::from_utf8_lossy(&output.stderr);

    // Provide helpful error message for common auth failures
    if stderr.contains("Authentication failed")
        || stderr.contains("Permission denied")
        || stderr.contains("Could not read from remote repository")
    {
        format!(
            "Authentication failed. Make sure you have access to the repository.\n\
            For private repos, ensure you have:\n\
            - SSH key added to ssh-agent\n\
            - Git credentials configured\n\
            Error: {}",
            stderr.trim()
        )
    } else if stderr.trim().is_empty() {
        match output.status.code() {
            Some(code) => format!("git exited with status {}", code),
            None => "git was terminated by a signal".to_string(),
        }
    } else {
        stderr.trim().to_string()
    }
}
