//! # External Process Execution
//!
//! Preconditions, scripts and the environment check all come down to "run
//! this shell command in that directory and tell me whether it worked". The
//! [`ProcessRunner`] trait captures exactly that contract so the closure
//! engine and the command layer never depend on how processes are spawned,
//! and tests can substitute a recording mock.
//!
//! Execution is blocking and has no timeout. Whether the child's output is
//! surfaced is decided by the `verbose` value the runner was built with.

use std::path::Path;
use std::process::{Command, Stdio};

use log::debug;

use crate::error::{Error, Result};

/// Result of running a command to completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProcessOutcome {
    /// Whether the command exited with status zero.
    pub success: bool,
    /// The exit code, if the process was not terminated by a signal.
    pub code: Option<i32>,
}

/// Trait for shell command execution - allows mocking in tests
pub trait ProcessRunner {
    /// Runs `command` through the platform shell with `cwd` as the working
    /// directory and waits for it to finish.
    ///
    /// An `Err` means the process could not be spawned at all; a command
    /// that ran and failed is reported through [`ProcessOutcome::success`].
    fn run(&self, command: &str, cwd: &Path) -> Result<ProcessOutcome>;
}

/// The default [`ProcessRunner`], which spawns `sh -c` (`cmd /C` on
/// Windows).
#[derive(Debug, Clone, Copy, Default)]
pub struct ShellRunner {
    verbose: bool,
}

impl ShellRunner {
    /// Creates a runner. With `verbose` set, child output goes to the
    /// terminal; otherwise it is discarded.
    pub fn new(verbose: bool) -> Self {
        Self { verbose }
    }
}

impl ProcessRunner for ShellRunner {
    fn run(&self, command: &str, cwd: &Path) -> Result<ProcessOutcome> {
        debug!("Running: '{}' in {}", command, cwd.display());

        let mut cmd = shell_command(command);
        cmd.current_dir(cwd);
        if self.verbose {
            cmd.stdout(Stdio::inherit()).stderr(Stdio::inherit());
        } else {
            cmd.stdout(Stdio::null()).stderr(Stdio::null());
        }

        let status = cmd.status()?;
        Ok(ProcessOutcome {
            success: status.success(),
            code: status.code(),
        })
    }
}

#[cfg(windows)]
fn shell_command(command: &str) -> Command {
    let mut cmd = Command::new("cmd");
    cmd.args(["/C", command]);
    cmd
}

#[cfg(not(windows))]
fn shell_command(command: &str) -> Command {
    let mut cmd = Command::new("sh");
    cmd.args(["-c", command]);
    cmd
}

/// Verifies that `tool` is installed by running `<tool> --version`.
pub fn check_tool(runner: &dyn ProcessRunner, tool: &str, cwd: &Path) -> Result<()> {
    let outcome = runner
        .run(&format!("{} --version", tool), cwd)
        .map_err(|_| Error::ToolMissing {
            tool: tool.to_string(),
        })?;
    if !outcome.success {
        return Err(Error::ToolMissing {
            tool: tool.to_string(),
        });
    }
    Ok(())
}

/// Runs each precondition of `project` in order, stopping at the first
/// failure.
pub fn run_preconditions(
    runner: &dyn ProcessRunner,
    project: &str,
    preconditions: &[String],
    cwd: &Path,
) -> Result<()> {
    for command in preconditions {
        debug!("Precondition of '{}': {}", project, command);
        let outcome = runner.run(command, cwd)?;
        if !outcome.success {
            return Err(Error::PreconditionFailed {
                project: project.to_string(),
                command: command.clone(),
            });
        }
    }
    Ok(())
}
