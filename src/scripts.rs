//! Named scripts declared in `embuild.yaml` under `scripts`.
//!
//! `embuild run <name> [args...]` looks the template up, appends the extra
//! arguments (each single-quoted for the shell) and runs the result in the
//! project root.

use std::path::Path;

use log::info;

use crate::descriptor::ProjectDescriptor;
use crate::error::{Error, Result};
use crate::process::ProcessRunner;

/// Quotes `arg` for a POSIX shell.
pub fn shell_quote(arg: &str) -> String {
    if !arg.is_empty()
        && arg
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "-_./=:,+@%".contains(c))
    {
        return arg.to_string();
    }
    format!("'{}'", arg.replace('\'', r"'\''"))
}

/// Expands the named script with `args` appended.
pub fn script_command(descriptor: &ProjectDescriptor, name: &str, args: &[String]) -> Result<String> {
    let template = descriptor.script(name).ok_or_else(|| Error::ScriptNotFound {
        name: name.to_string(),
        available: descriptor.scripts.keys().cloned().collect(),
    })?;

    let mut command = template.trim().to_string();
    for arg in args {
        command.push(' ');
        command.push_str(&shell_quote(arg));
    }
    Ok(command)
}

/// Runs the named script in `project_root`.
pub fn run_script(
    project_root: &Path,
    descriptor: &ProjectDescriptor,
    name: &str,
    args: &[String],
    runner: &dyn ProcessRunner,
) -> Result<()> {
    let command = script_command(descriptor, name, args)?;
    info!("Running script '{}': {}", name, command);

    let outcome = runner.run(&command, project_root)?;
    if !outcome.success {
        return Err(Error::ScriptFailed {
            name: name.to_string(),
            command,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::process::mock::MockRunner;

    fn descriptor() -> ProjectDescriptor {
        let mut descriptor = ProjectDescriptor::new("app");
        descriptor
            .scripts
            .insert("build".to_string(), "ninja -C build".to_string());
        descriptor
            .scripts
            .insert("flash".to_string(), "openocd -f board.cfg".to_string());
        descriptor
    }

    #[test]
    fn test_shell_quote() {
        assert_eq!(shell_quote("plain-arg"), "plain-arg");
        assert_eq!(shell_quote("two words"), "'two words'");
        assert_eq!(shell_quote("it's"), r"'it'\''s'");
        assert_eq!(shell_quote(""), "''");
    }

    #[test]
    fn test_script_command_appends_args() {
        let command = script_command(
            &descriptor(),
            "build",
            &["-j4".to_string(), "all targets".to_string()],
        )
        .unwrap();
        assert_eq!(command, "ninja -C build -j4 'all targets'");
    }

    #[test]
    fn test_script_not_found_lists_available() {
        let err = script_command(&descriptor(), "test", &[]).unwrap_err();
        match err {
            Error::ScriptNotFound { name, available } => {
                assert_eq!(name, "test");
                assert_eq!(available, vec!["build", "flash"]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_run_script_in_project_root() {
        let runner = MockRunner::new();
        run_script(Path::new("/work/app"), &descriptor(), "flash", &[], &runner).unwrap();

        let calls = runner.calls.lock().unwrap().clone();
        assert_eq!(
            calls,
            vec![("openocd -f board.cfg".to_string(), Path::new("/work/app").to_path_buf())]
        );
    }

    #[test]
    fn test_run_script_failure() {
        let runner = MockRunner::failing_on("ninja -C build");
        let err = run_script(Path::new("."), &descriptor(), "build", &[], &runner).unwrap_err();
        assert!(matches!(err, Error::ScriptFailed { ref name, .. } if name == "build"));
    }
}
