//! External tool execution.

use crate::bundler::{
    error::{Error, Result},
    settings::ExitPolicy,
};
use std::{
    ffi::OsString,
    path::{Path, PathBuf},
    process::ExitStatus,
};

/// Resolves a configured program name.
///
/// Bare names (`pyinstaller`) are looked up on `PATH`; names with a directory
/// component are taken relative to `root`.
pub fn resolve_program(root: &Path, program: &str) -> PathBuf {
    let path = Path::new(program);
    if path.components().count() > 1 {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            root.join(path)
        }
    } else {
        which::which(program).unwrap_or_else(|_| path.to_path_buf())
    }
}

/// Runs `program` with `args` in `cwd` and waits for it to exit.
///
/// Output is inherited from this process. A non-zero exit is logged and
/// ignored under [`ExitPolicy::Ignore`], or returned as
/// [`Error::ToolFailed`] under [`ExitPolicy::FailFast`].
pub async fn run_tool(
    program: &Path,
    args: &[OsString],
    cwd: &Path,
    policy: ExitPolicy,
) -> Result<ExitStatus> {
    let command = program.display().to_string();
    log::info!(
        "Running {command} {}",
        args.iter()
            .map(|a| a.to_string_lossy())
            .collect::<Vec<_>>()
            .join(" ")
    );

    let status = tokio::process::Command::new(program)
        .args(args)
        .current_dir(cwd)
        .status()
        .await
        .map_err(|error| Error::CommandFailed {
            command: command.clone(),
            error,
        })?;

    if !status.success() {
        match policy {
            ExitPolicy::Ignore => {
                log::warn!("{command} exited with {status}; continuing (exit status is not enforced)");
            }
            ExitPolicy::FailFast => return Err(Error::ToolFailed { command, status }),
        }
    }

    Ok(status)
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn runs_in_requested_directory() {
        let tmp = TempDir::new().unwrap();
        let status = run_tool(
            Path::new("sh"),
            &["-c".into(), "touch ran-here".into()],
            tmp.path(),
            ExitPolicy::FailFast,
        )
        .await
        .unwrap();

        assert!(status.success());
        assert!(tmp.path().join("ran-here").exists());
    }

    #[tokio::test]
    async fn failure_is_ignored_by_default_policy() {
        let tmp = TempDir::new().unwrap();
        let status = run_tool(
            Path::new("sh"),
            &["-c".into(), "exit 3".into()],
            tmp.path(),
            ExitPolicy::Ignore,
        )
        .await
        .unwrap();
        assert_eq!(status.code(), Some(3));
    }

    #[tokio::test]
    async fn failure_aborts_under_fail_fast() {
        let tmp = TempDir::new().unwrap();
        let err = run_tool(
            Path::new("sh"),
            &["-c".into(), "exit 3".into()],
            tmp.path(),
            ExitPolicy::FailFast,
        )
        .await
        .unwrap_err();
        assert!(matches!(err, Error::ToolFailed { .. }));
    }

    #[tokio::test]
    async fn missing_program_cannot_spawn() {
        let tmp = TempDir::new().unwrap();
        let err = run_tool(
            &tmp.path().join("no-such-tool"),
            &[],
            tmp.path(),
            ExitPolicy::Ignore,
        )
        .await
        .unwrap_err();
        assert!(matches!(err, Error::CommandFailed { .. }));
    }

    #[test]
    fn program_with_directory_resolves_against_root() {
        let root = Path::new("/repo");
        assert_eq!(
            resolve_program(root, "tools/fake-freezer.sh"),
            PathBuf::from("/repo/tools/fake-freezer.sh")
        );
        assert_eq!(
            resolve_program(root, "/usr/bin/iscc"),
            PathBuf::from("/usr/bin/iscc")
        );
    }
}
