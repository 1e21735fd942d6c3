//! Error types for release pipeline operations.
//!
//! Every filesystem failure carries the operation and the path it touched so a
//! missing tool output reads as "moving freezer output (dist/AXBPS)" rather
//! than a bare `No such file or directory`.

use super::builder::PipelineState;
use std::{
    fmt::Display,
    io,
    path::{Path, PathBuf},
    process::ExitStatus,
};

/// Result type alias for pipeline operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised by the staging, templating and tool invocation steps.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Free-form error, usually produced by [`bail!`](crate::bail).
    #[error("{0}")]
    GenericError(String),

    /// Filesystem operation failed on a specific path.
    #[error("{context} ({}): {error}", path.display())]
    Fs {
        /// What was being done
        context: String,
        /// Path the operation touched
        path: PathBuf,
        /// Underlying IO error
        #[source]
        error: io::Error,
    },

    /// External tool could not be spawned at all.
    #[error("failed to run `{command}`: {error}")]
    CommandFailed {
        /// Program name
        command: String,
        /// Spawn error
        #[source]
        error: io::Error,
    },

    /// External tool exited unsuccessfully while the fail-fast policy is active.
    #[error("`{command}` exited with {status}")]
    ToolFailed {
        /// Program name
        command: String,
        /// Exit status reported by the OS
        status: ExitStatus,
    },

    /// Release configuration is inconsistent.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Version marker file is empty or unreadable as a version.
    #[error("invalid version in {}: {reason}", path.display())]
    InvalidVersion {
        /// Version marker file
        path: PathBuf,
        /// What was wrong
        reason: String,
    },

    /// Directory traversal failed.
    #[error("directory walk failed: {0}")]
    WalkDir(#[from] walkdir::Error),

    /// Path was outside the directory it was expected under.
    #[error("path prefix error: {0}")]
    StripPrefix(#[from] std::path::StripPrefixError),

    /// A pipeline transition failed; the run stopped after `state`.
    #[error("release pipeline aborted after reaching {state}: {source}")]
    StageFailed {
        /// Last state successfully reached
        state: PipelineState,
        /// Error raised by the failing transition
        #[source]
        source: Box<Error>,
    },

    /// Error with an added description of the enclosing operation.
    #[error("{context}: {source}")]
    Context {
        /// Enclosing operation
        context: String,
        /// Wrapped error
        #[source]
        source: Box<Error>,
    },
}

/// Attach the failing operation and path to IO results.
pub trait ErrorExt<T> {
    /// Convert an IO error into [`Error::Fs`] with the given description.
    fn fs_context(self, context: &str, path: impl AsRef<Path>) -> Result<T>;
}

impl<T> ErrorExt<T> for std::result::Result<T, io::Error> {
    fn fs_context(self, context: &str, path: impl AsRef<Path>) -> Result<T> {
        self.map_err(|error| Error::Fs {
            context: context.to_string(),
            path: path.as_ref().to_path_buf(),
            error,
        })
    }
}

/// Wrap pipeline errors with a description of the enclosing step.
pub trait Context<T> {
    /// Wrap the error with a static description.
    fn context<C: Display>(self, context: C) -> Result<T>;
}

impl<T> Context<T> for Result<T> {
    fn context<C: Display>(self, context: C) -> Result<T> {
        self.map_err(|source| Error::Context {
            context: context.to_string(),
            source: Box::new(source),
        })
    }
}

impl Error {
    /// Io error kind at the root of this error, if any.
    pub fn io_kind(&self) -> Option<io::ErrorKind> {
        match self {
            Error::Fs { error, .. } | Error::CommandFailed { error, .. } => Some(error.kind()),
            Error::StageFailed { source, .. } | Error::Context { source, .. } => source.io_kind(),
            _ => None,
        }
    }
}

/// Return early with a [`Error::GenericError`] built from a format string.
#[macro_export]
macro_rules! bail {
    ($($arg:tt)*) => {
        return Err($crate::bundler::Error::GenericError(format!($($arg)*)))
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fs_context_keeps_path_and_kind() {
        let res: std::result::Result<(), io::Error> =
            Err(io::Error::new(io::ErrorKind::NotFound, "gone"));
        let err = res.fs_context("moving freezer output", "dist/AXBPS").unwrap_err();

        assert_eq!(err.io_kind(), Some(io::ErrorKind::NotFound));
        let msg = err.to_string();
        assert!(msg.contains("moving freezer output"));
        assert!(msg.contains("dist/AXBPS"));
    }

    #[test]
    fn context_wraps_inner_message() {
        let res: Result<()> = Err(Error::GenericError("boom".into()));
        let err = res.context("rendering installer script").unwrap_err();
        assert_eq!(err.to_string(), "rendering installer script: boom");
    }
}
