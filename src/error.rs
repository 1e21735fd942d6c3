//! Top-level error types for the release command.
//!
//! Pipeline failures are [`crate::bundler::Error`]; this module adds the
//! command-line and configuration layer around them.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for command-level operations
pub type Result<T> = std::result::Result<T, ReleaseError>;

/// Main error type for the release command
#[derive(Error, Debug)]
pub enum ReleaseError {
    /// CLI argument and configuration errors
    #[error("CLI error: {0}")]
    Cli(#[from] CliError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Release pipeline errors
    #[error(transparent)]
    Bundler(#[from] crate::bundler::Error),
}

/// CLI-specific errors
#[derive(Error, Debug)]
pub enum CliError {
    /// Invalid command line arguments
    #[error("Invalid arguments: {reason}")]
    InvalidArguments {
        /// Reason for the error
        reason: String,
    },

    /// Release configuration could not be read or parsed
    #[error("Invalid release configuration {}: {reason}", path.display())]
    InvalidConfig {
        /// Configuration file
        path: PathBuf,
        /// Reason for the error
        reason: String,
    },
}

impl ReleaseError {
    /// Hints printed under the error message.
    pub fn recovery_suggestions(&self) -> Vec<String> {
        use crate::bundler::Error as PipelineError;

        match self {
            ReleaseError::Bundler(PipelineError::StageFailed { state, .. }) => vec![
                format!("The run stopped after '{state}'; staged files were left in place for inspection"),
                "Re-run from the start once the cause is fixed".to_string(),
            ],
            ReleaseError::Bundler(PipelineError::CommandFailed { command, .. }) => {
                vec![format!("Check that `{command}` is installed and on PATH")]
            }
            ReleaseError::Cli(CliError::InvalidConfig { .. }) => {
                vec!["Check release.toml against the documented tables".to_string()]
            }
            _ => vec!["Check the error message above for specific details".to_string()],
        }
    }
}
