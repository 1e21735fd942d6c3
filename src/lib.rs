//! Release packaging orchestrator library.
//!
//! Drives one release of the AXBPS application:
//! - stages sources and data into a clean bundle directory
//! - renders the freezer configuration and installer script from templates
//! - runs the freezer and the installer compiler
//! - relocates the executable and the versioned installer, then cleans up
//!
//! It can be used both as a CLI tool and as a library dependency.

pub mod bundler;
pub mod cli;
pub mod error;
pub mod metadata;

// Re-export commonly used types
pub use error::{CliError, ReleaseError, Result};
