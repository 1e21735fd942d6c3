//! Command line argument parsing and validation.

use clap::Parser;
use std::path::PathBuf;

/// Release packaging orchestrator
#[derive(Parser, Debug, Clone)]
#[command(
    name = "axbps_release",
    version,
    about = "Stages sources, freezes the application and compiles its installer",
    long_about = "Stages the application sources and data into a clean bundle directory, renders the \
freezer configuration and installer script from templates, runs both tools, and leaves only the \
renamed executable and the versioned installer behind.

Usage:
  axbps_release
  axbps_release --root ../axbps --data-dir ../axbps-data --strict
  axbps_release --check

Exit code 0 = both deliverables exist in the output directory."
)]
pub struct Args {
    /// Repository root holding sources, templates and the version marker
    #[arg(short, long, value_name = "DIR", default_value = ".")]
    pub root: PathBuf,

    /// Release configuration file (default: <ROOT>/release.toml)
    #[arg(short, long, value_name = "FILE", env = "AXBPS_RELEASE_CONFIG")]
    pub config: Option<PathBuf>,

    /// External data directory for preserve-if-absent entries
    #[arg(long, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    /// Staging (bundle) directory
    #[arg(long, value_name = "DIR")]
    pub staging_dir: Option<PathBuf>,

    /// Directory receiving the deliverables
    #[arg(short, long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Abort when a tool exits with a non-zero status
    #[arg(long)]
    pub strict: bool,

    /// Resolve the build context and check tools without running anything
    #[arg(long)]
    pub check: bool,

    /// Print the result as JSON
    #[arg(long)]
    pub json: bool,

    /// Verbose output (debug logging)
    #[arg(short, long)]
    pub verbose: bool,

    /// Only print errors
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}

impl Args {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate arguments for consistency
    pub fn validate(&self) -> Result<(), String> {
        if self.root.as_os_str().is_empty() {
            return Err("Root cannot be empty".to_string());
        }
        if !self.root.is_dir() {
            return Err(format!(
                "Root {} is not a directory",
                self.root.display()
            ));
        }
        Ok(())
    }

    /// Configuration file to load and whether it was given explicitly.
    pub fn config_path(&self) -> (PathBuf, bool) {
        match &self.config {
            Some(path) => (path.clone(), true),
            None => (self.root.join(crate::metadata::DEFAULT_CONFIG_FILE), false),
        }
    }

    /// Log filter implied by the verbosity flags.
    pub fn log_filter(&self) -> &'static str {
        if self.verbose {
            "debug"
        } else if self.quiet {
            "error"
        } else {
            "info"
        }
    }
}
