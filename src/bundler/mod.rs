//! Release packaging pipeline.
//!
//! # Overview
//!
//! A release run:
//! 1. Resolves a [`BuildContext`] (paths, host OS, version, installer name)
//! 2. Copies the [`PathManifest`] into the staging directory
//! 3. Renders the freezer configuration and runs the freezer
//! 4. Renders the installer script and runs the installer compiler
//! 5. Removes the staging directory
//!
//! # Example
//!
//! ```no_run
//! use axbps_release::bundler::{BuildContextBuilder, PathManifest, Pipeline};
//!
//! # async fn example() -> axbps_release::bundler::Result<()> {
//! let ctx = BuildContextBuilder::new("/work/axbps")
//!     .manifest(PathManifest::new(["main.py", "gui", "plotting"], ["data"]))
//!     .build()
//!     .await?;
//!
//! let report = Pipeline::new(ctx).run().await?;
//! println!("{} ({})", report.installer.display(), report.installer_sha256);
//! # Ok(())
//! # }
//! ```

pub mod builder;
pub mod error;
pub mod platform;
pub mod settings;
pub mod stage;
pub mod template;
pub mod utils;

pub use builder::{Pipeline, PipelineState, ReleaseReport};
pub use error::{Context, Error, ErrorExt, Result};
pub use settings::{
    BuildContext, BuildContextBuilder, CopyPolicy, ExitPolicy, HostOs, InstallerSettings,
    PackagerSettings, PathManifest, ProductSettings,
};
