//! Release pipeline driver.
//!
//! This module provides the [`Pipeline`] that sequences staging, templating,
//! both tool invocations and the final cleanup.

use super::{checksum::calculate_sha256, tool_detection::check_tools};
use crate::bundler::{
    BuildContext, Error, Result,
    platform::{freezer, installer},
    stage::{self, StageReport},
    template,
    utils::fs,
};
use std::{fmt, path::PathBuf};

/// Progress of a release run.
///
/// Transitions are strictly linear and happen at most once each:
///
/// ```text
/// Init -> Staged -> PackagerConfigured -> Packaged
///      -> InstallerConfigured -> Installed -> CleanedUp
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, serde::Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum PipelineState {
    /// Nothing done yet.
    Init,
    /// Sources and data are in the staging directory.
    Staged,
    /// Freezer configuration rendered.
    PackagerConfigured,
    /// Executable frozen, renamed and relocated.
    Packaged,
    /// Installer script rendered.
    InstallerConfigured,
    /// Installer compiled and relocated.
    Installed,
    /// Staging directory removed. Terminal.
    CleanedUp,
}

impl PipelineState {
    /// Following state, `None` once terminal.
    pub fn next(self) -> Option<Self> {
        use PipelineState::*;
        match self {
            Init => Some(Staged),
            Staged => Some(PackagerConfigured),
            PackagerConfigured => Some(Packaged),
            Packaged => Some(InstallerConfigured),
            InstallerConfigured => Some(Installed),
            Installed => Some(CleanedUp),
            CleanedUp => None,
        }
    }

    /// Name used in logs and error messages.
    pub fn as_str(self) -> &'static str {
        match self {
            PipelineState::Init => "init",
            PipelineState::Staged => "staged",
            PipelineState::PackagerConfigured => "packager-configured",
            PipelineState::Packaged => "packaged",
            PipelineState::InstallerConfigured => "installer-configured",
            PipelineState::Installed => "installed",
            PipelineState::CleanedUp => "cleaned-up",
        }
    }
}

impl fmt::Display for PipelineState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of a successful release run.
#[derive(Debug, Clone, serde::Serialize)]
pub struct ReleaseReport {
    /// Always [`PipelineState::CleanedUp`] for a returned report.
    pub state: PipelineState,
    /// Released version.
    pub version: String,
    /// What the collector staged.
    pub staged: StageReport,
    /// Renamed standalone executable.
    pub executable: PathBuf,
    /// Versioned installer.
    pub installer: PathBuf,
    /// SHA-256 of the installer.
    pub installer_sha256: String,
}

/// Release pipeline for one [`BuildContext`].
///
/// The first failing transition aborts the run. Nothing is rolled back: the
/// staging directory and any tool scratch output stay on disk for
/// inspection, and the next run starts again from [`PipelineState::Init`].
///
/// # Examples
///
/// ```no_run
/// use axbps_release::bundler::{BuildContextBuilder, Pipeline};
///
/// # async fn example() -> axbps_release::bundler::Result<()> {
/// let ctx = BuildContextBuilder::new(".").build().await?;
/// let report = Pipeline::new(ctx).run().await?;
/// println!("installer: {}", report.installer.display());
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct Pipeline {
    ctx: BuildContext,
    state: PipelineState,
}

impl Pipeline {
    /// Creates a pipeline in the [`PipelineState::Init`] state.
    pub fn new(ctx: BuildContext) -> Self {
        Self {
            ctx,
            state: PipelineState::Init,
        }
    }

    /// Current state.
    pub fn state(&self) -> PipelineState {
        self.state
    }

    /// Context the pipeline runs with.
    pub fn context(&self) -> &BuildContext {
        &self.ctx
    }

    /// Runs every transition in order.
    pub async fn run(&mut self) -> Result<ReleaseReport> {
        if self.state != PipelineState::Init {
            crate::bail!("pipeline already ran (state: {}); start a new run", self.state);
        }

        log::info!(
            "Releasing {} {} ({})",
            self.ctx.product().name,
            self.ctx.version(),
            self.ctx.os()
        );
        check_tools(&self.ctx);

        let staged = stage::collect(&self.ctx).await;
        let staged = self.advance(staged)?;

        let rendered = template::render_to_file(
            &self.ctx.root().join(&self.ctx.packager().template),
            template::packager_resolutions(&self.ctx),
            &self.ctx.packager_config_path(),
        )
        .await;
        let packager_config = self.advance(rendered)?;

        let frozen = freezer::bundle_executable(&self.ctx, &packager_config).await;
        let executable = self.advance(frozen)?;

        let rendered = template::render_to_file(
            &self.ctx.root().join(&self.ctx.installer().template),
            template::installer_resolutions(&self.ctx),
            &self.ctx.installer_script_path(),
        )
        .await;
        let installer_script = self.advance(rendered)?;

        let compiled = compile_and_hash(&self.ctx, &installer_script).await;
        let (installer, installer_sha256) = self.advance(compiled)?;

        let cleaned = fs::delete(self.ctx.staging_dir()).await;
        self.advance(cleaned)?;

        log::info!("Release {} complete", self.ctx.version());
        Ok(ReleaseReport {
            state: self.state,
            version: self.ctx.version().to_string(),
            staged,
            executable,
            installer,
            installer_sha256,
        })
    }

    /// Moves to the next state if `result` succeeded, otherwise wraps the
    /// error with the state the run stopped in.
    fn advance<T>(&mut self, result: Result<T>) -> Result<T> {
        match result {
            Ok(value) => {
                if let Some(next) = self.state.next() {
                    log::debug!("pipeline {} -> {next}", self.state);
                    self.state = next;
                }
                Ok(value)
            }
            Err(source) => {
                log::error!("release stopped after {}: {source}", self.state);
                Err(Error::StageFailed {
                    state: self.state,
                    source: Box::new(source),
                })
            }
        }
    }
}

async fn compile_and_hash(
    ctx: &BuildContext,
    script: &std::path::Path,
) -> Result<(PathBuf, String)> {
    let installer = installer::compile_installer(ctx, script).await?;
    let checksum = calculate_sha256(&installer).await?;
    log::info!("SHA256 {checksum}  {}", ctx.installer_file_name());
    Ok((installer, checksum))
}
