//! Source tree collection into the staging directory.

use crate::bundler::{
    error::Result,
    settings::{BuildContext, CopyPolicy, PathManifest},
    utils::fs,
};
use std::path::Path;

/// What a collection pass did, entry by entry.
#[derive(Debug, Default, Clone, PartialEq, Eq, serde::Serialize)]
pub struct StageReport {
    /// Overwrite entries refreshed from the repository.
    pub refreshed: Vec<String>,
    /// Preserve entries copied because nothing was staged yet.
    pub seeded: Vec<String>,
    /// Preserve entries left untouched because they were already staged.
    pub kept: Vec<String>,
}

/// Stages the context's manifest into its staging directory.
pub async fn collect(ctx: &BuildContext) -> Result<StageReport> {
    collect_manifest(ctx.root(), ctx.staging_dir(), ctx.data_dir(), ctx.manifest()).await
}

/// Stages `manifest` into `staging`.
///
/// Overwrite entries come from `root` and always replace the staged copy.
/// Preserve entries come from `data_dir` and are only copied when absent, so
/// staged data that was edited locally is never clobbered.
pub async fn collect_manifest(
    root: &Path,
    staging: &Path,
    data_dir: &Path,
    manifest: &PathManifest,
) -> Result<StageReport> {
    fs::create_dir_all(staging).await?;

    let mut report = StageReport::default();
    for (entry, policy) in manifest.entries() {
        let dest = staging.join(entry);
        match policy {
            CopyPolicy::Overwrite => {
                let source = root.join(entry);
                log::debug!("staging {} -> {}", source.display(), dest.display());
                fs::delete(&dest).await?;
                fs::copy(&source, &dest).await?;
                report.refreshed.push(entry.to_string());
            }
            CopyPolicy::PreserveExisting => {
                if fs::path_exists(&dest).await {
                    log::debug!("keeping staged {}", dest.display());
                    report.kept.push(entry.to_string());
                    continue;
                }
                let source = data_dir.join(entry);
                log::debug!("seeding {} -> {}", source.display(), dest.display());
                fs::copy(&source, &dest).await?;
                report.seeded.push(entry.to_string());
            }
        }
    }

    log::info!(
        "Staged {} source entries into {} ({} data entries seeded, {} kept)",
        report.refreshed.len(),
        staging.display(),
        report.seeded.len(),
        report.kept.len()
    );
    Ok(report)
}
