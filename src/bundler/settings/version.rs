//! Version marker parsing and the installer name derived from it.

use crate::bundler::error::{Error, ErrorExt, Result};
use std::path::Path;

/// Reads the bare version string stored in the version marker file.
///
/// Surrounding whitespace is ignored. Versions that are not valid semver
/// (e.g. "1.2") are accepted with a warning.
pub async fn read_version(path: &Path) -> Result<String> {
    let raw = tokio::fs::read_to_string(path)
        .await
        .fs_context("reading version marker", path)?;
    parse_version(&raw, path)
}

fn parse_version(raw: &str, path: &Path) -> Result<String> {
    let version = raw.trim();
    if version.is_empty() {
        return Err(Error::InvalidVersion {
            path: path.to_path_buf(),
            reason: "file is empty".into(),
        });
    }
    if version.chars().any(char::is_whitespace) {
        return Err(Error::InvalidVersion {
            path: path.to_path_buf(),
            reason: format!("'{version}' contains whitespace"),
        });
    }
    if let Err(e) = semver::Version::parse(version) {
        log::warn!("version '{version}' in {} is not semver: {e}", path.display());
    }
    Ok(version.to_string())
}

/// Installer file name without extension,
/// e.g. `AXBPS_win64_installer_v3_1_4` for version "3.1.4".
pub fn installer_file_name(product: &str, platform: &str, version: &str) -> String {
    format!(
        "{product}_{platform}_installer_v{}",
        version.replace('.', "_")
    )
}
