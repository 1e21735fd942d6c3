//! Release configuration loaded from `release.toml`.

use crate::bundler::{
    BuildContextBuilder, ExitPolicy, InstallerSettings, PackagerSettings, PathManifest,
    ProductSettings,
};
use crate::error::{CliError, ReleaseError, Result};
use std::{
    collections::BTreeMap,
    path::{Path, PathBuf},
};

/// Configuration file looked up in the repository root.
pub const DEFAULT_CONFIG_FILE: &str = "release.toml";

/// Directory layout, relative to the repository root.
#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct PathSettings {
    /// Default: "bundle"
    pub staging_dir: PathBuf,
    /// Default: "data"
    pub data_dir: PathBuf,
    /// Default: "version.txt"
    pub version_file: PathBuf,
    /// Default: "."
    pub output_dir: PathBuf,
}

impl Default for PathSettings {
    fn default() -> Self {
        Self {
            staging_dir: PathBuf::from("bundle"),
            data_dir: PathBuf::from("data"),
            version_file: PathBuf::from("version.txt"),
            output_dir: PathBuf::from("."),
        }
    }
}

/// `[tools]` table.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct ToolPolicySettings {
    /// Abort when a tool exits unsuccessfully.
    pub fail_on_error: bool,
}

/// `[templates]` table.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct TemplateSettings {
    /// Extra placeholders: `NAME = "value"` fills `{{NAME}}`.
    pub variables: BTreeMap<String, String>,
}

/// Complete contents of `release.toml`. Every table is optional.
///
/// ```toml
/// [product]
/// name = "AXBPS"
///
/// [paths]
/// data_dir = "../axbps-data"
///
/// [manifest]
/// overwrite = ["main.py", "gui", "dsp", "plotting", "version.txt"]
/// preserve = ["data"]
///
/// [tools]
/// fail_on_error = true
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct ReleaseConfig {
    pub product: ProductSettings,
    pub paths: PathSettings,
    pub manifest: PathManifest,
    pub packager: PackagerSettings,
    pub installer: InstallerSettings,
    pub tools: ToolPolicySettings,
    pub templates: TemplateSettings,
}

impl ReleaseConfig {
    /// Context builder for a repository at `root`, seeded from this configuration.
    pub fn context_builder(&self, root: &Path) -> BuildContextBuilder {
        BuildContextBuilder::new(root)
            .staging_dir(&self.paths.staging_dir)
            .data_dir(&self.paths.data_dir)
            .output_dir(&self.paths.output_dir)
            .version_file(&self.paths.version_file)
            .product(self.product.clone())
            .packager(self.packager.clone())
            .installer(self.installer.clone())
            .manifest(self.manifest.clone())
            .exit_policy(ExitPolicy::from_fail_on_error(self.tools.fail_on_error))
            .variables(self.templates.variables.clone())
    }
}

/// Reads and parses a release configuration file.
pub fn load_config(path: &Path) -> Result<ReleaseConfig> {
    let text = std::fs::read_to_string(path).map_err(|e| {
        ReleaseError::Cli(CliError::InvalidConfig {
            path: path.to_path_buf(),
            reason: format!("failed to read: {e}"),
        })
    })?;
    parse_config(&text, path)
}

/// Loads `path` if it exists; otherwise falls back to defaults.
///
/// With `required`, a missing file is an error.
pub fn load_or_default(path: &Path, required: bool) -> Result<ReleaseConfig> {
    if path.is_file() || required {
        return load_config(path);
    }
    log::warn!(
        "{} not found; using default release configuration",
        path.display()
    );
    Ok(ReleaseConfig::default())
}

fn parse_config(text: &str, path: &Path) -> Result<ReleaseConfig> {
    toml::from_str(text).map_err(|e| {
        ReleaseError::Cli(CliError::InvalidConfig {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_yields_defaults() {
        let config = parse_config("", Path::new("release.toml")).unwrap();
        assert_eq!(config, ReleaseConfig::default());
        assert_eq!(config.packager.program, "pyinstaller");
        assert_eq!(config.installer.scratch_dir, PathBuf::from("Output"));
    }

    #[test]
    fn partial_tables_keep_other_defaults() {
        let config = parse_config(
            r#"
            [product]
            name = "AXBPS"
            platform = "win32"

            [paths]
            data_dir = "../axbps-data"

            [manifest]
            overwrite = ["main.py", "gui"]
            preserve = ["data"]

            [installer]
            program = "C:/Program Files (x86)/Inno Setup 6/ISCC.exe"

            [tools]
            fail_on_error = true

            [templates.variables]
            ICON = "assets/axbps.ico"
            "#,
            Path::new("release.toml"),
        )
        .unwrap();

        assert_eq!(config.product.platform, "win32");
        assert_eq!(config.paths.data_dir, PathBuf::from("../axbps-data"));
        assert_eq!(config.paths.staging_dir, PathBuf::from("bundle"));
        assert_eq!(config.manifest.preserve, vec!["data".to_string()]);
        assert_eq!(config.installer.quiet_flag, "/Q");
        assert!(config.tools.fail_on_error);
        assert_eq!(config.templates.variables["ICON"], "assets/axbps.ico");
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let err = parse_config("[packager]\nprogramm = \"x\"\n", Path::new("release.toml"))
            .unwrap_err();
        assert!(matches!(err, ReleaseError::Cli(CliError::InvalidConfig { .. })));
    }

    #[test]
    fn missing_optional_file_uses_defaults() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join(DEFAULT_CONFIG_FILE);
        assert_eq!(load_or_default(&path, false).unwrap(), ReleaseConfig::default());
        assert!(load_or_default(&path, true).is_err());
    }

    #[tokio::test]
    async fn builder_carries_exit_policy() {
        let tmp = tempfile::TempDir::new().unwrap();
        tokio::fs::write(tmp.path().join("version.txt"), "1.0.0")
            .await
            .unwrap();
        let mut config = ReleaseConfig::default();
        config.tools.fail_on_error = true;

        let ctx = config.context_builder(tmp.path()).build().await.unwrap();
        assert_eq!(ctx.exit_policy(), ExitPolicy::FailFast);
    }
}
