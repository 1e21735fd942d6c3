//! The resolved parameter set of one release run.

use super::{ExitPolicy, HostOs, InstallerSettings, PackagerSettings, PathManifest, ProductSettings};
use std::{
    collections::BTreeMap,
    path::{Path, PathBuf},
};

/// Resolved, read-only parameters of one release run.
///
/// Constructed once by [`BuildContextBuilder`](super::BuildContextBuilder) and
/// passed by reference to every stage. All paths are absolute. External tools
/// run with [`output_dir`](Self::output_dir) as their working directory; the
/// process's own current directory is never changed.
#[derive(Clone, Debug, serde::Serialize)]
pub struct BuildContext {
    /// Repository root holding the sources and templates.
    root: PathBuf,

    /// Bundle directory the collector stages into.
    staging_dir: PathBuf,

    /// External data directory for preserve-if-absent entries.
    data_dir: PathBuf,

    /// Directory receiving the deliverables; tools run here.
    output_dir: PathBuf,

    /// Host operating system.
    os: HostOs,

    /// Version string read from the version marker.
    version: String,

    /// Installer file name without extension.
    installer_name: String,

    product: ProductSettings,
    packager: PackagerSettings,
    installer: InstallerSettings,
    manifest: PathManifest,
    exit_policy: ExitPolicy,

    /// Extra template placeholders from configuration.
    variables: BTreeMap<String, String>,
}

impl BuildContext {
    /// Repository root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Staging (bundle) directory.
    pub fn staging_dir(&self) -> &Path {
        &self.staging_dir
    }

    /// External data directory.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Directory receiving the deliverables.
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Host operating system.
    pub fn os(&self) -> HostOs {
        self.os
    }

    /// Path separator of the host.
    pub fn path_separator(&self) -> char {
        self.os.path_separator()
    }

    /// Application version.
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Installer file name without extension.
    pub fn installer_name(&self) -> &str {
        &self.installer_name
    }

    /// Installer file name with extension.
    pub fn installer_file_name(&self) -> String {
        format!("{}.{}", self.installer_name, self.installer.extension)
    }

    /// Canonical executable file name, with the host's suffix.
    pub fn executable_file_name(&self) -> String {
        format!(
            "{}{}",
            self.product.executable_name(),
            self.os.executable_suffix()
        )
    }

    /// Executable file name the freezer produces.
    pub fn default_executable_file_name(&self) -> String {
        format!(
            "{}{}",
            self.packager.default_executable,
            self.os.executable_suffix()
        )
    }

    /// Where the rendered freezer configuration is written.
    pub fn packager_config_path(&self) -> PathBuf {
        self.staging_dir.join(&self.packager.config_name)
    }

    /// Where the rendered installer script is written.
    pub fn installer_script_path(&self) -> PathBuf {
        self.staging_dir.join(&self.installer.script_name)
    }

    /// Product settings.
    pub fn product(&self) -> &ProductSettings {
        &self.product
    }

    /// Freezer settings.
    pub fn packager(&self) -> &PackagerSettings {
        &self.packager
    }

    /// Installer compiler settings.
    pub fn installer(&self) -> &InstallerSettings {
        &self.installer
    }

    /// Staging manifest.
    pub fn manifest(&self) -> &PathManifest {
        &self.manifest
    }

    /// Exit status handling for both tools.
    pub fn exit_policy(&self) -> ExitPolicy {
        self.exit_policy
    }

    /// Extra template placeholders.
    pub fn variables(&self) -> &BTreeMap<String, String> {
        &self.variables
    }

    #[allow(clippy::too_many_arguments)]
    pub(super) fn new(
        root: PathBuf,
        staging_dir: PathBuf,
        data_dir: PathBuf,
        output_dir: PathBuf,
        os: HostOs,
        version: String,
        installer_name: String,
        product: ProductSettings,
        packager: PackagerSettings,
        installer: InstallerSettings,
        manifest: PathManifest,
        exit_policy: ExitPolicy,
        variables: BTreeMap<String, String>,
    ) -> Self {
        Self {
            root,
            staging_dir,
            data_dir,
            output_dir,
            os,
            version,
            installer_name,
            product,
            packager,
            installer,
            manifest,
            exit_policy,
            variables,
        }
    }
}
