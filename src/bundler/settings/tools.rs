//! External tool settings: the freezer and the installer compiler.

use std::path::PathBuf;

/// What happens when an external tool exits unsuccessfully.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize)]
pub enum ExitPolicy {
    /// Log a warning and continue; a broken tool then shows up as a missing
    /// output in the following step.
    #[default]
    Ignore,
    /// Abort the run with [`Error::ToolFailed`](crate::bundler::Error::ToolFailed).
    FailFast,
}

impl ExitPolicy {
    /// Policy matching the `tools.fail_on_error` switch.
    pub fn from_fail_on_error(fail_on_error: bool) -> Self {
        if fail_on_error {
            ExitPolicy::FailFast
        } else {
            ExitPolicy::Ignore
        }
    }
}

/// Freezer configuration.
///
/// # Configuration
///
/// ```toml
/// [packager]
/// program = "pyinstaller"
/// template = "packaging/AXBPS.spec.in"
/// config_name = "AXBPS.spec"
/// default_executable = "main"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct PackagerSettings {
    /// Program to run.
    ///
    /// Default: "pyinstaller"
    pub program: String,

    /// Arguments placed before the configuration path.
    ///
    /// Default: Empty
    pub args: Vec<String>,

    /// Template of the freezer configuration, relative to the repository root.
    pub template: PathBuf,

    /// File name of the rendered configuration inside the staging directory.
    pub config_name: String,

    /// Scratch root holding the frozen tree, relative to the output directory.
    ///
    /// Default: "dist"
    pub dist_dir: PathBuf,

    /// Scratch build root, relative to the output directory.
    ///
    /// Default: "build"
    pub build_dir: PathBuf,

    /// Executable name the freezer produces, without suffix.
    ///
    /// Default: "main"
    pub default_executable: String,
}

impl Default for PackagerSettings {
    fn default() -> Self {
        Self {
            program: "pyinstaller".into(),
            args: Vec::new(),
            template: PathBuf::from("packaging/AXBPS.spec.in"),
            config_name: "AXBPS.spec".into(),
            dist_dir: PathBuf::from("dist"),
            build_dir: PathBuf::from("build"),
            default_executable: "main".into(),
        }
    }
}

/// Installer compiler configuration.
///
/// # Configuration
///
/// ```toml
/// [installer]
/// program = "iscc"
/// quiet_flag = "/Q"
/// template = "packaging/installer.iss.in"
/// script_name = "installer.iss"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct InstallerSettings {
    /// Program to run.
    ///
    /// Default: "iscc"
    pub program: String,

    /// Arguments placed before the quiet flag.
    ///
    /// Default: Empty
    pub args: Vec<String>,

    /// Flag selecting quiet mode. An empty string passes no flag.
    ///
    /// Default: "/Q"
    pub quiet_flag: String,

    /// Template of the installer script, relative to the repository root.
    pub template: PathBuf,

    /// File name of the rendered script inside the staging directory.
    pub script_name: String,

    /// Directory the compiler writes its artifact to, relative to the directory
    /// holding the rendered script.
    ///
    /// Default: "Output"
    pub scratch_dir: PathBuf,

    /// Extension of the produced installer.
    ///
    /// Default: "exe"
    pub extension: String,
}

impl Default for InstallerSettings {
    fn default() -> Self {
        Self {
            program: "iscc".into(),
            args: Vec::new(),
            quiet_flag: "/Q".into(),
            template: PathBuf::from("packaging/installer.iss.in"),
            script_name: "installer.iss".into(),
            scratch_dir: PathBuf::from("Output"),
            extension: "exe".into(),
        }
    }
}

impl InstallerSettings {
    /// Name the compiler gives its artifact: the script stem plus extension.
    pub fn artifact_file_name(&self) -> String {
        let stem = std::path::Path::new(&self.script_name)
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.script_name.clone());
        format!("{stem}.{}", self.extension)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn artifact_is_named_after_script() {
        let settings = InstallerSettings::default();
        assert_eq!(settings.artifact_file_name(), "installer.exe");
    }

    #[test]
    fn fail_on_error_maps_to_policy() {
        assert_eq!(ExitPolicy::from_fail_on_error(false), ExitPolicy::Ignore);
        assert_eq!(ExitPolicy::from_fail_on_error(true), ExitPolicy::FailFast);
    }
}
