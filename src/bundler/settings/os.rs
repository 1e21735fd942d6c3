//! Host operating system detection and the path rules that depend on it.

use std::fmt;

/// Operating system the pipeline runs on.
///
/// This is the only environment-sensitive input of a release run: it decides
/// the path separator, the executable suffix and how paths are escaped in the
/// freezer configuration.
#[derive(Clone, Copy, Debug, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HostOs {
    /// Microsoft Windows
    Windows,
    /// Linux and other Unix-likes without special handling
    Linux,
    /// macOS
    #[serde(rename = "macos")]
    MacOs,
}

impl HostOs {
    /// Detects the operating system this binary was compiled for.
    pub fn detect() -> Self {
        if cfg!(target_os = "windows") {
            HostOs::Windows
        } else if cfg!(target_os = "macos") {
            HostOs::MacOs
        } else {
            HostOs::Linux
        }
    }

    /// Path separator used in rendered tool configuration.
    pub fn path_separator(self) -> char {
        match self {
            HostOs::Windows => '\\',
            HostOs::Linux | HostOs::MacOs => '/',
        }
    }

    /// Suffix the freezer appends to executables.
    pub fn executable_suffix(self) -> &'static str {
        match self {
            HostOs::Windows => ".exe",
            HostOs::Linux | HostOs::MacOs => "",
        }
    }

    /// Escapes a value for the freezer configuration format.
    ///
    /// The freezer reads its configuration as source code, where a single
    /// backslash starts an escape sequence, so Windows paths need doubling.
    pub fn escape_for_packager(self, value: &str) -> String {
        match self {
            HostOs::Windows => value.replace('\\', "\\\\"),
            HostOs::Linux | HostOs::MacOs => value.to_string(),
        }
    }

    /// Lowercase name, as accepted in configuration files.
    pub fn as_str(self) -> &'static str {
        match self {
            HostOs::Windows => "windows",
            HostOs::Linux => "linux",
            HostOs::MacOs => "macos",
        }
    }
}

impl fmt::Display for HostOs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn windows_doubles_backslashes_for_packager() {
        assert_eq!(
            HostOs::Windows.escape_for_packager(r"C:\build\bundle"),
            r"C:\\build\\bundle"
        );
        assert_eq!(HostOs::Linux.escape_for_packager("/opt/app"), "/opt/app");
    }

    #[test]
    fn separators_and_suffixes() {
        assert_eq!(HostOs::Windows.path_separator(), '\\');
        assert_eq!(HostOs::MacOs.path_separator(), '/');
        assert_eq!(HostOs::Windows.executable_suffix(), ".exe");
        assert_eq!(HostOs::Linux.executable_suffix(), "");
    }

    #[test]
    fn detect_matches_compile_target() {
        let os = HostOs::detect();
        assert_eq!(os.path_separator(), std::path::MAIN_SEPARATOR);
    }
}
