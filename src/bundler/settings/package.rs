//! Product identity used in output names.

/// Product metadata shared by both tool stages.
///
/// # Configuration
///
/// ```toml
/// [product]
/// name = "AXBPS"
/// platform = "win64"
/// executable = "AXBPS"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProductSettings {
    /// Product name, used as the installer file name prefix.
    pub name: String,

    /// Platform token embedded in the installer file name.
    ///
    /// Default: "win64"
    pub platform: String,

    /// Canonical name of the frozen executable, without suffix.
    ///
    /// Default: same as `name`
    pub executable: Option<String>,
}

impl Default for ProductSettings {
    fn default() -> Self {
        Self {
            name: "AXBPS".into(),
            platform: "win64".into(),
            executable: None,
        }
    }
}

impl ProductSettings {
    /// Canonical executable name without suffix.
    pub fn executable_name(&self) -> &str {
        self.executable.as_deref().unwrap_or(&self.name)
    }
}
