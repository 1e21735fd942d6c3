//! Builder for constructing a [`BuildContext`].

use super::{
    BuildContext, ExitPolicy, HostOs, InstallerSettings, PackagerSettings, PathManifest,
    ProductSettings, version,
};
use crate::bundler::error::{Error, ErrorExt, Result};
use path_absolutize::Absolutize;
use std::{
    collections::BTreeMap,
    path::{Path, PathBuf},
};

/// Builder for [`BuildContext`].
///
/// Relative directories are resolved against the repository root. Building
/// reads the version marker, so it is the one step of context resolution that
/// touches the filesystem.
///
/// # Examples
///
/// ```no_run
/// use axbps_release::bundler::{BuildContextBuilder, PathManifest};
///
/// # async fn example() -> axbps_release::bundler::Result<()> {
/// let ctx = BuildContextBuilder::new("/work/axbps")
///     .staging_dir("bundle")
///     .data_dir("../axbps-data")
///     .manifest(PathManifest::new(["main.py", "gui"], ["data"]))
///     .build()
///     .await?;
/// println!("{}", ctx.installer_name());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct BuildContextBuilder {
    root: PathBuf,
    staging_dir: PathBuf,
    data_dir: PathBuf,
    output_dir: PathBuf,
    version_file: PathBuf,
    os: Option<HostOs>,
    product: ProductSettings,
    packager: PackagerSettings,
    installer: InstallerSettings,
    manifest: PathManifest,
    exit_policy: ExitPolicy,
    variables: BTreeMap<String, String>,
}

impl BuildContextBuilder {
    /// Creates a builder rooted at the repository `root`.
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
            staging_dir: PathBuf::from("bundle"),
            data_dir: PathBuf::from("data"),
            output_dir: PathBuf::from("."),
            version_file: PathBuf::from("version.txt"),
            os: None,
            product: ProductSettings::default(),
            packager: PackagerSettings::default(),
            installer: InstallerSettings::default(),
            manifest: PathManifest::default(),
            exit_policy: ExitPolicy::default(),
            variables: BTreeMap::new(),
        }
    }

    /// Sets the staging directory.
    ///
    /// Default: "bundle"
    pub fn staging_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.staging_dir = path.as_ref().to_path_buf();
        self
    }

    /// Sets the external data directory.
    ///
    /// Default: "data"
    pub fn data_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.data_dir = path.as_ref().to_path_buf();
        self
    }

    /// Sets the directory receiving the deliverables.
    ///
    /// Default: the repository root
    pub fn output_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.output_dir = path.as_ref().to_path_buf();
        self
    }

    /// Sets the version marker file.
    ///
    /// Default: "version.txt"
    pub fn version_file<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.version_file = path.as_ref().to_path_buf();
        self
    }

    /// Overrides host detection.
    pub fn os(mut self, os: HostOs) -> Self {
        self.os = Some(os);
        self
    }

    /// Sets product settings.
    pub fn product(mut self, product: ProductSettings) -> Self {
        self.product = product;
        self
    }

    /// Sets freezer settings.
    pub fn packager(mut self, packager: PackagerSettings) -> Self {
        self.packager = packager;
        self
    }

    /// Sets installer compiler settings.
    pub fn installer(mut self, installer: InstallerSettings) -> Self {
        self.installer = installer;
        self
    }

    /// Sets the staging manifest.
    pub fn manifest(mut self, manifest: PathManifest) -> Self {
        self.manifest = manifest;
        self
    }

    /// Sets the tool exit policy.
    ///
    /// Default: [`ExitPolicy::Ignore`]
    pub fn exit_policy(mut self, policy: ExitPolicy) -> Self {
        self.exit_policy = policy;
        self
    }

    /// Sets extra template placeholders.
    pub fn variables(mut self, variables: BTreeMap<String, String>) -> Self {
        self.variables = variables;
        self
    }

    /// Resolves paths, reads the version marker and builds the context.
    pub async fn build(self) -> Result<BuildContext> {
        self.manifest.validate()?;
        if self.product.name.is_empty() {
            return Err(Error::InvalidConfig("product name is empty".into()));
        }

        let root = self
            .root
            .absolutize()
            .fs_context("resolving repository root", &self.root)?
            .into_owned();
        let staging_dir = resolve(&root, &self.staging_dir)?;
        let data_dir = resolve(&root, &self.data_dir)?;
        let output_dir = resolve(&root, &self.output_dir)?;
        let version_file = resolve(&root, &self.version_file)?;

        check_staging_dir(&staging_dir, &root, &data_dir, &output_dir, &version_file)?;

        let version = version::read_version(&version_file).await?;
        let installer_name =
            version::installer_file_name(&self.product.name, &self.product.platform, &version);
        let os = self.os.unwrap_or_else(HostOs::detect);

        log::debug!(
            "resolved build context: root={}, staging={}, os={os}, version={version}",
            root.display(),
            staging_dir.display()
        );

        Ok(BuildContext::new(
            root,
            staging_dir,
            data_dir,
            output_dir,
            os,
            version,
            installer_name,
            self.product,
            self.packager,
            self.installer,
            self.manifest,
            self.exit_policy,
            self.variables,
        ))
    }
}

/// The staging directory is deleted after a successful run, so it must not
/// hold or sit inside anything the run reads from or writes to.
fn check_staging_dir(
    staging: &Path,
    root: &Path,
    data_dir: &Path,
    output_dir: &Path,
    version_file: &Path,
) -> Result<()> {
    let clash = if root.starts_with(staging) {
        Some("contains the repository root")
    } else if data_dir.starts_with(staging) {
        Some("contains the data directory")
    } else if staging.starts_with(data_dir) {
        Some("lies inside the data directory")
    } else if output_dir.starts_with(staging) {
        Some("contains the output directory")
    } else if version_file.starts_with(staging) {
        Some("contains the version marker")
    } else {
        None
    };

    match clash {
        Some(reason) => Err(Error::InvalidConfig(format!(
            "staging directory {} {reason}; it is deleted after every successful run",
            staging.display()
        ))),
        None => Ok(()),
    }
}

fn resolve(root: &Path, path: &Path) -> Result<PathBuf> {
    let joined = if path.is_absolute() {
        path.to_path_buf()
    } else {
        root.join(path)
    };
    Ok(joined
        .absolutize()
        .fs_context("resolving path", &joined)?
        .into_owned())
}
