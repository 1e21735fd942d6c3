//! Shared fixture: a small repository with `sh` scripts standing in for the
//! freezer and the installer compiler.

#![allow(dead_code)]

use std::{
    fs,
    path::{Path, PathBuf},
};
use tempfile::TempDir;

/// Freezer stub: builds `dist/AXBPS/{main,_internal/}` plus `build/`, and
/// keeps a copy of the configuration it was given.
pub const FREEZER_OK: &str = r#"#!/bin/sh
set -e
mkdir -p dist/AXBPS/_internal build/AXBPS
printf 'frozen' > dist/AXBPS/main
cp "$1" dist/AXBPS/_internal/used.spec
"#;

/// Freezer stub that fails without producing anything.
pub const FREEZER_BROKEN: &str = "#!/bin/sh\necho 'freezer exploded' >&2\nexit 1\n";

/// Installer compiler stub: expects the quiet flag, then emits the script
/// itself as `Output/<script stem>.exe` next to the script, like iscc does
/// without an `OutputDir` directive.
pub const COMPILER_OK: &str = r#"#!/bin/sh
set -e
[ "$1" = "/Q" ] || exit 2
name=$(basename "$2" .iss)
out="$(dirname "$2")/Output"
mkdir -p "$out"
cp "$2" "$out/$name.exe"
"#;

/// Installer compiler stub that exits cleanly without output.
pub const COMPILER_SILENT: &str = "#!/bin/sh\nexit 0\n";

pub const PACKAGER_TEMPLATE: &str = "
a = Analysis(['{{STAGING_PATH}}/main.py'])
exe = EXE(name='{{EXECUTABLE_NAME}}', version='{{VERSION}}')
";

pub const INSTALLER_TEMPLATE: &str = "
AppVersion={{VERSION}}
OutputBaseFilename={{INSTALLER_NAME}}
Source={{OUTPUT_PATH}}/{{EXECUTABLE_NAME}}
";

pub struct Fixture {
    pub tmp: TempDir,
    pub root: PathBuf,
    pub data: PathBuf,
}

impl Fixture {
    pub fn new(freezer: &str, compiler: &str) -> Self {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path().join("repo");
        let data = tmp.path().join("data");

        write(&root.join("main.py"), "import gui\n");
        write(&root.join("gui/window.py"), "class Window: pass\n");
        write(&root.join("version.txt"), "3.1.4\n");
        write(&root.join("packaging/AXBPS.spec.in"), PACKAGER_TEMPLATE);
        write(&root.join("packaging/installer.iss.in"), INSTALLER_TEMPLATE);
        write(&data.join("data/calibration.csv"), "gain,1.0\n");
        write(&root.join("tools/freeze.sh"), freezer);
        write(&root.join("tools/compile.sh"), compiler);

        write(
            &root.join("release.toml"),
            r#"
[paths]
data_dir = "../data"

[manifest]
overwrite = ["main.py", "gui", "version.txt"]
preserve = ["data"]

[packager]
program = "sh"
args = ["tools/freeze.sh"]

[installer]
program = "sh"
args = ["tools/compile.sh"]
"#,
        );

        Self { tmp, root, data }
    }

    pub fn path(&self, rel: &str) -> PathBuf {
        self.root.join(rel)
    }

    pub fn config(&self) -> axbps_release::metadata::ReleaseConfig {
        axbps_release::metadata::load_config(&self.path("release.toml")).unwrap()
    }
}

pub fn write(path: &Path, contents: &str) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, contents).unwrap();
}
