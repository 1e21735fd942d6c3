#![cfg(unix)]

mod common;

use assert_cmd::Command;
use common::{COMPILER_OK, FREEZER_OK, Fixture};
use predicates::prelude::*;

fn release() -> Command {
    let mut cmd = Command::cargo_bin("axbps_release").unwrap();
    cmd.env_remove("AXBPS_RELEASE_CONFIG").env("RUST_LOG", "warn");
    cmd
}

#[test]
fn check_reports_resolved_names_without_running() {
    let fx = Fixture::new(FREEZER_OK, COMPILER_OK);

    release()
        .arg("--root")
        .arg(&fx.root)
        .arg("--check")
        .assert()
        .success()
        .stdout(predicate::str::contains("AXBPS_win64_installer_v3_1_4.exe"))
        .stdout(predicate::str::contains("3.1.4"));

    assert!(!fx.path("bundle").exists());
    assert!(!fx.path("AXBPS").exists());
}

#[test]
fn check_json_lists_tools() {
    let fx = Fixture::new(FREEZER_OK, COMPILER_OK);

    let out = release()
        .arg("--root")
        .arg(&fx.root)
        .args(["--check", "--json"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
    assert_eq!(value["tools"].as_array().unwrap().len(), 2);
    assert_eq!(value["context"]["version"], "3.1.4");
}

#[test]
fn missing_version_file_fails_with_hint() {
    let fx = Fixture::new(FREEZER_OK, COMPILER_OK);
    std::fs::remove_file(fx.path("version.txt")).unwrap();

    release()
        .arg("--root")
        .arg(&fx.root)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error:"))
        .stderr(predicate::str::contains("version.txt"));
}

#[test]
fn explicit_config_must_exist() {
    let fx = Fixture::new(FREEZER_OK, COMPILER_OK);

    release()
        .arg("--root")
        .arg(&fx.root)
        .arg("--config")
        .arg(fx.path("missing.toml"))
        .arg("--check")
        .assert()
        .failure()
        .stderr(predicate::str::contains("missing.toml"));
}

#[test]
fn quiet_and_verbose_conflict() {
    release().args(["--quiet", "--verbose"]).assert().failure();
}

#[test]
fn full_run_prints_json_report() {
    let fx = Fixture::new(FREEZER_OK, COMPILER_OK);

    release()
        .arg("--root")
        .arg(&fx.root)
        .arg("--json")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"installer_sha256\""))
        .stdout(predicate::str::contains("\"cleaned-up\""));

    assert!(fx.path("AXBPS_win64_installer_v3_1_4.exe").is_file());
    assert!(!fx.path("bundle").exists());
}
