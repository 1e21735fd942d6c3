//! End-to-end release runs against stub tools.
#![cfg(unix)]

mod common;

use axbps_release::bundler::{Error, ExitPolicy, Pipeline, PipelineState};
use common::{COMPILER_OK, COMPILER_SILENT, FREEZER_BROKEN, FREEZER_OK, Fixture};
use std::fs;

#[tokio::test]
async fn successful_run_leaves_only_deliverables() {
    let fx = Fixture::new(FREEZER_OK, COMPILER_OK);
    let ctx = fx.config().context_builder(&fx.root).build().await.unwrap();
    let root = ctx.root().to_path_buf();

    let mut pipeline = Pipeline::new(ctx);
    let report = pipeline.run().await.unwrap();

    assert_eq!(pipeline.state(), PipelineState::CleanedUp);
    assert_eq!(report.state, PipelineState::CleanedUp);
    assert_eq!(report.version, "3.1.4");
    assert_eq!(report.executable, root.join("AXBPS"));
    assert_eq!(
        report.installer,
        root.join("AXBPS_win64_installer_v3_1_4.exe")
    );
    assert_eq!(report.installer_sha256.len(), 64);
    assert_eq!(report.staged.seeded, vec!["data".to_string()]);

    assert_eq!(fs::read_to_string(&report.executable).unwrap(), "frozen");
    assert!(root.join("_internal").is_dir());
    assert!(!root.join("main").exists());

    for scratch in ["bundle", "dist", "build", "Output"] {
        assert!(!root.join(scratch).exists(), "{scratch} survived the run");
    }
}

#[tokio::test]
async fn templates_are_rendered_with_resolved_values() {
    let fx = Fixture::new(FREEZER_OK, COMPILER_OK);
    let ctx = fx.config().context_builder(&fx.root).build().await.unwrap();
    let root = ctx.root().to_path_buf();

    let report = Pipeline::new(ctx).run().await.unwrap();

    let spec = fs::read_to_string(root.join("_internal/used.spec")).unwrap();
    assert_eq!(
        spec,
        format!(
            "a = Analysis(['{}/main.py'])\nexe = EXE(name='AXBPS', version='3.1.4')",
            root.join("bundle").display()
        )
    );

    // the compiler stub ships the rendered script as the installer
    let script = fs::read_to_string(&report.installer).unwrap();
    assert_eq!(
        script,
        format!(
            "AppVersion=3.1.4\nOutputBaseFilename=AXBPS_win64_installer_v3_1_4\nSource={}/AXBPS",
            root.display()
        )
    );
    assert!(!script.contains("{{"));
}

#[tokio::test]
async fn freezer_failure_keeps_staging_directory() {
    let fx = Fixture::new(FREEZER_BROKEN, COMPILER_OK);
    let ctx = fx.config().context_builder(&fx.root).build().await.unwrap();
    let staging = ctx.staging_dir().to_path_buf();

    let mut pipeline = Pipeline::new(ctx);
    let err = pipeline.run().await.unwrap_err();

    match &err {
        Error::StageFailed { state, .. } => assert_eq!(*state, PipelineState::PackagerConfigured),
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(err.io_kind(), Some(std::io::ErrorKind::NotFound));
    assert_eq!(pipeline.state(), PipelineState::PackagerConfigured);

    assert!(staging.join("main.py").is_file());
    assert!(staging.join("data/calibration.csv").is_file());
    assert!(staging.join("AXBPS.spec").is_file());
}

#[tokio::test]
async fn strict_policy_reports_the_tool_itself() {
    let fx = Fixture::new(FREEZER_BROKEN, COMPILER_OK);
    let ctx = fx
        .config()
        .context_builder(&fx.root)
        .exit_policy(ExitPolicy::FailFast)
        .build()
        .await
        .unwrap();

    let err = Pipeline::new(ctx).run().await.unwrap_err();
    let Error::StageFailed { source, .. } = err else {
        panic!("expected a stage failure");
    };
    assert!(matches!(*source, Error::ToolFailed { .. }));
}

#[tokio::test]
async fn missing_installer_artifact_stops_before_cleanup() {
    let fx = Fixture::new(FREEZER_OK, COMPILER_SILENT);
    let ctx = fx.config().context_builder(&fx.root).build().await.unwrap();
    let root = ctx.root().to_path_buf();

    let mut pipeline = Pipeline::new(ctx);
    pipeline.run().await.unwrap_err();

    assert_eq!(pipeline.state(), PipelineState::InstallerConfigured);
    assert!(root.join("AXBPS").is_file());
    assert!(root.join("bundle").is_dir());
    assert!(!root.join("AXBPS_win64_installer_v3_1_4.exe").exists());
}

#[tokio::test]
async fn rerun_after_failure_keeps_edited_staged_data() {
    let fx = Fixture::new(FREEZER_BROKEN, COMPILER_OK);
    let config = fx.config();
    let ctx = config.context_builder(&fx.root).build().await.unwrap();
    let staged_csv = ctx.staging_dir().join("data/calibration.csv");
    Pipeline::new(ctx).run().await.unwrap_err();

    fs::write(&staged_csv, "gain,2.5\n").unwrap();
    common::write(&fx.path("tools/freeze.sh"), FREEZER_OK);

    let ctx = config.context_builder(&fx.root).build().await.unwrap();
    let report = Pipeline::new(ctx).run().await.unwrap();

    assert_eq!(report.staged.kept, vec!["data".to_string()]);
    assert_eq!(
        fs::read_to_string(fx.data.join("data/calibration.csv")).unwrap(),
        "gain,1.0\n"
    );
}

#[tokio::test]
async fn pipeline_runs_only_once() {
    let fx = Fixture::new(FREEZER_OK, COMPILER_OK);
    let ctx = fx.config().context_builder(&fx.root).build().await.unwrap();

    let mut pipeline = Pipeline::new(ctx);
    pipeline.run().await.unwrap();
    assert!(pipeline.run().await.is_err());
}

#[tokio::test]
async fn staging_over_user_directories_is_refused() {
    let fx = Fixture::new(FREEZER_OK, COMPILER_OK);
    let outside = fx.tmp.path().join("release");

    for staging in [fx.tmp.path().to_path_buf(), fx.data.clone()] {
        let err = fx
            .config()
            .context_builder(&fx.root)
            .output_dir(&outside)
            .staging_dir(&staging)
            .build()
            .await
            .unwrap_err();
        assert!(matches!(err, Error::InvalidConfig(_)), "{err}");
    }

    assert!(fx.path("main.py").is_file());
    assert!(fx.data.join("data/calibration.csv").is_file());
}

#[tokio::test]
async fn installer_scratch_output_stays_out_of_the_tree() {
    let fx = Fixture::new(FREEZER_OK, COMPILER_OK);
    let ctx = fx.config().context_builder(&fx.root).build().await.unwrap();

    Pipeline::new(ctx).run().await.unwrap();

    assert!(!fx.path("Output").exists());
    assert!(!fx.path("bundle/Output").exists());
}
