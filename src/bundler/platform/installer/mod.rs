//! Installer compilation.
//!
//! Compiles the rendered installer script in quiet mode and moves the produced
//! installer to the output directory under its versioned name. The compiler
//! writes its artifact to a scratch directory next to the script.

use super::process;
use crate::bundler::{
    error::{Context, Result},
    settings::BuildContext,
    utils::fs,
};
use std::{
    ffi::OsString,
    path::{Path, PathBuf},
};

/// Compiles `script_path` and returns the path of the relocated installer.
pub async fn compile_installer(ctx: &BuildContext, script_path: &Path) -> Result<PathBuf> {
    let settings = ctx.installer();
    let output_dir = ctx.output_dir();
    log::info!("Compiling installer {}", ctx.installer_name());

    let program = process::resolve_program(ctx.root(), &settings.program);
    let mut args: Vec<OsString> = settings.args.iter().map(OsString::from).collect();
    if !settings.quiet_flag.is_empty() {
        args.push(settings.quiet_flag.clone().into());
    }
    args.push(script_path.as_os_str().to_os_string());
    process::run_tool(&program, &args, output_dir, ctx.exit_policy()).await?;

    fs::delete(script_path).await?;

    let script_dir = script_path.parent().unwrap_or(output_dir);
    let scratch_dir = script_dir.join(&settings.scratch_dir);
    let artifact = scratch_dir.join(settings.artifact_file_name());
    let installer = output_dir.join(ctx.installer_file_name());
    fs::move_path(&artifact, &installer)
        .await
        .context("relocating compiled installer")?;

    fs::delete(&scratch_dir).await?;

    log::info!("✓ Created installer: {}", installer.display());
    Ok(installer)
}
