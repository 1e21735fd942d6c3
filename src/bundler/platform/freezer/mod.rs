//! Application freezing.
//!
//! Runs the freezer on the rendered configuration, lifts the frozen tree out
//! of its scratch root into the output directory and gives the executable its
//! canonical name.
//!
//! # Process
//!
//! 1. Run the freezer with the configuration file as its only argument
//! 2. Move every item of the first directory under `dist` up one level
//! 3. Delete `dist`, `build` and the rendered configuration
//! 4. Rename the default executable to the canonical executable name

use super::process;
use crate::bundler::{
    error::{Context, Error, ErrorExt, Result},
    settings::BuildContext,
    utils::fs::{self, EntryKind},
};
use std::{
    ffi::OsString,
    path::{Path, PathBuf},
};

/// Freezes the application described by `config_path`.
///
/// Returns the path of the renamed executable.
pub async fn bundle_executable(ctx: &BuildContext, config_path: &Path) -> Result<PathBuf> {
    let settings = ctx.packager();
    let output_dir = ctx.output_dir();
    log::info!("Freezing {} {}", ctx.product().name, ctx.version());

    let program = process::resolve_program(ctx.root(), &settings.program);
    let mut args: Vec<OsString> = settings.args.iter().map(OsString::from).collect();
    args.push(config_path.as_os_str().to_os_string());
    process::run_tool(&program, &args, output_dir, ctx.exit_policy()).await?;

    let dist_root = output_dir.join(&settings.dist_dir);
    let frozen_tree = first_entry(&dist_root)
        .await
        .context("locating freezer output")?;
    relocate_children(&frozen_tree, output_dir).await?;

    fs::delete(&dist_root).await?;
    fs::delete(&output_dir.join(&settings.build_dir)).await?;
    fs::delete(config_path).await?;

    let produced = output_dir.join(ctx.default_executable_file_name());
    let executable = output_dir.join(ctx.executable_file_name());
    if produced != executable {
        fs::move_path(&produced, &executable)
            .await
            .context("renaming frozen executable")?;
    }

    log::info!("✓ Frozen executable: {}", executable.display());
    Ok(executable)
}

/// First directory (by name) directly under `dir`. Stray files such as
/// `.DS_Store` are skipped.
async fn first_entry(dir: &Path) -> Result<PathBuf> {
    let mut names = list_dir(dir).await?;
    names.sort();
    for name in names {
        if fs::classify(&name).await? == EntryKind::Directory {
            return Ok(name);
        }
    }
    Err(Error::GenericError(format!(
        "{} holds no directory; the freezer produced no output",
        dir.display()
    )))
}

/// Moves every item directly under `from` into `to`, replacing same-named items.
async fn relocate_children(from: &Path, to: &Path) -> Result<()> {
    for item in list_dir(from).await? {
        let Some(name) = item.file_name() else {
            continue;
        };
        let dest = to.join(name);
        log::debug!("relocating {} -> {}", item.display(), dest.display());
        fs::move_path(&item, &dest).await?;
    }
    Ok(())
}

async fn list_dir(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut entries = tokio::fs::read_dir(dir)
        .await
        .fs_context("reading tool output directory", dir)?;
    let mut paths = Vec::new();
    while let Some(entry) = entries
        .next_entry()
        .await
        .fs_context("reading tool output directory", dir)?
    {
        paths.push(entry.path());
    }
    Ok(paths)
}
