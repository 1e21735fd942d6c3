//! Filesystem staging primitives.
//!
//! `copy`, `move_path` and `delete` are total: each one either completes or
//! returns the underlying error, and all of them tolerate a destination that
//! already exists. Sources are classified before any copy strategy is chosen.

use crate::bundler::error::{ErrorExt, Result};
use std::{
    io,
    path::{MAIN_SEPARATOR, Path, PathBuf},
};
use tokio::fs;

/// How a copy source is handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    /// Regular file (symlinks to files are followed).
    File,
    /// Directory, copied recursively.
    Directory,
    /// Entry whose metadata is permission-restricted; copied as a directory
    /// through a trailing-separator path.
    Restricted,
}

/// Classifies `path` for copying.
///
/// Some platforms report a permission error for directory-like entries
/// instead of describing them; those are classified as [`EntryKind::Restricted`].
pub async fn classify(path: &Path) -> Result<EntryKind> {
    match fs::metadata(path).await {
        Ok(meta) if meta.is_dir() => Ok(EntryKind::Directory),
        Ok(_) => Ok(EntryKind::File),
        Err(e) if e.kind() == io::ErrorKind::PermissionDenied => Ok(EntryKind::Restricted),
        Err(e) => Err(e).fs_context("inspecting copy source", path),
    }
}

/// Returns true if something (including a dangling symlink) exists at `path`.
pub async fn path_exists(path: &Path) -> bool {
    fs::symlink_metadata(path).await.is_ok()
}

/// Appends the platform separator, e.g. `data/raw` -> `data/raw/`.
pub fn with_trailing_separator(path: &Path) -> PathBuf {
    let mut raw = path.as_os_str().to_os_string();
    if !raw.to_string_lossy().ends_with(MAIN_SEPARATOR) {
        raw.push(MAIN_SEPARATOR.to_string());
    }
    PathBuf::from(raw)
}

/// Copies `source` to `dest`, replacing whatever `dest` held before.
pub async fn copy(source: &Path, dest: &Path) -> Result<()> {
    if path_exists(dest).await {
        delete(dest).await?;
    }

    match classify(source).await? {
        EntryKind::File => copy_file(source, dest).await,
        EntryKind::Directory => copy_dir(source, dest).await,
        EntryKind::Restricted => {
            log::debug!(
                "{} is permission-restricted; copying it as a directory",
                source.display()
            );
            copy_dir(&with_trailing_separator(source), dest).await
        }
    }
}

/// Moves `source` to `dest`, replacing whatever `dest` held before.
///
/// Falls back to copy + delete when the rename crosses filesystems.
pub async fn move_path(source: &Path, dest: &Path) -> Result<()> {
    if path_exists(dest).await {
        delete(dest).await?;
    }

    match fs::rename(source, dest).await {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::CrossesDevices => {
            log::debug!(
                "rename {} -> {} crosses devices, copying instead",
                source.display(),
                dest.display()
            );
            move_by_copy(source, dest).await
        }
        Err(e) => Err(e).fs_context(&format!("moving to {}", dest.display()), source),
    }
}

/// Cross-filesystem move: copy, then delete the source.
async fn move_by_copy(source: &Path, dest: &Path) -> Result<()> {
    copy(source, dest).await?;
    delete(source).await
}

/// Removes a file, or a directory with all of its contents.
///
/// Absent paths are left alone.
pub async fn delete(path: &Path) -> Result<()> {
    let meta = match fs::symlink_metadata(path).await {
        Ok(meta) => meta,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(()),
        Err(e) => return Err(e).fs_context("inspecting path to delete", path),
    };

    if meta.is_dir() {
        remove_dir_all(path).await
    } else {
        match fs::remove_file(path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e).fs_context("removing file", path),
        }
    }
}

/// Creates `path` and any missing parents.
pub async fn create_dir_all(path: &Path) -> Result<()> {
    fs::create_dir_all(path)
        .await
        .fs_context("creating directory", path)
}

/// Removes the directory and its contents if it exists.
pub async fn remove_dir_all(path: &Path) -> Result<()> {
    match fs::remove_dir_all(path).await {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()), // Idempotent
        Err(e) => Err(e).fs_context("removing directory", path),
    }
}

/// Makes a symbolic link to a directory.
#[cfg(unix)]
fn symlink_dir(src: &Path, dst: &Path) -> io::Result<()> {
    std::os::unix::fs::symlink(src, dst)
}

/// Makes a symbolic link to a directory.
#[cfg(windows)]
fn symlink_dir(src: &Path, dst: &Path) -> io::Result<()> {
    std::os::windows::fs::symlink_dir(src, dst)
}

/// Makes a symbolic link to a file.
#[cfg(unix)]
fn symlink_file(src: &Path, dst: &Path) -> io::Result<()> {
    std::os::unix::fs::symlink(src, dst)
}

/// Makes a symbolic link to a file.
#[cfg(windows)]
fn symlink_file(src: &Path, dst: &Path) -> io::Result<()> {
    std::os::windows::fs::symlink_file(src, dst)
}

/// Copies a regular file, creating any parent directories of `to`.
pub async fn copy_file(from: &Path, to: &Path) -> Result<()> {
    if let Some(dest_dir) = to.parent() {
        fs::create_dir_all(dest_dir)
            .await
            .fs_context("creating destination directory", dest_dir)?;
    }
    fs::copy(from, to)
        .await
        .fs_context(&format!("copying to {}", to.display()), from)?;
    Ok(())
}

/// Recursively copies a directory, creating any parent directories of `to`.
///
/// Symlinks inside the tree are recreated rather than followed.
pub async fn copy_dir(from: &Path, to: &Path) -> Result<()> {
    let from = from.to_path_buf();
    let to = to.to_path_buf();

    tokio::task::spawn_blocking(move || copy_dir_blocking(&from, &to))
        .await
        .map_err(|e| {
            crate::bundler::Error::GenericError(format!("directory copy task panicked: {e}"))
        })?
}

fn copy_dir_blocking(from: &Path, to: &Path) -> Result<()> {
    if let Some(parent) = to.parent() {
        std::fs::create_dir_all(parent).fs_context("creating destination directory", parent)?;
    }

    for entry in walkdir::WalkDir::new(from) {
        let entry = entry?;
        let rel_path = entry.path().strip_prefix(from)?;
        let dest_path = to.join(rel_path);

        if entry.file_type().is_symlink() {
            let target =
                std::fs::read_link(entry.path()).fs_context("reading symlink", entry.path())?;
            let linked = if entry.path().is_dir() {
                symlink_dir(&target, &dest_path)
            } else {
                symlink_file(&target, &dest_path)
            };
            linked.fs_context("recreating symlink", &dest_path)?;
        } else if entry.file_type().is_dir() {
            std::fs::create_dir_all(&dest_path).fs_context("creating directory", &dest_path)?;
        } else {
            std::fs::copy(entry.path(), &dest_path)
                .fs_context(&format!("copying to {}", dest_path.display()), entry.path())?;
        }
    }

    Ok(())
}
