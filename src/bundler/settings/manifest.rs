//! Declarative list of the paths staged into the bundle directory.

use crate::bundler::error::{Error, Result};
use std::{
    collections::HashSet,
    path::{Component, Path},
};

/// What the collector does when the staged destination already exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyPolicy {
    /// Replace the destination with the current repository contents.
    Overwrite,
    /// Keep the destination; copy from the data directory only if absent.
    PreserveExisting,
}

/// Paths staged into the bundle directory.
///
/// # Configuration
///
/// ```toml
/// [manifest]
/// overwrite = ["main.py", "gui", "dsp", "plotting", "version.txt"]
/// preserve = ["data", "settings"]
/// ```
///
/// `overwrite` entries are read from the repository root and always refreshed.
/// `preserve` entries are read from the external data directory and only
/// copied when nothing is staged under that name yet, so local customizations
/// of staged data survive re-runs.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct PathManifest {
    /// Entries copied fresh on every run.
    pub overwrite: Vec<String>,
    /// Entries copied only if absent from the staging directory.
    pub preserve: Vec<String>,
}

impl PathManifest {
    /// Creates a manifest from the two entry lists.
    pub fn new<O, P>(overwrite: O, preserve: P) -> Self
    where
        O: IntoIterator,
        O::Item: Into<String>,
        P: IntoIterator,
        P::Item: Into<String>,
    {
        Self {
            overwrite: overwrite.into_iter().map(Into::into).collect(),
            preserve: preserve.into_iter().map(Into::into).collect(),
        }
    }

    /// Iterates all entries in staging order together with their policy.
    pub fn entries(&self) -> impl Iterator<Item = (&str, CopyPolicy)> {
        self.overwrite
            .iter()
            .map(|e| (e.as_str(), CopyPolicy::Overwrite))
            .chain(
                self.preserve
                    .iter()
                    .map(|e| (e.as_str(), CopyPolicy::PreserveExisting)),
            )
    }

    /// Checks that every entry is a plain relative path and that the two
    /// lists are disjoint.
    pub fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for (entry, _) in self.entries() {
            check_entry(entry)?;
            let normalized = normalize(entry);
            if !seen.insert(normalized) {
                return Err(Error::InvalidConfig(format!(
                    "manifest entry '{entry}' is listed more than once"
                )));
            }
        }
        Ok(())
    }
}

fn check_entry(entry: &str) -> Result<()> {
    if entry.trim().is_empty() {
        return Err(Error::InvalidConfig("empty manifest entry".into()));
    }
    let path = Path::new(entry);
    let escapes = path.components().any(|c| {
        matches!(
            c,
            Component::ParentDir | Component::RootDir | Component::Prefix(_)
        )
    });
    if escapes {
        return Err(Error::InvalidConfig(format!(
            "manifest entry '{entry}' must be relative and stay inside its root"
        )));
    }
    Ok(())
}

fn normalize(entry: &str) -> String {
    Path::new(entry)
        .components()
        .filter(|c| !matches!(c, Component::CurDir))
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect::<Vec<_>>()
        .join("/")
}
