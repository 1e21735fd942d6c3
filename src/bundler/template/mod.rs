//! Tool configuration templates.
//!
//! Templates are rendered by literal substring replacement of `{{NAME}}`
//! placeholders. Tool configuration formats use braces for their own syntax,
//! so nothing else in the text is interpreted and no escaping is applied;
//! values that need escaping for the target format are escaped by the caller
//! (see [`packager_resolutions`]).

use crate::bundler::{
    error::{ErrorExt, Result},
    settings::BuildContext,
};
use regex::Regex;
use std::{
    collections::BTreeMap,
    path::{Path, PathBuf},
    sync::LazyLock,
};

/// Absolute repository root.
pub const ROOT_PATH: &str = "{{ROOT_PATH}}";
/// Absolute staging directory.
pub const STAGING_PATH: &str = "{{STAGING_PATH}}";
/// Absolute output directory.
pub const OUTPUT_PATH: &str = "{{OUTPUT_PATH}}";
/// Host path separator.
pub const PATH_SEPARATOR: &str = "{{PATH_SEPARATOR}}";
/// Application version, e.g. `3.1.4`.
pub const VERSION: &str = "{{VERSION}}";
/// Product name.
pub const PRODUCT_NAME: &str = "{{PRODUCT_NAME}}";
/// Canonical executable name without suffix.
pub const EXECUTABLE_NAME: &str = "{{EXECUTABLE_NAME}}";
/// Installer file name without extension.
pub const INSTALLER_NAME: &str = "{{INSTALLER_NAME}}";

static PLACEHOLDER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\{\{[A-Za-z_][A-Za-z0-9_]*\}\}").expect("placeholder pattern compiles")
});

/// Template text together with the values of its placeholders.
#[derive(Debug, Clone, Default)]
pub struct TemplateDocument {
    text: String,
    resolutions: BTreeMap<String, String>,
}

impl TemplateDocument {
    /// Wraps template text with no resolutions yet.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            resolutions: BTreeMap::new(),
        }
    }

    /// Reads a template file.
    pub async fn load(path: &Path) -> Result<Self> {
        let text = tokio::fs::read_to_string(path)
            .await
            .fs_context("reading template", path)?;
        Ok(Self::new(text))
    }

    /// Adds or replaces the value of one placeholder token.
    pub fn resolve(mut self, token: impl Into<String>, value: impl Into<String>) -> Self {
        self.resolutions.insert(token.into(), value.into());
        self
    }

    /// Adds several placeholder values.
    pub fn resolve_all(mut self, resolutions: BTreeMap<String, String>) -> Self {
        self.resolutions.extend(resolutions);
        self
    }

    /// Placeholder tokens present in the text without a resolution.
    pub fn unresolved(&self) -> Vec<String> {
        unresolved_placeholders(&self.text)
            .into_iter()
            .filter(|token| !self.resolutions.contains_key(token))
            .collect()
    }

    /// Renders the document.
    pub fn render(&self) -> String {
        render(&self.text, &self.resolutions)
    }

    /// Renders the document into `target`, replacing any existing file.
    ///
    /// Unresolved placeholders are passed through to the tool, with a warning.
    pub async fn write_to(&self, target: &Path) -> Result<PathBuf> {
        for token in self.unresolved() {
            log::warn!(
                "placeholder {token} has no value; it is written verbatim to {}",
                target.display()
            );
        }

        if let Some(parent) = target.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .fs_context("creating template output directory", parent)?;
        }
        tokio::fs::write(target, self.render())
            .await
            .fs_context("writing rendered template", target)?;
        log::debug!("rendered {}", target.display());
        Ok(target.to_path_buf())
    }
}

/// Trims the template and replaces every placeholder token with its value.
///
/// Tokens must not overlap or contain one another.
pub fn render(template: &str, resolutions: &BTreeMap<String, String>) -> String {
    resolutions
        .iter()
        .fold(template.trim().to_string(), |text, (token, value)| {
            text.replace(token.as_str(), value)
        })
}

/// Reads `template`, renders it and writes the result to `target`.
pub async fn render_to_file(
    template: &Path,
    resolutions: BTreeMap<String, String>,
    target: &Path,
) -> Result<PathBuf> {
    TemplateDocument::load(template)
        .await?
        .resolve_all(resolutions)
        .write_to(target)
        .await
}

/// Distinct `{{NAME}}` tokens found in `text`, in order of first appearance.
pub fn unresolved_placeholders(text: &str) -> Vec<String> {
    let mut found: Vec<String> = Vec::new();
    for m in PLACEHOLDER.find_iter(text) {
        if !found.iter().any(|t| t == m.as_str()) {
            found.push(m.as_str().to_string());
        }
    }
    found
}

/// Placeholder values for the freezer configuration.
///
/// Path values are escaped for the host (backslashes doubled on Windows).
pub fn packager_resolutions(ctx: &BuildContext) -> BTreeMap<String, String> {
    resolutions(ctx, |value| ctx.os().escape_for_packager(value))
}

/// Placeholder values for the installer script. Paths are used verbatim.
pub fn installer_resolutions(ctx: &BuildContext) -> BTreeMap<String, String> {
    resolutions(ctx, str::to_string)
}

fn resolutions(ctx: &BuildContext, escape_path: impl Fn(&str) -> String) -> BTreeMap<String, String> {
    let mut map = BTreeMap::new();

    for (name, value) in ctx.variables() {
        map.insert(format!("{{{{{name}}}}}"), value.clone());
    }

    let builtins = [
        (ROOT_PATH, escape_path(&ctx.root().display().to_string())),
        (STAGING_PATH, escape_path(&ctx.staging_dir().display().to_string())),
        (OUTPUT_PATH, escape_path(&ctx.output_dir().display().to_string())),
        (PATH_SEPARATOR, escape_path(&ctx.path_separator().to_string())),
        (VERSION, ctx.version().to_string()),
        (PRODUCT_NAME, ctx.product().name.clone()),
        (EXECUTABLE_NAME, ctx.product().executable_name().to_string()),
        (INSTALLER_NAME, ctx.installer_name().to_string()),
    ];
    for (token, value) in builtins {
        if map.insert(token.to_string(), value).is_some() {
            log::warn!("configured variable {token} is shadowed by the built-in value");
        }
    }

    map
}
