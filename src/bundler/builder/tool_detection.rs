//! External tool availability checking.

use crate::bundler::{platform::process::resolve_program, settings::BuildContext};
use std::path::PathBuf;

/// Availability of one configured tool.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct ToolCheck {
    /// Pipeline role of the tool ("freezer" or "installer compiler").
    pub role: &'static str,
    /// Program as configured.
    pub program: String,
    /// Resolved executable, if it exists.
    pub resolved: Option<PathBuf>,
}

impl ToolCheck {
    /// True when the program was found.
    pub fn is_available(&self) -> bool {
        self.resolved.is_some()
    }
}

/// Looks up both tools of the context.
///
/// A missing tool is not an error here: the run fails when the tool is
/// spawned, so this only serves early diagnostics.
pub fn check_tools(ctx: &BuildContext) -> Vec<ToolCheck> {
    [
        ("freezer", ctx.packager().program.as_str()),
        ("installer compiler", ctx.installer().program.as_str()),
    ]
    .into_iter()
    .map(|(role, program)| {
        let candidate = resolve_program(ctx.root(), program);
        let resolved = candidate.is_file().then_some(candidate);
        match &resolved {
            Some(path) => log::debug!("Found {role} at: {}", path.display()),
            None => log::warn!("{role} `{program}` not found; the run will fail when it is invoked"),
        }
        ToolCheck {
            role,
            program: program.to_string(),
            resolved,
        }
    })
    .collect()
}
