//! Configuration structures for release runs.
//!
//! [`BuildContext`] is the resolved, immutable parameter set of one run;
//! everything else here is the declarative input it is built from.

mod builder;
mod core;
mod manifest;
mod os;
mod package;
mod tools;
pub mod version;

pub use builder::BuildContextBuilder;
pub use core::BuildContext;
pub use manifest::{CopyPolicy, PathManifest};
pub use os::HostOs;
pub use package::ProductSettings;
pub use tools::{ExitPolicy, InstallerSettings, PackagerSettings};
