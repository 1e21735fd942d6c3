//! External toolchains driven by the release pipeline.
//!
//! - [`freezer`] - turns the staged program into a standalone executable
//! - [`installer`] - wraps the executable into a distributable installer
//! - [`process`] - shared subprocess execution and exit status policy

pub mod freezer;
pub mod installer;
pub mod process;
