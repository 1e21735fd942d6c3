//! Release pipeline orchestration.
//!
//! The [`Pipeline`] drives one release run:
//! 1. Stages sources and data per the manifest
//! 2. Renders the freezer configuration and freezes the application
//! 3. Renders the installer script and compiles the installer
//! 4. Hashes the installer and removes the staging directory
//!
//! # Module Organization
//!
//! - [`checksum`] - SHA256 checksum calculation for deliverables
//! - `orchestrator` - [`Pipeline`] and its [`PipelineState`] machine
//! - [`tool_detection`] - External tool availability checking

pub mod checksum;
mod orchestrator;
pub mod tool_detection;

pub use orchestrator::{Pipeline, PipelineState, ReleaseReport};
