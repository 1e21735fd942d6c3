//! Command line interface for the release pipeline.
//!
//! Parses arguments, loads `release.toml`, applies command line overrides,
//! and either runs the pipeline or (with `--check`) reports the resolved
//! context and tool availability.

mod args;
mod output;

pub use args::Args;
pub use output::OutputManager;

use crate::{
    bundler::{
        BuildContext, BuildContextBuilder, ExitPolicy, Pipeline, ReleaseReport,
        builder::tool_detection::{ToolCheck, check_tools},
    },
    error::{CliError, ReleaseError, Result},
    metadata,
};
use path_absolutize::Absolutize;
use std::path::Path;

/// Main CLI entry point. Returns the process exit code.
pub async fn run(args: Args) -> Result<i32> {
    let output = OutputManager::new(args.verbose, args.quiet);
    args.validate()
        .map_err(|reason| CliError::InvalidArguments { reason })?;

    let ctx = resolve_context(&args).await?;

    if args.check {
        let tools = check_tools(&ctx);
        let ready = tools.iter().all(ToolCheck::is_available);
        if args.json {
            println!(
                "{}",
                serde_json::to_string_pretty(&serde_json::json!({
                    "context": &ctx,
                    "tools": &tools,
                }))?
            );
        } else {
            print_context(&output, &ctx, &tools);
        }
        return Ok(if ready { 0 } else { 1 });
    }

    let report = Pipeline::new(ctx).run().await?;
    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&output, &report);
    }
    Ok(0)
}

/// Loads the configuration and applies command line overrides.
pub async fn resolve_context(args: &Args) -> Result<BuildContext> {
    let (config_path, required) = args.config_path();
    let config = metadata::load_or_default(&config_path, required)?;

    let mut builder: BuildContextBuilder = config.context_builder(&args.root);
    if let Some(dir) = &args.data_dir {
        builder = builder.data_dir(from_cwd(dir)?);
    }
    if let Some(dir) = &args.staging_dir {
        builder = builder.staging_dir(from_cwd(dir)?);
    }
    if let Some(dir) = &args.output_dir {
        builder = builder.output_dir(from_cwd(dir)?);
    }
    if args.strict {
        builder = builder.exit_policy(ExitPolicy::FailFast);
    }

    Ok(builder.build().await?)
}

/// Command line paths are relative to where the command was started.
fn from_cwd(path: &Path) -> Result<std::path::PathBuf> {
    path.absolutize()
        .map(|p| p.into_owned())
        .map_err(ReleaseError::Io)
}

fn print_context(output: &OutputManager, ctx: &BuildContext, tools: &[ToolCheck]) {
    output.section("Build context");
    output.field("Root:", ctx.root().display());
    output.field("Staging:", ctx.staging_dir().display());
    output.field("Data:", ctx.data_dir().display());
    output.field("Output:", ctx.output_dir().display());
    output.field("Host OS:", ctx.os());
    output.field("Version:", ctx.version());
    output.field("Executable:", ctx.executable_file_name());
    output.field("Installer:", ctx.installer_file_name());
    output.field("Exit policy:", format!("{:?}", ctx.exit_policy()));

    output.section("Tools");
    for tool in tools {
        match &tool.resolved {
            Some(path) => output.field(&format!("{}:", tool.role), path.display()),
            None => output.warn(&format!("{} `{}` not found", tool.role, tool.program)),
        }
    }
}

fn print_report(output: &OutputManager, report: &ReleaseReport) {
    output.section("Release complete");
    output.field("Version:", &report.version);
    output.field("Executable:", report.executable.display());
    output.field("Installer:", report.installer.display());
    output.field("SHA256:", &report.installer_sha256);
    for entry in &report.staged.kept {
        output.verbose(&format!("kept staged data: {entry}"));
    }
    output.success("staging directory removed");
}
