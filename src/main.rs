//! AXBPS release - packaging orchestrator.
//!
//! Stages the application, freezes it into a standalone executable and
//! compiles the installer around it.

use axbps_release::cli::{self, Args, OutputManager};
use std::process;

#[tokio::main]
async fn main() {
    let args = Args::parse_args();

    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(args.log_filter()))
        .format_timestamp(None)
        .init();

    let output = OutputManager::new(args.verbose, args.quiet);

    // Run CLI and get exit code
    let exit_code = match cli::run(args).await {
        Ok(code) => code,
        Err(e) => {
            output.error(&e.to_string(), &e.recovery_suggestions());
            1
        }
    };

    process::exit(exit_code);
}
