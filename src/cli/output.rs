//! Styled terminal output for the release command.

use console::Style;

/// Writes user-facing summaries; logging goes through `log` instead.
#[derive(Debug, Clone)]
pub struct OutputManager {
    verbose: bool,
    quiet: bool,
}

impl OutputManager {
    /// Creates an output manager.
    pub fn new(verbose: bool, quiet: bool) -> Self {
        Self { verbose, quiet }
    }

    /// Section header.
    pub fn section(&self, title: &str) {
        if !self.quiet {
            println!("\n{}", Style::new().bold().cyan().apply_to(title));
        }
    }

    /// Labelled value, indented under a section.
    pub fn field(&self, label: &str, value: impl std::fmt::Display) {
        if !self.quiet {
            println!("  {} {value}", Style::new().bold().apply_to(label));
        }
    }

    /// Success line.
    pub fn success(&self, message: &str) {
        if !self.quiet {
            println!("{} {message}", Style::new().green().bold().apply_to("✓"));
        }
    }

    /// Warning line, on stderr.
    pub fn warn(&self, message: &str) {
        if !self.quiet {
            eprintln!("{} {message}", Style::new().yellow().bold().apply_to("⚠"));
        }
    }

    /// Error line with hints, on stderr. Always shown.
    pub fn error(&self, message: &str, hints: &[String]) {
        eprintln!("{} {message}", Style::new().red().bold().apply_to("Error:"));
        for hint in hints {
            eprintln!("  {} {hint}", Style::new().dim().apply_to("→"));
        }
    }

    /// Line shown only in verbose mode.
    pub fn verbose(&self, message: &str) {
        if self.verbose && !self.quiet {
            println!("  {}", Style::new().dim().apply_to(message));
        }
    }
}
