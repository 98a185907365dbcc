//! Output formatting utilities.

use clap::ValueEnum;
use colored::Colorize;

/// Output format for CLI commands.
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
    /// Boxed summary plus per-app table (default)
    #[default]
    Text,
    /// JSON format
    Json,
}

/// Print an error message to stderr.
pub fn print_error(message: &str) {
    eprintln!("{} {}", "✗".red().bold(), message);
}
