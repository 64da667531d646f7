//! CLI module for the `tcod-config` tool
//!
//! ## Commands
//!
//! - `lex <file>` - Print the token stream
//! - `check <file>` - Lex and parse, reporting every diagnostic
//! - `dump <file>` - Print the syntax tree as JSON
//! - `fmt <file>` - Print the formatted file, or check/diff it
//!
//! ## Design
//!
//! The CLI uses clap for argument parsing with derive macros.
//! Command functions return `CliResult<T>` instead of calling `process::exit`.
//! Only the top-level `run()` function handles errors and exits.

// Enforce explicit error handling - no panicking in production code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

pub mod commands;

use std::fmt;
use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

// ============================================================================
// CLI Error handling
// ============================================================================

/// Exit code for CLI operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExitCode(pub i32);

impl ExitCode {
    pub const SUCCESS: ExitCode = ExitCode(0);
    pub const FAILURE: ExitCode = ExitCode(1);
}

/// Error type for CLI operations.
///
/// Contains a user-facing message and an exit code. The CLI entry point
/// catches these errors, prints the message, and exits with the code.
#[derive(Debug)]
pub struct CliError {
    /// User-facing error message (already formatted for display)
    pub message: String,
    pub exit_code: ExitCode,
}

impl CliError {
    pub fn new(message: impl Into<String>, exit_code: ExitCode) -> Self {
        Self {
            message: message.into(),
            exit_code,
        }
    }

    /// Create a failure error (exit code 1).
    pub fn failure(message: impl Into<String>) -> Self {
        Self::new(message, ExitCode::FAILURE)
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

const VERSION: &str = env!("CARGO_PKG_VERSION");

// ============================================================================
// Clap CLI definition
// ============================================================================

/// Inspect, validate and format libtcod-style config files
#[derive(Parser, Debug)]
#[command(name = "tcod-config")]
#[command(version = VERSION)]
#[command(about = "Inspect, validate and format libtcod-style config files", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print one token per line with its byte span
    Lex {
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },

    /// Lex and parse a file, reporting every diagnostic
    Check {
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },

    /// Print the syntax tree as JSON
    Dump {
        #[arg(value_name = "FILE")]
        file: PathBuf,
        /// Print on a single line
        #[arg(long)]
        compact: bool,
    },

    /// Print a file in canonical format
    Fmt {
        #[arg(value_name = "FILE")]
        file: PathBuf,
        /// Check formatting without printing the result
        #[arg(long, conflicts_with = "diff")]
        check: bool,
        /// Show diff of formatting changes
        #[arg(long)]
        diff: bool,
        /// Spaces per indentation level
        #[arg(long, value_name = "N")]
        indent: Option<usize>,
        /// Indent with tabs
        #[arg(long, conflicts_with = "indent")]
        tabs: bool,
    },
}

// ============================================================================
// CLI entry point
// ============================================================================

/// Main CLI entry point.
///
/// This is the only place where `process::exit` is called. All command
/// implementations return `CliResult` and errors are handled here.
pub fn run() {
    let cli = Cli::parse();

    match execute(cli) {
        Ok(exit_code) => {
            if exit_code.0 != 0 {
                process::exit(exit_code.0);
            }
        }
        Err(e) => {
            if !e.message.is_empty() {
                eprintln!("{}", e.message);
            }
            process::exit(e.exit_code.0);
        }
    }
}

/// Execute the CLI command and return result.
fn execute(cli: Cli) -> CliResult<ExitCode> {
    match cli.command {
        Command::Lex { file } => commands::lex_file(&file.to_string_lossy()),
        Command::Check { file } => commands::check_file(&file.to_string_lossy()),
        Command::Dump { file, compact } => commands::dump_file(&file.to_string_lossy(), compact),
        Command::Fmt {
            file,
            check,
            diff,
            indent,
            tabs,
        } => commands::format_file(
            &file.to_string_lossy(),
            commands::FmtOptions {
                check,
                diff,
                indent,
                tabs,
            },
        ),
    }
}

// ============================================================================
// Tests
// ============================================================================
