//! CLI module for the letlang compiler
//!
//! This module provides the command-line interface around the code generator.
//!
//! ## Commands
//!
//! - `generate <MODEL>` - Generate a Rust project from a resolved model (JSON)
//! - `templates` - List the bundled templates and the slots each one binds
//!
//! ## Modules
//!
//! - `commands` - Command implementations
//! - `writer` - Persisting a write-set, with dry-run support
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
pub mod writer;

use std::fmt;
use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

use crate::version::{COMPILER_NAME, LETLANG_VERSION};

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
    /// Exit code to return to the shell
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

impl From<crate::backend::CodegenError> for CliError {
    fn from(err: crate::backend::CodegenError) -> Self {
        // Debug formatting of a miette report renders the diagnostic with its code and help text.
        CliError::failure(format!("{:?}", miette::Report::new(err)))
    }
}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

// ============================================================================
// Clap CLI definition
// ============================================================================

/// The letlang compiler
#[derive(Parser, Debug)]
#[command(name = COMPILER_NAME)]
#[command(version = LETLANG_VERSION)]
#[command(about = "Generate Rust projects from resolved letlang programs", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Generate a Rust project from a resolved model
    Generate {
        /// Resolved model (JSON)
        #[arg(value_name = "MODEL")]
        model: PathBuf,
        /// Build configuration (default: ./letlang.toml when present)
        #[arg(long, value_name = "FILE")]
        config: Option<PathBuf>,
        /// Output directory, overriding the configured `target_dir`
        #[arg(short, long, value_name = "DIR")]
        out: Option<PathBuf>,
        /// Print the files that would be written without writing them
        #[arg(long)]
        dry_run: bool,
        /// Pretty-print the emitted Rust files
        #[arg(long)]
        format: bool,
    },

    /// List bundled templates and their slots
    Templates,
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
        Command::Generate {
            model,
            config,
            out,
            dry_run,
            format,
        } => commands::generate(&commands::GenerateArgs {
            model,
            config,
            out,
            dry_run,
            format,
        }),
        Command::Templates => commands::list_templates(),
    }
}

// ============================================================================
// Tests
// ============================================================================
