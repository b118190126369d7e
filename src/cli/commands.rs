//! CLI command implementations
//!
//! All command functions return `CliResult<ExitCode>` instead of calling
//! `process::exit`. Error handling and exits happen in the top-level `run()`.

use std::fs;
use std::path::{Path, PathBuf};

use letlang_model::Model;

use super::writer::{FileWriter, WriteResult};
use super::{CliError, CliResult, ExitCode};
use crate::backend::{CodeGenerator, TemplateSet};
use crate::config::{CONFIG_FILENAME, Config, OptionValue};

/// Maximum input file size (100 MB).
///
/// Models larger than this are rejected to avoid memory exhaustion.
const MAX_INPUT_SIZE: u64 = 100 * 1024 * 1024;

/// Arguments of the `generate` command.
#[derive(Debug, Clone, Default)]
pub struct GenerateArgs {
    pub model: PathBuf,
    pub config: Option<PathBuf>,
    pub out: Option<PathBuf>,
    pub dry_run: bool,
    pub format: bool,
}

/// Generate a Rust project from a resolved model and write it out.
pub fn generate(args: &GenerateArgs) -> CliResult<ExitCode> {
    let model = load_model(&args.model)?;
    let mut config = load_config(args.config.as_deref())?;
    if let Some(out) = &args.out {
        config.target_dir = out.clone();
    }
    if args.format {
        config.options.insert("format".to_string(), OptionValue::Bool(true));
    }

    // Validate output directory path to prevent path traversal
    validate_output_dir(&config.target_dir)?;

    let write_set = CodeGenerator::new(&model, &config)?.generate()?;
    let results = FileWriter::new(args.dry_run).write_all(&write_set)?;

    for result in &results {
        match result {
            WriteResult::Written { path, bytes } => println!("wrote {} ({} bytes)", path.display(), bytes),
            WriteResult::DryRun { path, content } => {
                println!("would write {} ({} bytes)", path.display(), content.len());
            }
        }
    }
    if !args.dry_run {
        println!("Generated Rust project in: {}", write_set.root().display());
    }
    Ok(ExitCode::SUCCESS)
}

/// Print every bundled template with the slots its renderer binds.
pub fn list_templates() -> CliResult<ExitCode> {
    let templates = TemplateSet::bundled()?;
    for (name, slots) in templates.templates() {
        let slots: Vec<&str> = slots.iter().map(String::as_str).collect();
        println!("{:<24} {}", name, slots.join(", "));
    }
    Ok(ExitCode::SUCCESS)
}

/// Read and deserialize a model file.
pub fn load_model(path: &Path) -> CliResult<Model> {
    let source = read_input(path)?;
    serde_json::from_str(&source)
        .map_err(|e| CliError::failure(format!("Invalid model '{}': {}", path.display(), e)))
}

/// Load the build configuration.
///
/// An explicit path must exist. Without one, `letlang.toml` in the working directory is used when present, and the
/// defaults otherwise.
pub fn load_config(path: Option<&Path>) -> CliResult<Config> {
    let path = match path {
        Some(path) => path.to_path_buf(),
        None => {
            let default = PathBuf::from(CONFIG_FILENAME);
            if !default.exists() {
                tracing::debug!("no {} found, using default configuration", CONFIG_FILENAME);
                return Ok(Config::default());
            }
            default
        }
    };
    let source = read_input(&path)?;
    Config::from_toml_str(&source)
        .map_err(|e| CliError::failure(format!("Invalid configuration '{}': {}", path.display(), e)))
}

/// Read an input file, rejecting files over `MAX_INPUT_SIZE`.
fn read_input(path: &Path) -> CliResult<String> {
    let metadata = fs::metadata(path)
        .map_err(|e| CliError::failure(format!("Cannot access file '{}': {}", path.display(), e)))?;

    if metadata.len() > MAX_INPUT_SIZE {
        return Err(CliError::failure(format!(
            "Input file '{}' is too large ({} bytes, max {} bytes)",
            path.display(),
            metadata.len(),
            MAX_INPUT_SIZE
        )));
    }

    fs::read_to_string(path).map_err(|e| CliError::failure(format!("Error reading file '{}': {}", path.display(), e)))
}

/// Validate the output directory to prevent path traversal attacks.
///
/// This function ensures:
/// - The path doesn't contain `..` components
/// - Absolute paths are allowed, with a warning
fn validate_output_dir(out_dir: &Path) -> CliResult<()> {
    for component in out_dir.components() {
        if let std::path::Component::ParentDir = component {
            return Err(CliError::failure(format!(
                "Output directory '{}' contains path traversal (..)",
                out_dir.display()
            )));
        }
    }

    if out_dir.is_absolute() {
        tracing::warn!(
            "Using absolute output path: {}. Consider using a relative path.",
            out_dir.display()
        );
    }

    Ok(())
}
