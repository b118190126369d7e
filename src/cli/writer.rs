//! Persisting a generated write-set.
//!
//! The code generator never touches the filesystem; this is the one place that does, with support for dry-run mode.

use std::path::{Path, PathBuf};

use super::{CliError, CliResult};
use crate::backend::WriteSet;

/// Result of a write operation.
#[derive(Debug)]
pub enum WriteResult {
    /// File was written successfully.
    Written {
        path: PathBuf,
        /// Number of bytes written.
        bytes: usize,
    },
    /// Dry run - content was not written.
    DryRun { path: PathBuf, content: String },
}

impl WriteResult {
    pub fn path(&self) -> &Path {
        match self {
            WriteResult::Written { path, .. } => path,
            WriteResult::DryRun { path, .. } => path,
        }
    }

    /// Get the number of bytes written (0 for dry-run).
    pub fn bytes(&self) -> usize {
        match self {
            WriteResult::Written { bytes, .. } => *bytes,
            WriteResult::DryRun { .. } => 0,
        }
    }
}

/// File writer with dry-run support.
#[derive(Debug)]
pub struct FileWriter {
    dry_run: bool,
}

impl FileWriter {
    pub fn new(dry_run: bool) -> Self {
        Self { dry_run }
    }

    pub fn is_dry_run(&self) -> bool {
        self.dry_run
    }

    /// Write content to a file, creating parent directories as needed.
    ///
    /// In dry-run mode, returns the content without writing.
    pub fn write(&self, path: &Path, content: &str) -> CliResult<WriteResult> {
        if self.dry_run {
            return Ok(WriteResult::DryRun {
                path: path.to_path_buf(),
                content: content.to_string(),
            });
        }

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent).map_err(|e| {
                    CliError::failure(format!("Error creating directory '{}': {}", parent.display(), e))
                })?;
            }
        }

        std::fs::write(path, content)
            .map_err(|e| CliError::failure(format!("Error writing file '{}': {}", path.display(), e)))?;
        tracing::debug!(path = %path.display(), bytes = content.len(), "wrote file");

        Ok(WriteResult::Written {
            path: path.to_path_buf(),
            bytes: content.len(),
        })
    }

    /// Write every file of the write-set below its root, in write-set order.
    pub fn write_all(&self, write_set: &WriteSet) -> CliResult<Vec<WriteResult>> {
        write_set
            .files()
            .iter()
            .map(|file| self.write(&write_set.root().join(&file.path), &file.contents))
            .collect()
    }
}
