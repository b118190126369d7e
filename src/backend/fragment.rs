//! Rendered fragments and the write-set they are collected into.
//!
//! A [`Fragment`] is a piece of output text, optionally tagged with the file it belongs to. Fragments compose by
//! concatenation (same file) or by collection into a [`WriteSet`] (one entry per file).

use std::collections::BTreeSet;
use std::path::{Component, Path, PathBuf};

use super::errors::{CodegenError, CodegenResult};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fragment {
    pub path: Option<PathBuf>,
    pub text: String,
}

impl Fragment {
    /// A fragment that is part of some larger file.
    pub fn inline(text: impl Into<String>) -> Self {
        Self {
            path: None,
            text: text.into(),
        }
    }

    /// A whole output file. The text is normalised to end with exactly one newline.
    pub fn file(path: impl Into<PathBuf>, text: impl AsRef<str>) -> Self {
        let mut text = text.as_ref().trim_end().to_string();
        text.push('\n');
        Self {
            path: Some(path.into()),
            text,
        }
    }

    /// Join inline fragments with `separator`.
    pub fn concat<'a>(parts: impl IntoIterator<Item = &'a Fragment>, separator: &str) -> Fragment {
        let text = parts.into_iter().map(|f| f.text.as_str()).collect::<Vec<_>>().join(separator);
        Fragment::inline(text)
    }
}

/// One file of the write-set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputFile {
    pub path: PathBuf,
    pub contents: String,
}

/// Every file produced by one generation pass, in emission order.
///
/// Paths are relative to `root` and unique. The set itself performs no I/O; persisting it is the caller's job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriteSet {
    root: PathBuf,
    files: Vec<OutputFile>,
    seen: BTreeSet<PathBuf>,
}

impl WriteSet {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            files: Vec::new(),
            seen: BTreeSet::new(),
        }
    }

    /// Add a file fragment.
    ///
    /// Rejects fragments without a path, absolute or escaping (`..`) paths, and paths already present.
    pub fn insert(&mut self, fragment: Fragment) -> CodegenResult<()> {
        let Some(path) = fragment.path else {
            return Err(CodegenError::InvalidOutputPath {
                path: PathBuf::new(),
                reason: "fragment has no output path",
            });
        };
        validate_relative(&path)?;
        if !self.seen.insert(path.clone()) {
            return Err(CodegenError::DuplicateOutputPath { path });
        }
        self.files.push(OutputFile {
            path,
            contents: fragment.text,
        });
        Ok(())
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn files(&self) -> &[OutputFile] {
        &self.files
    }

    pub fn files_mut(&mut self) -> impl Iterator<Item = &mut OutputFile> {
        self.files.iter_mut()
    }

    pub fn get(&self, path: impl AsRef<Path>) -> Option<&str> {
        let path = path.as_ref();
        self.files.iter().find(|f| f.path == path).map(|f| f.contents.as_str())
    }

    pub fn paths(&self) -> impl Iterator<Item = &Path> {
        self.files.iter().map(|f| f.path.as_path())
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

fn validate_relative(path: &Path) -> CodegenResult<()> {
    if path.as_os_str().is_empty() {
        return Err(CodegenError::InvalidOutputPath {
            path: path.to_path_buf(),
            reason: "path is empty",
        });
    }
    for component in path.components() {
        match component {
            Component::Normal(_) | Component::CurDir => {}
            Component::ParentDir => {
                return Err(CodegenError::InvalidOutputPath {
                    path: path.to_path_buf(),
                    reason: "path escapes the target directory",
                });
            }
            Component::RootDir | Component::Prefix(_) => {
                return Err(CodegenError::InvalidOutputPath {
                    path: path.to_path_buf(),
                    reason: "path must be relative",
                });
            }
        }
    }
    Ok(())
}
