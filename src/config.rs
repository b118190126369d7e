//! Build configuration handed to the code generator.
//!
//! Loaded from `letlang.toml` by the CLI; the backend only ever borrows it.
//!
//! ```toml
//! target_dir = "target/letlang/demo"
//! dependencies = ["serde", "rand@0.8"]
//!
//! [options]
//! format = true
//! edition = "2021"
//! ```

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Default configuration filename.
pub const CONFIG_FILENAME: &str = "letlang.toml";

/// Output directory used when none is configured.
pub const DEFAULT_TARGET_DIR: &str = "target/letlang";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Directory the generated project is written to.
    pub target_dir: PathBuf,
    /// External package identifiers (`name` or `name@version`), in order.
    pub dependencies: Vec<String>,
    /// Emission options by name.
    pub options: BTreeMap<String, OptionValue>,
}

/// Value of a single emission option.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OptionValue {
    Bool(bool),
    Integer(i64),
    String(String),
}

impl From<bool> for OptionValue {
    fn from(v: bool) -> Self {
        OptionValue::Bool(v)
    }
}

impl From<i64> for OptionValue {
    fn from(v: i64) -> Self {
        OptionValue::Integer(v)
    }
}

impl From<&str> for OptionValue {
    fn from(v: &str) -> Self {
        OptionValue::String(v.to_string())
    }
}

impl From<String> for OptionValue {
    fn from(v: String) -> Self {
        OptionValue::String(v)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            target_dir: PathBuf::from(DEFAULT_TARGET_DIR),
            dependencies: Vec::new(),
            options: BTreeMap::new(),
        }
    }
}

impl Config {
    pub fn new(target_dir: impl AsRef<Path>) -> Self {
        Self {
            target_dir: target_dir.as_ref().to_path_buf(),
            ..Self::default()
        }
    }

    pub fn with_dependency(mut self, dependency: impl Into<String>) -> Self {
        self.dependencies.push(dependency.into());
        self
    }

    pub fn with_option(mut self, name: impl Into<String>, value: impl Into<OptionValue>) -> Self {
        self.options.insert(name.into(), value.into());
        self
    }

    /// Parse a `letlang.toml` document.
    pub fn from_toml_str(source: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(source)
    }
}
