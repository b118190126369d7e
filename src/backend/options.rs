//! Typed view over [`Config::options`](crate::config::Config).

use crate::config::{Config, OptionValue};

const KNOWN_OPTIONS: &[&str] = &["format", "parallel", "banner", "edition", "package_version"];

/// Emission options understood by the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmitOptions {
    /// Pretty-print every emitted `.rs` file (parsed with `syn`, printed with `prettyplease`).
    pub format: bool,
    /// Render modules on the rayon pool.
    pub parallel: bool,
    /// Prefix generated Rust files with a "do not edit" banner.
    pub banner: bool,
    /// Rust edition written to the manifest.
    pub edition: String,
    /// Version written to the manifest.
    pub package_version: String,
}

impl Default for EmitOptions {
    fn default() -> Self {
        Self {
            format: false,
            parallel: false,
            banner: true,
            edition: "2021".to_string(),
            package_version: "0.1.0".to_string(),
        }
    }
}

impl EmitOptions {
    /// Read options from the config. Unknown names and mistyped values are ignored with a warning.
    pub fn from_config(config: &Config) -> Self {
        let mut options = Self::default();
        for (name, value) in &config.options {
            match (name.as_str(), value) {
                ("format", OptionValue::Bool(v)) => options.format = *v,
                ("parallel", OptionValue::Bool(v)) => options.parallel = *v,
                ("banner", OptionValue::Bool(v)) => options.banner = *v,
                ("edition", OptionValue::String(v)) => options.edition = v.clone(),
                ("edition", OptionValue::Integer(v)) => options.edition = v.to_string(),
                ("package_version", OptionValue::String(v)) => options.package_version = v.clone(),
                (name, value) if KNOWN_OPTIONS.contains(&name) => {
                    tracing::warn!(option = name, ?value, "ignoring emission option with unexpected type");
                }
                (name, _) => tracing::warn!(option = name, "ignoring unknown emission option"),
            }
        }
        options
    }
}
