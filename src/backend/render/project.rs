//! Project scaffold: `Cargo.toml`, the crate root and namespace `mod.rs` files.
//!
//! Generates:
//! - `Cargo.toml` with the configured dependencies and, for executable programs, a `[[bin]]` target
//! - `src/lib.rs` declaring every top-level module, unless the model has a root module, which renders the crate root
//!   itself
//! - `src/<dir>/mod.rs` for directories that only exist to hold nested modules

use std::collections::BTreeSet;

use letlang_model::{Model, ModulePath};

use super::module::{banner, submodules};
use super::{ProjectRendering, RenderCx};
use crate::backend::errors::CodegenResult;
use crate::backend::fragment::Fragment;
use crate::backend::layout;
use crate::backend::templates::TemplateContext;
use crate::config::Config;
use crate::version::LETLANG_VERSION;

const FALLBACK_PACKAGE_NAME: &str = "letlang_program";

/// Name of the generated package and the identifier other code uses for its library crate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Package {
    pub name: String,
    pub crate_ident: String,
}

impl Package {
    /// Take the name from the model, else from the last component of the target directory.
    pub fn resolve(model: &Model, config: &Config) -> Self {
        let raw = if model.name.trim().is_empty() {
            config
                .target_dir
                .file_name()
                .and_then(|n| n.to_str())
                .unwrap_or(FALLBACK_PACKAGE_NAME)
                .to_string()
        } else {
            model.name.clone()
        };
        let name = sanitize_package_name(&raw);
        let crate_ident = name.replace('-', "_");
        Self { name, crate_ident }
    }
}

fn sanitize_package_name(raw: &str) -> String {
    let name: String = raw
        .trim()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
        .collect();
    match name.chars().next() {
        None => FALLBACK_PACKAGE_NAME.to_string(),
        Some(c) if c.is_ascii_digit() => format!("letlang_{}", name),
        Some(_) => name,
    }
}

/// Manifest line for one dependency.
///
/// Uses a default version mapping for common crates; `name@version` pins override it and unknown crates use `*`.
fn dependency_line(name: &str, pin: Option<&str>) -> String {
    if let Some(version) = pin {
        return format!("{} = \"{}\"", name, version);
    }
    let spec = match name {
        "serde" => r#"{ version = "1.0", features = ["derive"] }"#,
        "serde_json" => r#""1.0""#,
        "tokio" => r#"{ version = "1", features = ["rt-multi-thread", "macros", "time", "sync"] }"#,
        "chrono" => r#"{ version = "0.4", features = ["serde"] }"#,
        "uuid" => r#"{ version = "1.0", features = ["v4", "serde"] }"#,
        "rand" => r#""0.8""#,
        "regex" => r#""1.0""#,
        "anyhow" => r#""1.0""#,
        "thiserror" => r#""2.0""#,
        "tracing" => r#""0.1""#,
        "log" => r#""0.4""#,
        "itertools" => r#""0.12""#,
        _ => r#""*""#,
    };
    format!("{} = {}", name, spec)
}

/// Manifest `[dependencies]` body: configured order, first occurrence of each crate wins.
fn dependencies(config: &Config) -> String {
    let mut seen = BTreeSet::new();
    let mut lines = Vec::new();
    for entry in &config.dependencies {
        let entry = entry.trim();
        let (name, pin) = match entry.split_once('@') {
            Some((name, version)) => (name.trim(), Some(version.trim()).filter(|v| !v.is_empty())),
            None => (entry, None),
        };
        if name.is_empty() || !seen.insert(name) {
            continue;
        }
        lines.push(dependency_line(name, pin));
    }
    if lines.is_empty() {
        "# No additional dependencies".to_string()
    } else {
        lines.join("\n")
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ProjectRenderer;

impl ProjectRenderer {
    fn manifest(&self, cx: &RenderCx<'_>, config: &Config) -> CodegenResult<Fragment> {
        let targets = match cx.model.entry_point {
            Some(_) => cx.render("project/bin_target", TemplateContext::new().bind("name", cx.package.name.as_str()))?,
            None => String::new(),
        };
        let text = cx.render(
            "project/manifest",
            TemplateContext::new()
                .bind("name", cx.package.name.as_str())
                .bind("version", cx.options.package_version.as_str())
                .bind("edition", cx.options.edition.as_str())
                .bind("compiler_version", LETLANG_VERSION)
                .bind("dependencies", dependencies(config))
                .bind("lib_name", cx.package.crate_ident.as_str())
                .bind("targets", targets),
        )?;
        Ok(Fragment::file("Cargo.toml", text))
    }

    fn crate_root(&self, cx: &RenderCx<'_>) -> CodegenResult<Fragment> {
        let top_level = layout::child_segments(cx.model, &ModulePath::default());
        let text = cx.render(
            "project/crate_root",
            TemplateContext::new()
                .bind("header", banner(cx, &format!("program {}", cx.package.name))?)
                .bind("modules", submodules(cx, &top_level)?),
        )?;
        Ok(Fragment::file(layout::CRATE_ROOT, text))
    }
}

impl ProjectRendering for ProjectRenderer {
    #[tracing::instrument(skip_all, fields(package = %cx.package.name))]
    fn render_project(&self, cx: &RenderCx<'_>, config: &Config) -> CodegenResult<Vec<Fragment>> {
        let mut fragments = vec![self.manifest(cx, config)?];
        if !layout::has_root_module(cx.model) {
            fragments.push(self.crate_root(cx)?);
        }

        for namespace in layout::namespaces(cx.model) {
            let children = layout::child_segments(cx.model, &namespace);
            let text = cx.render(
                "project/namespace",
                TemplateContext::new().bind("modules", submodules(cx, &children)?),
            )?;
            let mut path = std::path::PathBuf::from("src");
            path.extend(namespace.segments());
            path.push("mod.rs");
            fragments.push(Fragment::file(path, text));
        }

        tracing::debug!(files = fragments.len(), "rendered project scaffold");
        Ok(fragments)
    }
}
