//! Where modules land in the emitted crate.
//!
//! Module `a.b` becomes `src/a/b.rs`, or `src/a/b/mod.rs` when other modules live below it. The module with the empty
//! path is the crate root and lands in `src/lib.rs`. Directories that only exist to hold nested modules (no module of
//! their own) get a namespace `mod.rs` from the project renderer.
//!
//! All listings are sorted so the layout is a pure function of the model.

use std::collections::BTreeSet;
use std::path::PathBuf;

use letlang_model::{Model, ModulePath};

pub const CRATE_ROOT: &str = "src/lib.rs";

/// Distinct next segments of every module strictly below `parent` (top-level names for the empty path).
pub fn child_segments(model: &Model, parent: &ModulePath) -> BTreeSet<String> {
    let depth = parent.segments().len();
    model
        .modules
        .iter()
        .filter(|m| parent.is_ancestor_of(&m.path))
        .map(|m| m.path.segments()[depth].clone())
        .collect()
}

/// Whether the model declares a module at the crate root.
pub fn has_root_module(model: &Model) -> bool {
    model.modules.iter().any(|m| m.path.is_empty())
}

/// Ancestor paths that have no module of their own.
pub fn namespaces(model: &Model) -> BTreeSet<ModulePath> {
    let declared: BTreeSet<&ModulePath> = model.modules.iter().map(|m| &m.path).collect();
    let mut namespaces = BTreeSet::new();
    for module in &model.modules {
        let segments = module.path.segments();
        for len in 1..segments.len() {
            let ancestor = ModulePath(segments[..len].to_vec());
            if !declared.contains(&ancestor) {
                namespaces.insert(ancestor);
            }
        }
    }
    namespaces
}

/// Output path of the file that holds `path`.
pub fn module_file(model: &Model, path: &ModulePath) -> PathBuf {
    if path.is_empty() {
        return PathBuf::from(CRATE_ROOT);
    }
    let mut file = PathBuf::from("src");
    let segments = path.segments();
    if child_segments(model, path).is_empty() {
        for segment in &segments[..segments.len().saturating_sub(1)] {
            file.push(segment);
        }
        file.push(format!("{}.rs", path.last().unwrap_or("lib")));
    } else {
        for segment in segments {
            file.push(segment);
        }
        file.push("mod.rs");
    }
    file
}
