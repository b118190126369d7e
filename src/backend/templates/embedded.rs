//! Bundled template sources and their slot manifest.
//!
//! Sources are embedded at compile time with [`include_str!`]; the paths are relative to this file and checked by the
//! compiler. Each entry also lists the slots its renderer binds. A template may use any subset of those slots, never
//! anything else (enforced when the set is loaded).
//!
//! **Warning**: files under `templates/rust/` and the entries below must stay in sync.

/// One template of the manifest.
#[derive(Debug, Clone, Copy)]
pub struct TemplateSpec {
    /// Lookup name used by renderers (`stmt/return`).
    pub name: &'static str,
    /// Slots the owning renderer binds.
    pub slots: &'static [&'static str],
    /// Source of the bundled Rust dialect.
    pub source: &'static str,
}

macro_rules! bundled {
    ($($name:literal => [$($slot:literal),* $(,)?]),* $(,)?) => {
        &[$(TemplateSpec {
            name: $name,
            slots: &[$($slot),*],
            source: include_str!(concat!("../../../templates/rust/", $name, ".hbs")),
        }),*]
    };
}

/// Every template a standard renderer asks for.
pub const MANIFEST: &[TemplateSpec] = bundled! {
    "literal/integer" => ["value"],
    "literal/float" => ["value"],
    "literal/boolean" => ["value"],
    "literal/string" => ["value"],
    "literal/list" => ["items"],
    "literal/record" => ["ty", "fields"],
    "type/named" => ["path"],
    "type/parametric" => ["base", "args"],
    "type/function" => ["params", "ret"],
    "type/alias" => ["visibility", "name", "generics", "target"],
    "type/record" => ["visibility", "name", "generics", "fields"],
    "type/field" => ["visibility", "name", "ty"],
    "type/constructor" => ["generics", "name", "params", "inits"],
    "expr/call" => ["callee", "args"],
    "expr/binary" => ["lhs", "op", "rhs"],
    "expr/unary" => ["op", "operand"],
    "stmt/expression" => ["expr"],
    "stmt/assign" => ["target", "value"],
    "stmt/let" => ["binding", "annotation", "value"],
    "stmt/conditional" => ["condition", "body", "alternatives"],
    "stmt/else_if" => ["condition", "body"],
    "stmt/else" => ["body"],
    "stmt/block" => ["body"],
    "stmt/loop" => ["condition", "body"],
    "stmt/return" => ["value"],
    "function/definition" => ["visibility", "name", "generics", "params", "return_type", "body"],
    "function/param" => ["name", "ty"],
    "module/banner" => ["compiler", "version", "source"],
    "module/submodule" => ["name"],
    "module/use" => ["visibility", "path", "alias"],
    "module/file" => ["header", "declarations"],
    "project/manifest" => ["name", "version", "edition", "compiler_version", "dependencies", "lib_name", "targets"],
    "project/bin_target" => ["name"],
    "project/crate_root" => ["header", "modules"],
    "project/namespace" => ["modules"],
    "executable/main" => ["header", "entry"],
};

/// Look up the manifest entry for a template name.
pub fn spec(name: &str) -> Option<&'static TemplateSpec> {
    MANIFEST.iter().find(|t| t.name == name)
}
