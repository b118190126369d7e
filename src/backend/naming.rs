//! Identifier and path conventions of the emitted Rust.
//!
//! - Identifiers that collide with Rust keywords are emitted as raw identifiers (`r#type`).
//! - Declarations of other modules are reached through a `use crate::...` import whose alias is the module's last
//!   segment, or the full path joined with `_` when that segment is ambiguous inside the importing module. A joined
//!   alias that is still taken gets a numeric suffix. Direct child modules are reached through their own name.

use std::collections::{BTreeMap, BTreeSet};

use letlang_model::ModulePath;

/// Reserved + strict keywords in Rust.
pub const RUST_KEYWORDS: &[&str] = &[
    "as", "break", "const", "continue", "crate", "else", "enum", "extern", "false", "fn", "for", "if", "impl", "in",
    "let", "loop", "match", "mod", "move", "mut", "pub", "ref", "return", "static", "struct", "super", "trait", "true",
    "type", "unsafe", "use", "where", "while", "async", "await", "dyn", "abstract", "become", "box", "do", "final",
    "macro", "override", "priv", "typeof", "unsized", "virtual", "yield", "try", "gen",
];

/// Escape Rust keywords by adding the `r#` prefix.
///
/// `self`, `Self`, `super` and `crate` cannot be raw identifiers and are returned unchanged.
pub fn escape_ident(name: &str) -> String {
    if matches!(name, "self" | "Self" | "super" | "crate") {
        return name.to_string();
    }
    if RUST_KEYWORDS.contains(&name) {
        return format!("r#{}", name);
    }
    name.to_string()
}

/// `crate::a::b` for module path `a.b`.
pub fn crate_path(module: &ModulePath) -> String {
    std::iter::once("crate".to_string())
        .chain(module.segments().iter().map(|s| escape_ident(s)))
        .collect::<Vec<_>>()
        .join("::")
}

pub fn visibility(public: bool) -> &'static str {
    if public { "pub " } else { "" }
}

/// `<A, B>` or the empty string.
pub fn generics(params: &[String]) -> String {
    if params.is_empty() {
        String::new()
    } else {
        let names: Vec<String> = params.iter().map(|p| escape_ident(p)).collect();
        format!("<{}>", names.join(", "))
    }
}

/// Indent every non-empty line by four spaces.
pub fn indent(text: &str) -> String {
    text.lines()
        .map(|line| if line.is_empty() { String::new() } else { format!("    {}", line) })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Aliases under which one module reaches the other modules it references.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportTable {
    aliases: BTreeMap<ModulePath, String>,
    /// Direct children, already in scope through their `pub mod` line.
    submodules: BTreeSet<ModulePath>,
}

impl ImportTable {
    /// Assign an alias to every referenced module except `current`.
    ///
    /// `local_names` are the names declared in the importing module; an alias never shadows one of them.
    pub fn build(current: &ModulePath, referenced: &BTreeSet<ModulePath>, local_names: &BTreeSet<String>) -> Self {
        let others: Vec<&ModulePath> = referenced.iter().filter(|m| *m != current && !m.is_empty()).collect();

        let mut last_segment_uses: BTreeMap<&str, usize> = BTreeMap::new();
        for module in &others {
            if let Some(last) = module.last() {
                *last_segment_uses.entry(last).or_default() += 1;
            }
        }

        let ambiguous =
            |last: &str| last_segment_uses.get(last).copied().unwrap_or(0) > 1 || local_names.contains(last);

        let depth = current.segments().len();
        let submodules: BTreeSet<ModulePath> = others
            .iter()
            .filter(|m| m.segments().len() == depth + 1 && current.is_ancestor_of(m))
            .map(|m| (*m).clone())
            .collect();

        // Plain last-segment aliases are claimed first; joined aliases then take the next free name.
        let mut taken: BTreeSet<String> = local_names.clone();
        let mut aliases: BTreeMap<ModulePath, String> = submodules
            .iter()
            .map(|m| (m.clone(), m.last().unwrap_or_default().to_string()))
            .collect();
        for module in &others {
            let last = module.last().unwrap_or_default();
            if !submodules.contains(*module) && !ambiguous(last) {
                taken.insert(last.to_string());
                aliases.insert((*module).clone(), last.to_string());
            }
        }
        for module in &others {
            if aliases.contains_key(*module) {
                continue;
            }
            let joined = module.segments().join("_");
            let mut alias = joined.clone();
            let mut n = 2;
            while taken.contains(&alias) {
                alias = format!("{}_{}", joined, n);
                n += 1;
            }
            taken.insert(alias.clone());
            aliases.insert((*module).clone(), alias);
        }
        Self { aliases, submodules }
    }

    pub fn alias(&self, module: &ModulePath) -> Option<&str> {
        self.aliases.get(module).map(String::as_str)
    }

    /// `(module, alias)` pairs that need a `use` line, in module path order.
    pub fn iter(&self) -> impl Iterator<Item = (&ModulePath, &str)> {
        self.aliases
            .iter()
            .filter(|(m, _)| !self.submodules.contains(*m))
            .map(|(m, a)| (m, a.as_str()))
    }
}
