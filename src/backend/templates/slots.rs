//! Extract the slots a template source references.
//!
//! Bundled templates only use plain `{{slot}}` mustaches, so the scan is exact: anything else inside `{{ }}` is
//! rejected as a syntax error.

use std::collections::BTreeSet;

use crate::backend::errors::{CodegenError, CodegenResult};

pub(super) fn scan(name: &str, source: &str) -> CodegenResult<BTreeSet<String>> {
    let mut slots = BTreeSet::new();
    let mut rest = source;
    while let Some(start) = rest.find("{{") {
        let after = &rest[start + 2..];
        let Some(end) = after.find("}}") else {
            return Err(syntax(name, "unclosed `{{`".to_string()));
        };
        let inner = after[..end].trim_matches(|c| c == '{' || c == '~').trim();
        if !is_slot_name(inner) {
            return Err(syntax(name, format!("`{inner}` is not a plain slot reference")));
        }
        slots.insert(inner.to_string());
        rest = after[end + 2..].trim_start_matches('}');
    }
    Ok(slots)
}

fn is_slot_name(s: &str) -> bool {
    let mut chars = s.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

fn syntax(name: &str, message: String) -> CodegenError {
    CodegenError::TemplateSyntax {
        name: name.to_string(),
        message,
    }
}
