//! Named templates and the resolver that renders them.
//!
//! A [`TemplateSet`] maps template names (`stmt/return`, `project/manifest`, ...) to [Handlebars](https://handlebarsjs.com/)
//! sources. Rendering is a pure function of `(name, context)`:
//!
//! ```rust,ignore
//! let set = TemplateSet::bundled()?;
//! let text = set.render("stmt/return", &TemplateContext::new().bind("value", "x"))?;
//! assert_eq!(text, "return x;");
//! ```
//!
//! ## Template rules
//!
//! - Templates are flat: only `{{slot}}` substitutions, no helpers or blocks. Composition (joining, indentation,
//!   optional pieces) happens in the renderers.
//! - HTML escaping is disabled and strict mode is on.
//! - Manifest templates may only reference slots their renderer binds. This is checked once when the set is loaded,
//!   so a drifted template fails at startup instead of halfway through a generation pass.
//!
//! The bundled set is built on first use and shared process-wide; it is never mutated afterwards.

pub mod embedded;
mod slots;

use std::collections::{BTreeMap, BTreeSet};
use std::sync::LazyLock;

use handlebars::Handlebars;
use serde_json::{Map, Value};

use super::errors::{CodegenError, CodegenResult};
pub use embedded::{MANIFEST, TemplateSpec};

static BUNDLED: LazyLock<CodegenResult<TemplateSet>> =
    LazyLock::new(|| TemplateSet::load(MANIFEST.iter().map(|t| (t.name, t.source))));

/// Slot bindings for one render call.
///
/// Built fresh for every call and consumed by it; nothing carries over between renders.
#[derive(Debug, Clone, Default)]
pub struct TemplateContext {
    values: Map<String, Value>,
}

impl TemplateContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind a slot (builder style).
    pub fn bind(mut self, slot: &str, value: impl Into<Value>) -> Self {
        self.values.insert(slot.to_string(), value.into());
        self
    }

    pub fn contains(&self, slot: &str) -> bool {
        self.values.contains_key(slot)
    }
}

/// A validated, immutable set of templates.
pub struct TemplateSet {
    registry: Handlebars<'static>,
    /// Template name -> slots its source references.
    slots: BTreeMap<String, BTreeSet<String>>,
    sources: BTreeMap<String, String>,
}

impl std::fmt::Debug for TemplateSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TemplateSet").field("templates", &self.slots.keys()).finish()
    }
}

impl TemplateSet {
    /// The Rust dialect shipped with the compiler.
    pub fn bundled() -> CodegenResult<&'static TemplateSet> {
        BUNDLED.as_ref().map_err(Clone::clone)
    }

    /// Load and validate a template set.
    ///
    /// Fails if a manifest template is missing, a source is malformed, or a manifest template references a slot its
    /// renderer never binds. Templates outside the manifest are accepted as-is for custom renderers.
    #[tracing::instrument(skip_all)]
    pub fn load<I, N, S>(sources: I) -> CodegenResult<Self>
    where
        I: IntoIterator<Item = (N, S)>,
        N: Into<String>,
        S: Into<String>,
    {
        let sources: BTreeMap<String, String> = sources.into_iter().map(|(n, s)| (n.into(), s.into())).collect();

        for spec in MANIFEST {
            if !sources.contains_key(spec.name) {
                return Err(CodegenError::TemplateNotFound {
                    name: spec.name.to_string(),
                });
            }
        }

        let mut registry = Handlebars::new();
        registry.set_strict_mode(true);
        registry.register_escape_fn(handlebars::no_escape);

        let mut slots = BTreeMap::new();
        for (name, source) in &sources {
            // Template files end with a newline; the fragment they produce does not.
            let body = source.strip_suffix('\n').unwrap_or(source);
            let referenced = slots::scan(name, body)?;
            if let Some(spec) = embedded::spec(name) {
                if let Some(slot) = referenced.iter().find(|s| !spec.slots.contains(&s.as_str())) {
                    return Err(CodegenError::UndeclaredTemplateSlot {
                        template: name.clone(),
                        slot: slot.clone(),
                    });
                }
            }
            registry
                .register_template_string(name, body)
                .map_err(|e| CodegenError::TemplateSyntax {
                    name: name.clone(),
                    message: e.to_string(),
                })?;
            slots.insert(name.clone(), referenced);
        }

        tracing::debug!(templates = slots.len(), "template set loaded");
        Ok(Self {
            registry,
            slots,
            sources,
        })
    }

    /// Build a new set from this one with some templates replaced or added.
    pub fn with_overrides<I, N, S>(&self, overrides: I) -> CodegenResult<Self>
    where
        I: IntoIterator<Item = (N, S)>,
        N: Into<String>,
        S: Into<String>,
    {
        let mut sources = self.sources.clone();
        for (name, source) in overrides {
            sources.insert(name.into(), source.into());
        }
        Self::load(sources)
    }

    /// Render `name` against `context`.
    pub fn render(&self, name: &str, context: &TemplateContext) -> CodegenResult<String> {
        let slots = self.slots.get(name).ok_or_else(|| CodegenError::TemplateNotFound {
            name: name.to_string(),
        })?;
        if let Some(slot) = slots.iter().find(|s| !context.contains(s)) {
            return Err(CodegenError::UnboundTemplateVariable {
                template: name.to_string(),
                slot: slot.clone(),
            });
        }
        self.registry
            .render(name, &context.values)
            .map_err(|e| CodegenError::TemplateRender {
                template: name.to_string(),
                message: e.to_string(),
            })
    }

    pub fn contains(&self, name: &str) -> bool {
        self.slots.contains_key(name)
    }

    /// Template names with the slots each one references, in name order.
    pub fn templates(&self) -> impl Iterator<Item = (&str, &BTreeSet<String>)> {
        self.slots.iter().map(|(name, slots)| (name.as_str(), slots))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn bundled_sources() -> Vec<(&'static str, &'static str)> {
        MANIFEST.iter().map(|t| (t.name, t.source)).collect()
    }

    #[test]
    fn test_bundled_set_loads() {
        let set = TemplateSet::bundled().unwrap();
        for spec in MANIFEST {
            assert!(set.contains(spec.name), "missing {}", spec.name);
        }
    }

    #[test]
    fn test_render_substitutes_slots_without_escaping() {
        let set = TemplateSet::bundled().unwrap();
        let ctx = TemplateContext::new().bind("value", "a < b && \"c\"");
        assert_eq!(set.render("stmt/return", &ctx).unwrap(), "return a < b && \"c\";");
    }

    #[test]
    fn test_unknown_template_is_not_found() {
        let set = TemplateSet::bundled().unwrap();
        let err = set.render("stmt/goto", &TemplateContext::new()).unwrap_err();
        assert!(matches!(err, CodegenError::TemplateNotFound { name } if name == "stmt/goto"));
    }

    #[test]
    fn test_missing_binding_is_unbound_variable() {
        let set = TemplateSet::bundled().unwrap();
        let ctx = TemplateContext::new().bind("target", "x");
        let err = set.render("stmt/assign", &ctx).unwrap_err();
        assert!(matches!(
            err,
            CodegenError::UnboundTemplateVariable { template, slot } if template == "stmt/assign" && slot == "value"
        ));
    }

    #[test]
    fn test_load_rejects_missing_manifest_template() {
        let sources: Vec<_> = bundled_sources().into_iter().filter(|(n, _)| *n != "stmt/loop").collect();
        let err = TemplateSet::load(sources).unwrap_err();
        assert!(matches!(err, CodegenError::TemplateNotFound { name } if name == "stmt/loop"));
    }

    #[test]
    fn test_load_rejects_undeclared_slot() {
        let set = TemplateSet::bundled().unwrap();
        let err = set
            .with_overrides([("stmt/return", "return {{value}} {{label}};")])
            .unwrap_err();
        assert!(matches!(
            err,
            CodegenError::UndeclaredTemplateSlot { template, slot } if template == "stmt/return" && slot == "label"
        ));
    }

    #[test]
    fn test_override_may_drop_slots() {
        let set = TemplateSet::bundled().unwrap();
        let custom = set.with_overrides([("stmt/return", "return;")]).unwrap();
        assert_eq!(custom.render("stmt/return", &TemplateContext::new()).unwrap(), "return;");
    }

    #[test]
    fn test_extra_templates_are_accepted() {
        let set = TemplateSet::bundled().unwrap();
        let custom = set.with_overrides([("stmt/pass", "{{indent}}pass")]).unwrap();
        let ctx = TemplateContext::new().bind("indent", "  ");
        assert_eq!(custom.render("stmt/pass", &ctx).unwrap(), "  pass");
    }

    #[test]
    fn test_trailing_newline_is_trimmed() {
        let set = TemplateSet::bundled().unwrap();
        let custom = set.with_overrides([("stmt/return", "return {{value}};\n")]).unwrap();
        let ctx = TemplateContext::new().bind("value", "1");
        assert_eq!(custom.render("stmt/return", &ctx).unwrap(), "return 1;");
    }
}
