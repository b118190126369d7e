//! Module paths and resolved references.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A dotted module path such as `app.math`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ModulePath(pub Vec<String>);

impl ModulePath {
    pub fn new<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(segments.into_iter().map(Into::into).collect())
    }

    /// Split a dotted path. Empty segments are dropped.
    pub fn parse(dotted: &str) -> Self {
        Self::new(dotted.split('.').filter(|s| !s.is_empty()))
    }

    pub fn segments(&self) -> &[String] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn last(&self) -> Option<&str> {
        self.0.last().map(String::as_str)
    }

    /// Whether `self` is a strict ancestor of `other`.
    pub fn is_ancestor_of(&self, other: &ModulePath) -> bool {
        self.0.len() < other.0.len() && other.0.starts_with(&self.0)
    }
}

impl fmt::Display for ModulePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.join("."))
    }
}

/// A resolved name.
///
/// `module` is `None` for names bound locally (parameters, `let` bindings, type parameters, builtin type
/// constructors) and `Some` for declarations that live at module level.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Reference {
    #[serde(default)]
    pub module: Option<ModulePath>,
    pub name: String,
}

impl Reference {
    pub fn local(name: impl Into<String>) -> Self {
        Self {
            module: None,
            name: name.into(),
        }
    }

    pub fn declared_in(module: ModulePath, name: impl Into<String>) -> Self {
        Self {
            module: Some(module),
            name: name.into(),
        }
    }
}

impl fmt::Display for Reference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.module {
            Some(module) => write!(f, "{}.{}", module, self.name),
            None => write!(f, "{}", self.name),
        }
    }
}
