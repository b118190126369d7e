//! Type expressions.

use serde::{Deserialize, Serialize};

use crate::path::Reference;

/// Builtin scalar types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Primitive {
    Int,
    Float,
    Bool,
    Str,
    Unit,
}

/// A type expression in signature or declaration position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeExpr {
    Primitive(Primitive),
    /// A declared type or a type parameter.
    Named(Reference),
    /// Generic instantiation (`List<int>`, `Pair<K, V>`).
    Parametric { base: Reference, args: Vec<TypeExpr> },
    Function { params: Vec<TypeExpr>, ret: Box<TypeExpr> },
    /// Anonymous union (`oneof`). Not part of the code generator's closed set.
    Union(Vec<TypeExpr>),
}

impl TypeExpr {
    pub fn named(name: impl Into<String>) -> Self {
        Self::Named(Reference::local(name))
    }

    pub fn parametric(base: Reference, args: Vec<TypeExpr>) -> Self {
        Self::Parametric { base, args }
    }

    pub fn function(params: Vec<TypeExpr>, ret: TypeExpr) -> Self {
        Self::Function {
            params,
            ret: Box::new(ret),
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            TypeExpr::Primitive(_) => "primitive",
            TypeExpr::Named(_) => "named",
            TypeExpr::Parametric { .. } => "parametric",
            TypeExpr::Function { .. } => "function",
            TypeExpr::Union(_) => "union",
        }
    }
}

impl From<Primitive> for TypeExpr {
    fn from(p: Primitive) -> Self {
        TypeExpr::Primitive(p)
    }
}
