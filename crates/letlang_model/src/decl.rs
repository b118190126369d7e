//! Module-level declarations.

use serde::{Deserialize, Serialize};

use crate::literal::Literal;
use crate::path::ModulePath;
use crate::stmt::Statement;
use crate::types::TypeExpr;

/// A module-level declaration. Modules keep these in one ordered sequence so the relative order of types,
/// functions and bindings survives into the emitted file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Declaration {
    Type(TypeDecl),
    Function(Function),
    Use(UseDecl),
}

impl Declaration {
    pub fn name(&self) -> &str {
        match self {
            Declaration::Type(t) => &t.name,
            Declaration::Function(f) => &f.name,
            Declaration::Use(u) => u.bound_name(),
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Declaration::Type(_) => "type",
            Declaration::Function(_) => "function",
            Declaration::Use(_) => "use",
        }
    }
}

impl From<TypeDecl> for Declaration {
    fn from(t: TypeDecl) -> Self {
        Declaration::Type(t)
    }
}

impl From<Function> for Declaration {
    fn from(f: Function) -> Self {
        Declaration::Function(f)
    }
}

impl From<UseDecl> for Declaration {
    fn from(u: UseDecl) -> Self {
        Declaration::Use(u)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeDecl {
    pub name: String,
    #[serde(default)]
    pub public: bool,
    #[serde(default)]
    pub type_params: Vec<String>,
    pub kind: TypeDeclKind,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeDeclKind {
    Alias(TypeExpr),
    Record(Vec<FieldDecl>),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDecl {
    pub name: String,
    pub ty: TypeExpr,
    /// Default value used when the field is omitted at construction.
    #[serde(default)]
    pub default: Option<Literal>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Param {
    pub name: String,
    pub ty: TypeExpr,
}

impl Param {
    pub fn new(name: impl Into<String>, ty: impl Into<TypeExpr>) -> Self {
        Self {
            name: name.into(),
            ty: ty.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Function {
    pub name: String,
    #[serde(default)]
    pub public: bool,
    #[serde(default)]
    pub type_params: Vec<String>,
    #[serde(default)]
    pub params: Vec<Param>,
    pub return_type: TypeExpr,
    #[serde(default)]
    pub body: Vec<Statement>,
}

impl Function {
    pub fn new(name: impl Into<String>, return_type: impl Into<TypeExpr>) -> Self {
        Self {
            name: name.into(),
            public: false,
            type_params: Vec::new(),
            params: Vec::new(),
            return_type: return_type.into(),
            body: Vec::new(),
        }
    }

    pub fn public(mut self) -> Self {
        self.public = true;
        self
    }

    pub fn with_param(mut self, param: Param) -> Self {
        self.params.push(param);
        self
    }

    pub fn with_type_param(mut self, name: impl Into<String>) -> Self {
        self.type_params.push(name.into());
        self
    }

    pub fn with_body(mut self, body: Vec<Statement>) -> Self {
        self.body = body;
        self
    }
}

/// Module-level binding of another module's item under a local name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UseDecl {
    pub module: ModulePath,
    /// Item inside `module`; `None` binds the module itself.
    #[serde(default)]
    pub item: Option<String>,
    #[serde(default)]
    pub alias: Option<String>,
    #[serde(default)]
    pub public: bool,
}

impl UseDecl {
    /// The name this binding introduces into the enclosing module.
    pub fn bound_name(&self) -> &str {
        self.alias
            .as_deref()
            .or(self.item.as_deref())
            .or_else(|| self.module.last())
            .unwrap_or_default()
    }
}
