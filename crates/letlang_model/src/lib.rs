#![forbid(unsafe_code)]
//! Resolved program model for the letlang compiler.
//!
//! The model is the hand-off point between the front end (lexing, parsing, name and type resolution) and the code
//! generator. By the time a [`Model`] exists:
//!
//! - every [`Reference`] resolves to a declaration elsewhere in the same model,
//! - the module graph is acyclic,
//! - the tree itself contains no cycles.
//!
//! The backend trusts these invariants and never re-validates them.
//!
//! ## Closed sets
//!
//! Some variants exist because the front end can produce them, while the code generator deliberately does not render
//! them (for example [`Literal::Atom`] or [`TypeExpr::Union`]). Every enum exposes a `kind()` name so the backend can
//! report exactly which node it refused.

mod decl;
mod expr;
mod literal;
mod path;
mod stmt;
mod types;

pub use decl::{Declaration, FieldDecl, Function, Param, TypeDecl, TypeDeclKind, UseDecl};
pub use expr::{BinaryOp, Expr, UnaryOp};
pub use literal::Literal;
pub use path::{ModulePath, Reference};
pub use stmt::{CondBranch, Statement};
pub use types::{Primitive, TypeExpr};

use serde::{Deserialize, Serialize};

/// A whole resolved program.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Model {
    /// Program name (used for the generated package name).
    #[serde(default)]
    pub name: String,
    /// Modules in declaration order.
    #[serde(default)]
    pub modules: Vec<Module>,
    /// Designated entry point, if the program is executable.
    #[serde(default)]
    pub entry_point: Option<EntryPoint>,
}

impl Model {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            modules: Vec::new(),
            entry_point: None,
        }
    }

    pub fn with_module(mut self, module: Module) -> Self {
        self.modules.push(module);
        self
    }

    pub fn with_entry_point(mut self, module: ModulePath, function: impl Into<String>) -> Self {
        self.entry_point = Some(EntryPoint {
            module,
            function: function.into(),
        });
        self
    }

    /// Look up a module by its full path.
    pub fn module(&self, path: &ModulePath) -> Option<&Module> {
        self.modules.iter().find(|m| &m.path == path)
    }
}

/// A module and its ordered declarations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Module {
    pub path: ModulePath,
    #[serde(default)]
    pub declarations: Vec<Declaration>,
}

impl Module {
    pub fn new(path: ModulePath) -> Self {
        Self {
            path,
            declarations: Vec::new(),
        }
    }

    pub fn with_declaration(mut self, decl: impl Into<Declaration>) -> Self {
        self.declarations.push(decl.into());
        self
    }

    /// Find a function declared directly in this module.
    pub fn function(&self, name: &str) -> Option<&Function> {
        self.declarations.iter().find_map(|d| match d {
            Declaration::Function(f) if f.name == name => Some(f),
            _ => None,
        })
    }
}

/// The function a runnable program starts from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryPoint {
    pub module: ModulePath,
    pub function: String,
}

impl std::fmt::Display for EntryPoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}", self.module, self.function)
    }
}
