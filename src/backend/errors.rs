//! Define error types for model → source emission.
//!
//! Every variant is a contract violation rather than a transient condition: either the front end handed over a node
//! the backend does not render, or the template set shipped with the compiler is broken. None of them are retried.
//!
//! ## Notes
//!
//! - Node errors carry the node kind and a [`Location`] inside the model so the failing declaration can be found
//!   without re-running with extra logging.
//! - The enum derives [`miette::Diagnostic`] so the CLI can render it with codes and help text.

use std::fmt;
use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

/// Result alias used throughout the backend.
pub type CodegenResult<T> = Result<T, CodegenError>;

/// Path to a node inside the model, outermost first (`module app.math > fn add > statement 2`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Location(Vec<String>);

impl Location {
    pub fn root() -> Self {
        Self::default()
    }

    /// Return a copy extended by one segment.
    pub fn join(&self, segment: impl fmt::Display) -> Self {
        let mut segments = self.0.clone();
        segments.push(segment.to_string());
        Self(segments)
    }

    pub fn segments(&self) -> &[String] {
        &self.0
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            write!(f, "<program>")
        } else {
            write!(f, "{}", self.0.join(" > "))
        }
    }
}

/// Error during code generation.
#[derive(Debug, Clone, Error, Diagnostic)]
pub enum CodegenError {
    #[error("unsupported literal kind `{kind}` at {location}")]
    #[diagnostic(
        code(letlang::codegen::unsupported_literal),
        help("the front end produced a literal this backend has no rendering for")
    )]
    UnsupportedLiteralKind { kind: &'static str, location: Location },

    #[error("unsupported type shape `{shape}` at {location}")]
    #[diagnostic(
        code(letlang::codegen::unsupported_type),
        help("only primitive, named, parametric and function types can be emitted")
    )]
    UnsupportedTypeShape { shape: &'static str, location: Location },

    #[error("unsupported statement kind `{kind}` at {location}")]
    #[diagnostic(code(letlang::codegen::unsupported_statement))]
    UnsupportedStatementKind { kind: &'static str, location: Location },

    #[error("missing entry point: {reason}")]
    #[diagnostic(
        code(letlang::codegen::missing_entry_point),
        help("declare an entry point naming a function in an existing module")
    )]
    MissingEntryPoint { reason: String },

    #[error("template `{name}` not found in the template set")]
    #[diagnostic(code(letlang::templates::not_found))]
    TemplateNotFound { name: String },

    #[error("template `{template}` references slot `{slot}` which the context does not bind")]
    #[diagnostic(code(letlang::templates::unbound_variable))]
    UnboundTemplateVariable { template: String, slot: String },

    #[error("template `{template}` references slot `{slot}` which its renderer never binds")]
    #[diagnostic(
        code(letlang::templates::undeclared_slot),
        help("templates may only use the slots listed in the template manifest")
    )]
    UndeclaredTemplateSlot { template: String, slot: String },

    #[error("template `{name}` is malformed: {message}")]
    #[diagnostic(code(letlang::templates::syntax))]
    TemplateSyntax { name: String, message: String },

    #[error("rendering template `{template}` failed: {message}")]
    #[diagnostic(code(letlang::templates::render))]
    TemplateRender { template: String, message: String },

    #[error("output path `{}` is produced twice", .path.display())]
    #[diagnostic(code(letlang::codegen::duplicate_output))]
    DuplicateOutputPath { path: PathBuf },

    #[error("invalid output path `{}`: {reason}", .path.display())]
    #[diagnostic(code(letlang::codegen::invalid_output))]
    InvalidOutputPath { path: PathBuf, reason: &'static str },

    #[error("generated `{}` is not valid Rust: {message}", .path.display())]
    #[diagnostic(code(letlang::codegen::format))]
    Format { path: PathBuf, message: String },
}
