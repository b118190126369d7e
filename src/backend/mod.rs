//! letlang compiler backend
//!
//! This module turns a resolved [`letlang_model::Model`] into the files of a Rust project.
//!
//! The pipeline is:
//! 1. [`CodeGenerator`] resolves the package and builds a [`RenderCx`]
//! 2. the rendering capabilities in [`render`] produce fragments through the named templates in [`templates`]
//! 3. fragments are collected into a [`WriteSet`], optionally pretty-printed by [`format`]
//!
//! Nothing in the backend touches the filesystem; persisting the write-set is the caller's job.
//!
//! ## Module Organization
//!
//! - `codegen.rs` - The orchestrator and its `generate` pass
//! - `render/` - One capability trait and standard renderer per concern
//! - `templates/` - Bundled template set, slot manifest and load-time validation
//! - `naming.rs` - Keyword escaping, paths and import aliases
//! - `layout.rs` - Module to file mapping
//! - `fragment.rs` - Fragments and the write-set
//! - `options.rs` - Typed emission options
//! - `errors.rs` - `CodegenError`

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

pub mod codegen;
pub mod errors;
pub mod format;
pub mod fragment;
pub mod layout;
pub mod naming;
pub mod options;
pub mod render;
pub mod templates;

pub use codegen::CodeGenerator;
pub use errors::{CodegenError, CodegenResult, Location};
pub use fragment::{Fragment, OutputFile, WriteSet};
pub use options::EmitOptions;
pub use render::{RenderCx, Renderers};
pub use templates::{TemplateContext, TemplateSet};
