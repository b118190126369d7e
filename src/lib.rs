#![forbid(unsafe_code)]
//! letlang compiler backend
//!
//! Turns a resolved letlang program ([`letlang_model::Model`]) into the files of a Rust project: a `Cargo.toml`, a
//! library crate with one module file per letlang module, and a `main.rs` when the program has an entry point.
//!
//! ```rust,ignore
//! use letlang_compiler::backend::CodeGenerator;
//! use letlang_compiler::config::Config;
//!
//! let write_set = CodeGenerator::new(&model, &Config::new("out"))?.generate()?;
//! ```
//!
//! ## Panic Policy
//!
//! This codebase follows explicit error handling:
//!
//! - **Production code**: Use `Result` or `Option` with `?` / `ok_or` / `map_err`. The `cli` and `backend` modules
//!   enforce `#![deny(clippy::unwrap_used)]`.
//!
//! - **Test code**: `.unwrap()` and `.expect()` are acceptable in tests.

pub mod backend;
pub mod cli;
pub mod config;
pub mod version;

pub use backend::{CodeGenerator, CodegenError, CodegenResult, WriteSet};
pub use config::Config;
pub use letlang_model as model;
