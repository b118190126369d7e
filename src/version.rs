//! Compiler version information.
//!
//! Exposed as one constant so the CLI, file banners and the generated manifest agree on the same value.

/// The letlang compiler version string (for example, `0.1.0`).
pub const LETLANG_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Name the compiler uses for itself in generated files.
pub const COMPILER_NAME: &str = "letlangc";
