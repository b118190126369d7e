//! Optional pretty-printing of emitted Rust files.
//!
//! Files are parsed with `syn` and printed back with `prettyplease`. Parsing doubles as a syntax check: a file that
//! does not parse is reported as [`CodegenError::Format`] instead of being written.

use std::path::Path;

use super::errors::{CodegenError, CodegenResult};
use super::fragment::WriteSet;

/// Format one Rust source file.
pub fn format_rust(path: &Path, source: &str) -> CodegenResult<String> {
    let file = syn::parse_file(source).map_err(|e| CodegenError::Format {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    Ok(prettyplease::unparse(&file))
}

/// Format every `.rs` file of the write-set in place.
pub fn format_write_set(write_set: &mut WriteSet) -> CodegenResult<()> {
    for file in write_set.files_mut() {
        if file.path.extension().is_some_and(|ext| ext == "rs") {
            file.contents = format_rust(&file.path, &file.contents)?;
        }
    }
    Ok(())
}
