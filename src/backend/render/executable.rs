//! `src/main.rs` bootstrap for programs with an entry point.
//!
//! The binary target calls the entry function through the package's library crate, so every module is compiled once
//! and shared by both targets.

use super::module::banner;
use super::{ExecutableRendering, RenderCx};
use crate::backend::errors::{CodegenError, CodegenResult};
use crate::backend::fragment::Fragment;
use crate::backend::naming::escape_ident;
use crate::backend::templates::TemplateContext;

#[derive(Debug, Clone, Copy, Default)]
pub struct ExecutableRenderer;

impl ExecutableRendering for ExecutableRenderer {
    fn render_executable(&self, cx: &RenderCx<'_>) -> CodegenResult<Fragment> {
        let Some(entry) = &cx.model.entry_point else {
            return Err(CodegenError::MissingEntryPoint {
                reason: "the program declares no entry point".to_string(),
            });
        };
        let Some(module) = cx.model.module(&entry.module) else {
            return Err(CodegenError::MissingEntryPoint {
                reason: format!("entry point `{}` names unknown module `{}`", entry, entry.module),
            });
        };
        if module.function(&entry.function).is_none() {
            return Err(CodegenError::MissingEntryPoint {
                reason: format!("module `{}` has no function `{}`", entry.module, entry.function),
            });
        }

        let path = std::iter::once(escape_ident(&cx.package.crate_ident))
            .chain(entry.module.segments().iter().map(|s| escape_ident(s)))
            .chain(std::iter::once(escape_ident(&entry.function)))
            .collect::<Vec<_>>()
            .join("::");

        let text = cx.render(
            "executable/main",
            TemplateContext::new()
                .bind("header", banner(cx, &format!("entry point {}", entry))?)
                .bind("entry", path),
        )?;
        tracing::debug!(entry = %entry, "rendered executable bootstrap");
        Ok(Fragment::file("src/main.rs", text))
    }
}
