//! Function definitions.

use letlang_model::Function;

use super::{FunctionRendering, RenderCx};
use crate::backend::errors::CodegenResult;
use crate::backend::fragment::Fragment;
use crate::backend::naming::{escape_ident, generics, indent, visibility};
use crate::backend::templates::TemplateContext;

#[derive(Debug, Clone, Copy, Default)]
pub struct FunctionRenderer;

impl FunctionRendering for FunctionRenderer {
    #[tracing::instrument(level = "trace", skip_all, fields(function = %function.name))]
    fn render_function(&self, cx: &RenderCx<'_>, function: &Function) -> CodegenResult<Fragment> {
        let cx = cx.at(format!("fn {}", function.name));

        let params = function
            .params
            .iter()
            .map(|param| {
                let ty = cx.at(format!("parameter {}", param.name)).ty(&param.ty)?;
                cx.render(
                    "function/param",
                    TemplateContext::new().bind("name", escape_ident(&param.name)).bind("ty", ty),
                )
            })
            .collect::<CodegenResult<Vec<_>>>()?;
        let return_type = cx.at("return type").ty(&function.return_type)?;
        let body = indent(&cx.block(&function.body)?);

        let text = cx.render(
            "function/definition",
            TemplateContext::new()
                .bind("visibility", visibility(function.public || cx.is_entry_point(&function.name)))
                .bind("name", escape_ident(&function.name))
                .bind("generics", generics(&function.type_params))
                .bind("params", params.join(", "))
                .bind("return_type", return_type)
                .bind("body", body),
        )?;
        Ok(Fragment::inline(text))
    }
}
