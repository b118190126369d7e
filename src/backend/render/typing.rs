//! Type emission.
//!
//! Maps the closed set of model type shapes to Rust:
//!
//! | model                       | Rust                         |
//! |-----------------------------|------------------------------|
//! | `int float bool str unit`   | `i64 f64 bool &'static str ()` |
//! | named                       | bare, or through the import alias of its module |
//! | `List<T> Map<K, V> Set<T> Option<T>` | `Vec`, `BTreeMap`, `BTreeSet`, `Option` |
//! | other parametric            | `Name<Args>`                 |
//! | function                    | `fn(A, B) -> R`              |
//!
//! Type declarations become type aliases or `struct`s. Record fields with defaults get a `new` constructor that
//! takes only the fields without one.

use letlang_model::{Primitive, Reference, TypeDecl, TypeDeclKind, TypeExpr};

use super::{RenderCx, TypeRendering};
use crate::backend::errors::{CodegenError, CodegenResult};
use crate::backend::fragment::Fragment;
use crate::backend::naming::{escape_ident, generics, visibility};
use crate::backend::templates::TemplateContext;

#[derive(Debug, Clone, Copy, Default)]
pub struct TypingRenderer;

fn primitive(p: Primitive) -> &'static str {
    match p {
        Primitive::Int => "i64",
        Primitive::Float => "f64",
        Primitive::Bool => "bool",
        Primitive::Str => "&'static str",
        Primitive::Unit => "()",
    }
}

/// Builtin generic constructors, only when referenced without a module.
fn builtin_constructor(base: &Reference) -> Option<&'static str> {
    if base.module.is_some() {
        return None;
    }
    match base.name.as_str() {
        "List" => Some("Vec"),
        "Map" => Some("::std::collections::BTreeMap"),
        "Set" => Some("::std::collections::BTreeSet"),
        "Option" => Some("Option"),
        _ => None,
    }
}

impl TypeRendering for TypingRenderer {
    fn render_type(&self, cx: &RenderCx<'_>, ty: &TypeExpr) -> CodegenResult<String> {
        match ty {
            TypeExpr::Primitive(p) => Ok(primitive(*p).to_string()),
            TypeExpr::Named(reference) => cx.render("type/named", TemplateContext::new().bind("path", cx.reference(reference))),
            TypeExpr::Parametric { base, args } => {
                let base = builtin_constructor(base)
                    .map(str::to_string)
                    .unwrap_or_else(|| cx.reference(base));
                let args = args
                    .iter()
                    .enumerate()
                    .map(|(i, arg)| self.render_type(&cx.at(format!("type argument {}", i + 1)), arg))
                    .collect::<CodegenResult<Vec<_>>>()?;
                cx.render(
                    "type/parametric",
                    TemplateContext::new().bind("base", base).bind("args", args.join(", ")),
                )
            }
            TypeExpr::Function { params, ret } => {
                let params = params
                    .iter()
                    .enumerate()
                    .map(|(i, p)| self.render_type(&cx.at(format!("parameter type {}", i + 1)), p))
                    .collect::<CodegenResult<Vec<_>>>()?;
                let ret = self.render_type(&cx.at("return type"), ret)?;
                cx.render(
                    "type/function",
                    TemplateContext::new().bind("params", params.join(", ")).bind("ret", ret),
                )
            }
            TypeExpr::Union(_) => Err(CodegenError::UnsupportedTypeShape {
                shape: ty.kind(),
                location: cx.location().clone(),
            }),
        }
    }

    fn render_type_decl(&self, cx: &RenderCx<'_>, decl: &TypeDecl) -> CodegenResult<Fragment> {
        let cx = cx.at(format!("type {}", decl.name));
        let name = escape_ident(&decl.name);
        let type_params = generics(&decl.type_params);

        match &decl.kind {
            TypeDeclKind::Alias(target) => {
                let target = self.render_type(&cx, target)?;
                let text = cx.render(
                    "type/alias",
                    TemplateContext::new()
                        .bind("visibility", visibility(decl.public))
                        .bind("name", name)
                        .bind("generics", type_params)
                        .bind("target", target),
                )?;
                Ok(Fragment::inline(text))
            }
            TypeDeclKind::Record(fields) => {
                let mut lines = Vec::with_capacity(fields.len());
                let mut params = Vec::new();
                let mut inits = Vec::new();
                for field in fields {
                    let field_cx = cx.at(format!("field {}", field.name));
                    let field_name = escape_ident(&field.name);
                    let ty = self.render_type(&field_cx, &field.ty)?;
                    match &field.default {
                        Some(default) => {
                            let value = field_cx.literal(default)?;
                            inits.push(format!("{}: {}", field_name, value));
                        }
                        None => {
                            params.push(format!("{}: {}", field_name, ty));
                            inits.push(field_name.clone());
                        }
                    }
                    lines.push(cx.render(
                        "type/field",
                        TemplateContext::new()
                            .bind("visibility", visibility(decl.public))
                            .bind("name", field_name)
                            .bind("ty", ty),
                    )?);
                }

                let mut text = cx.render(
                    "type/record",
                    TemplateContext::new()
                        .bind("visibility", visibility(decl.public))
                        .bind("name", name.clone())
                        .bind("generics", type_params.clone())
                        .bind("fields", lines.join("\n")),
                )?;

                if fields.iter().any(|f| f.default.is_some()) {
                    let constructor = cx.render(
                        "type/constructor",
                        TemplateContext::new()
                            .bind("generics", type_params)
                            .bind("name", name)
                            .bind("params", params.join(", "))
                            .bind("inits", inits.join(", ")),
                    )?;
                    text.push_str("\n\n");
                    text.push_str(&constructor);
                }
                Ok(Fragment::inline(text))
            }
        }
    }
}
