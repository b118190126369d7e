//! Literal emission.
//!
//! Scalars are formatted so that the emitted token reads back as the same value:
//! - integers in decimal,
//! - floats in their shortest round-trip form (always with a `.` or exponent), non-finite values as `f64` constants,
//! - strings quoted and escaped with Rust's own escaping rules.
//!
//! Lists become `vec![..]` and records become struct literals of their nominal type.

use letlang_model::Literal;

use super::{LiteralRendering, RenderCx};
use crate::backend::errors::{CodegenError, CodegenResult};
use crate::backend::naming::escape_ident;
use crate::backend::templates::TemplateContext;

#[derive(Debug, Clone, Copy, Default)]
pub struct LiteralRenderer;

impl LiteralRendering for LiteralRenderer {
    fn render_literal(&self, cx: &RenderCx<'_>, literal: &Literal) -> CodegenResult<String> {
        match literal {
            Literal::Integer(value) => cx.render(
                "literal/integer",
                TemplateContext::new().bind("value", value.to_string()),
            ),
            Literal::Float(value) => cx.render(
                "literal/float",
                TemplateContext::new().bind("value", float_token(*value)),
            ),
            Literal::Boolean(value) => cx.render(
                "literal/boolean",
                TemplateContext::new().bind("value", value.to_string()),
            ),
            Literal::String(value) => cx.render(
                "literal/string",
                TemplateContext::new().bind("value", format!("{:?}", value)),
            ),
            Literal::List(items) => {
                let items = items
                    .iter()
                    .enumerate()
                    .map(|(i, item)| self.render_literal(&cx.at(format!("element {}", i + 1)), item))
                    .collect::<CodegenResult<Vec<_>>>()?;
                cx.render("literal/list", TemplateContext::new().bind("items", items.join(", ")))
            }
            Literal::Record { ty, fields } => {
                let fields = fields
                    .iter()
                    .map(|(name, value)| {
                        let value = self.render_literal(&cx.at(format!("field {}", name)), value)?;
                        Ok(format!("{}: {}", escape_ident(name), value))
                    })
                    .collect::<CodegenResult<Vec<_>>>()?;
                cx.render(
                    "literal/record",
                    TemplateContext::new()
                        .bind("ty", cx.reference(ty))
                        .bind("fields", fields.join(", ")),
                )
            }
            Literal::Atom(_) => Err(CodegenError::UnsupportedLiteralKind {
                kind: literal.kind(),
                location: cx.location().clone(),
            }),
        }
    }
}

fn float_token(value: f64) -> String {
    if value.is_nan() {
        "f64::NAN".to_string()
    } else if value == f64::INFINITY {
        "f64::INFINITY".to_string()
    } else if value == f64::NEG_INFINITY {
        "f64::NEG_INFINITY".to_string()
    } else {
        // `Debug` is the shortest representation that parses back to the same bits, and always marks the value as
        // a float (`1.0`, `1e20`).
        format!("{:?}", value)
    }
}
