//! Statement and expression emission.
//!
//! Nested bodies are rendered through [`RenderCx::block`] and indented one level. Operands that are themselves
//! binary expressions are parenthesized, so the emitted precedence always matches the model's tree shape.

use letlang_model::{BinaryOp, Expr, Literal, Statement, UnaryOp};

use super::{RenderCx, StatementRendering};
use crate::backend::errors::{CodegenError, CodegenResult};
use crate::backend::naming::{escape_ident, indent};
use crate::backend::templates::TemplateContext;

#[derive(Debug, Clone, Copy, Default)]
pub struct StatementRenderer;

fn binary_token(op: BinaryOp) -> &'static str {
    match op {
        BinaryOp::Add => "+",
        BinaryOp::Sub => "-",
        BinaryOp::Mul => "*",
        BinaryOp::Div => "/",
        BinaryOp::Rem => "%",
        BinaryOp::Eq => "==",
        BinaryOp::Ne => "!=",
        BinaryOp::Lt => "<",
        BinaryOp::Le => "<=",
        BinaryOp::Gt => ">",
        BinaryOp::Ge => ">=",
        BinaryOp::And => "&&",
        BinaryOp::Or => "||",
    }
}

fn unary_token(op: UnaryOp) -> &'static str {
    match op {
        UnaryOp::Neg => "-",
        UnaryOp::Not => "!",
    }
}

/// Whether a record literal in `expr` ends up outside any parentheses, brackets or call arguments.
fn has_bare_record(expr: &Expr) -> bool {
    match expr {
        Expr::Literal(Literal::Record { .. }) => true,
        Expr::Binary { lhs, rhs, .. } => [lhs, rhs]
            .into_iter()
            .any(|operand| !matches!(**operand, Expr::Binary { .. }) && has_bare_record(operand)),
        Expr::Unary { operand, .. } => !matches!(**operand, Expr::Binary { .. }) && has_bare_record(operand),
        _ => false,
    }
}

impl StatementRenderer {
    fn operand(&self, cx: &RenderCx<'_>, expr: &Expr) -> CodegenResult<String> {
        let text = cx.expression(expr)?;
        Ok(match expr {
            Expr::Binary { .. } => format!("({})", text),
            _ => text,
        })
    }

    /// An `if`/`while` condition. Rust does not accept a struct literal there unless it is delimited.
    fn condition(&self, cx: &RenderCx<'_>, expr: &Expr) -> CodegenResult<String> {
        let text = cx.expression(expr)?;
        Ok(if has_bare_record(expr) { format!("({})", text) } else { text })
    }

    fn body(&self, cx: &RenderCx<'_>, statements: &[Statement]) -> CodegenResult<String> {
        Ok(indent(&cx.block(statements)?))
    }
}

impl StatementRendering for StatementRenderer {
    fn render_statement(&self, cx: &RenderCx<'_>, stmt: &Statement) -> CodegenResult<String> {
        match stmt {
            Statement::Expression(expr) => {
                cx.render("stmt/expression", TemplateContext::new().bind("expr", cx.expression(expr)?))
            }
            Statement::Assign { target, value } => cx.render(
                "stmt/assign",
                TemplateContext::new()
                    .bind("target", escape_ident(target))
                    .bind("value", cx.expression(value)?),
            ),
            Statement::Let {
                name,
                mutable,
                ty,
                value,
            } => {
                let binding = if *mutable {
                    format!("mut {}", escape_ident(name))
                } else {
                    escape_ident(name)
                };
                let annotation = match ty {
                    Some(ty) => format!(": {}", cx.ty(ty)?),
                    None => String::new(),
                };
                cx.render(
                    "stmt/let",
                    TemplateContext::new()
                        .bind("binding", binding)
                        .bind("annotation", annotation)
                        .bind("value", cx.expression(value)?),
                )
            }
            Statement::Conditional { branches, otherwise } => {
                let Some((first, rest)) = branches.split_first() else {
                    // No guarded arm: only the fallback runs, in its own scope.
                    return match otherwise {
                        Some(body) => cx.render(
                            "stmt/block",
                            TemplateContext::new().bind("body", self.body(&cx.at("else"), body)?),
                        ),
                        None => Ok(String::new()),
                    };
                };

                let mut alternatives = String::new();
                for (i, branch) in rest.iter().enumerate() {
                    let branch_cx = cx.at(format!("branch {}", i + 2));
                    alternatives.push_str(&cx.render(
                        "stmt/else_if",
                        TemplateContext::new()
                            .bind("condition", self.condition(&branch_cx, &branch.condition)?)
                            .bind("body", self.body(&branch_cx, &branch.body)?),
                    )?);
                }
                if let Some(body) = otherwise {
                    alternatives.push_str(&cx.render(
                        "stmt/else",
                        TemplateContext::new().bind("body", self.body(&cx.at("else"), body)?),
                    )?);
                }

                let first_cx = cx.at("branch 1");
                cx.render(
                    "stmt/conditional",
                    TemplateContext::new()
                        .bind("condition", self.condition(&first_cx, &first.condition)?)
                        .bind("body", self.body(&first_cx, &first.body)?)
                        .bind("alternatives", alternatives),
                )
            }
            Statement::Loop { condition, body } => cx.render(
                "stmt/loop",
                TemplateContext::new()
                    .bind("condition", self.condition(cx, condition)?)
                    .bind("body", self.body(&cx.at("loop body"), body)?),
            ),
            Statement::Return(value) => {
                let value = match value {
                    Some(expr) => cx.expression(expr)?,
                    None => "()".to_string(),
                };
                cx.render("stmt/return", TemplateContext::new().bind("value", value))
            }
            Statement::Throw(_) => Err(CodegenError::UnsupportedStatementKind {
                kind: stmt.kind(),
                location: cx.location().clone(),
            }),
        }
    }

    fn render_expression(&self, cx: &RenderCx<'_>, expr: &Expr) -> CodegenResult<String> {
        match expr {
            Expr::Literal(literal) => cx.literal(literal),
            Expr::Reference(reference) => Ok(cx.reference(reference)),
            Expr::Call { callee, args } => {
                let args = args
                    .iter()
                    .enumerate()
                    .map(|(i, arg)| cx.at(format!("argument {}", i + 1)).expression(arg))
                    .collect::<CodegenResult<Vec<_>>>()?;
                cx.render(
                    "expr/call",
                    TemplateContext::new()
                        .bind("callee", cx.reference(callee))
                        .bind("args", args.join(", ")),
                )
            }
            Expr::Binary { op, lhs, rhs } => cx.render(
                "expr/binary",
                TemplateContext::new()
                    .bind("lhs", self.operand(cx, lhs)?)
                    .bind("op", binary_token(*op))
                    .bind("rhs", self.operand(cx, rhs)?),
            ),
            Expr::Unary { op, operand } => cx.render(
                "expr/unary",
                TemplateContext::new()
                    .bind("op", unary_token(*op))
                    .bind("operand", self.operand(cx, operand)?),
            ),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::backend::render::testing::Harness;
    use letlang_model::{CondBranch, Literal, ModulePath, Primitive, Reference};

    fn statement(stmt: &Statement) -> CodegenResult<String> {
        let harness = Harness::new();
        let cx = harness.cx();
        cx.renderers.statement.render_statement(&cx, stmt)
    }

    fn int(v: i64) -> Expr {
        Literal::Integer(v).into()
    }

    #[test]
    fn test_let_and_assign() {
        assert_eq!(statement(&Statement::let_("x", int(1))).unwrap(), "let x = 1;");
        let typed = Statement::Let {
            name: "count".into(),
            mutable: true,
            ty: Some(Primitive::Int.into()),
            value: int(0),
        };
        assert_eq!(statement(&typed).unwrap(), "let mut count: i64 = 0;");
        assert_eq!(statement(&Statement::assign("type", int(2))).unwrap(), "r#type = 2;");
    }

    #[test]
    fn test_precedence_follows_tree_shape() {
        let expr = Expr::binary(
            BinaryOp::Mul,
            Expr::binary(BinaryOp::Add, Expr::local("a"), Expr::local("b")),
            Expr::unary(UnaryOp::Neg, Expr::binary(BinaryOp::Sub, Expr::local("c"), int(1))),
        );
        assert_eq!(statement(&Statement::ret(expr)).unwrap(), "return (a + b) * -(c - 1);");
    }

    #[test]
    fn test_bare_return_yields_unit() {
        assert_eq!(statement(&Statement::Return(None)).unwrap(), "return ();");
    }

    #[test]
    fn test_call_with_qualified_callee() {
        let expr = Expr::call(
            Reference::declared_in(ModulePath::parse("util.math"), "add"),
            vec![int(1), Literal::string("two").into()],
        );
        assert_eq!(
            statement(&Statement::Expression(expr)).unwrap(),
            r#"crate::util::math::add(1, "two");"#
        );
    }

    #[test]
    fn test_conditional_chain() {
        let stmt = Statement::Conditional {
            branches: vec![
                CondBranch {
                    condition: Expr::binary(BinaryOp::Lt, Expr::local("n"), int(0)),
                    body: vec![Statement::ret(int(-1))],
                },
                CondBranch {
                    condition: Expr::binary(BinaryOp::Eq, Expr::local("n"), int(0)),
                    body: vec![Statement::ret(int(0))],
                },
            ],
            otherwise: Some(vec![Statement::ret(int(1))]),
        };
        insta::assert_snapshot!(statement(&stmt).unwrap(), @r"
        if n < 0 {
            return -1;
        } else if n == 0 {
            return 0;
        } else {
            return 1;
        }
        ");
    }

    #[test]
    fn test_loop_with_nested_block() {
        let stmt = Statement::Loop {
            condition: Expr::binary(BinaryOp::Gt, Expr::local("n"), int(0)),
            body: vec![
                Statement::assign("n", Expr::binary(BinaryOp::Sub, Expr::local("n"), int(1))),
                Statement::Conditional {
                    branches: vec![CondBranch {
                        condition: Expr::unary(UnaryOp::Not, Expr::local("done")),
                        body: vec![Statement::Expression(Expr::call(Reference::local("tick"), vec![]))],
                    }],
                    otherwise: None,
                },
            ],
        };
        let expected = "\
while n > 0 {
    n = n - 1;
    if !done {
        tick();
    }
}";
        assert_eq!(statement(&stmt).unwrap(), expected);
    }

    #[test]
    fn test_conditional_without_branches_keeps_its_scope() {
        let fallback = Statement::Conditional {
            branches: vec![],
            otherwise: Some(vec![Statement::let_("x", int(1)), Statement::Expression(Expr::local("x"))]),
        };
        assert_eq!(statement(&fallback).unwrap(), "{\n    let x = 1;\n    x;\n}");

        let harness = Harness::new();
        let cx = harness.cx();
        let empty = Statement::Conditional {
            branches: vec![],
            otherwise: None,
        };
        let body = vec![Statement::let_("a", int(1)), empty, Statement::ret(Expr::local("a"))];
        assert_eq!(cx.block(&body).unwrap(), "let a = 1;\nreturn a;");
    }

    #[test]
    fn test_record_literal_in_condition_is_parenthesized() {
        let origin = || Literal::record(Reference::local("P"), [("x", Literal::Integer(1))]);
        let stmt = Statement::Loop {
            condition: Expr::unary(UnaryOp::Not, Expr::binary(BinaryOp::Eq, Expr::local("p"), origin().into())),
            body: vec![Statement::Conditional {
                branches: vec![CondBranch {
                    condition: Expr::binary(BinaryOp::Eq, Expr::local("p"), origin().into()),
                    body: vec![],
                }],
                otherwise: None,
            }],
        };
        let text = statement(&stmt).unwrap();
        assert!(text.starts_with("while !(p == P { x: 1 }) {"), "{text}");
        assert!(text.contains("if (p == P { x: 1 }) {"), "{text}");
        syn::parse_str::<syn::Block>(&format!("{{\n{}\n}}", text)).unwrap();

        let call = Expr::call(Reference::local("check"), vec![origin().into()]);
        let plain = Statement::Conditional {
            branches: vec![CondBranch {
                condition: call,
                body: vec![],
            }],
            otherwise: None,
        };
        assert!(statement(&plain).unwrap().starts_with("if check(P { x: 1 }) {"));
    }

    #[test]
    fn test_throw_is_unsupported_with_location() {
        let harness = Harness::new();
        let cx = harness.cx();
        let body = vec![Statement::let_("x", int(1)), Statement::Throw(Literal::string("boom").into())];
        match cx.block(&body).unwrap_err() {
            CodegenError::UnsupportedStatementKind { kind, location } => {
                assert_eq!(kind, "throw");
                assert_eq!(location.to_string(), "statement 2");
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
