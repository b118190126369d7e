//! Expressions.

use serde::{Deserialize, Serialize};

use crate::literal::Literal;
use crate::path::Reference;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Rem,
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
    And,
    Or,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnaryOp {
    Neg,
    Not,
}

/// An expression: a literal, a reference, or a composite.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Expr {
    Literal(Literal),
    Reference(Reference),
    Call {
        callee: Reference,
        args: Vec<Expr>,
    },
    Binary {
        op: BinaryOp,
        lhs: Box<Expr>,
        rhs: Box<Expr>,
    },
    Unary {
        op: UnaryOp,
        operand: Box<Expr>,
    },
}

impl Expr {
    pub fn local(name: impl Into<String>) -> Self {
        Expr::Reference(Reference::local(name))
    }

    pub fn call(callee: Reference, args: Vec<Expr>) -> Self {
        Expr::Call { callee, args }
    }

    pub fn binary(op: BinaryOp, lhs: Expr, rhs: Expr) -> Self {
        Expr::Binary {
            op,
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
        }
    }

    pub fn unary(op: UnaryOp, operand: Expr) -> Self {
        Expr::Unary {
            op,
            operand: Box::new(operand),
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Expr::Literal(_) => "literal",
            Expr::Reference(_) => "reference",
            Expr::Call { .. } => "call",
            Expr::Binary { .. } => "binary",
            Expr::Unary { .. } => "unary",
        }
    }
}

impl From<Literal> for Expr {
    fn from(lit: Literal) -> Self {
        Expr::Literal(lit)
    }
}
