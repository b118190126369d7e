//! Statements and control flow.

use serde::{Deserialize, Serialize};

use crate::expr::Expr;
use crate::types::TypeExpr;

/// One guarded arm of a conditional.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CondBranch {
    pub condition: Expr,
    pub body: Vec<Statement>,
}

/// A statement inside a function body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Statement {
    Expression(Expr),
    Assign {
        target: String,
        value: Expr,
    },
    /// Binding declaration.
    Let {
        name: String,
        #[serde(default)]
        mutable: bool,
        #[serde(default)]
        ty: Option<TypeExpr>,
        value: Expr,
    },
    /// `if` / `else if` chain with an optional `else`. Branches are mutually exclusive and tested in order.
    Conditional {
        branches: Vec<CondBranch>,
        #[serde(default)]
        otherwise: Option<Vec<Statement>>,
    },
    /// Pre-test loop.
    Loop {
        condition: Expr,
        body: Vec<Statement>,
    },
    Return(Option<Expr>),
    /// Raise an exception value. Not part of the code generator's closed set.
    Throw(Expr),
}

impl Statement {
    pub fn ret(value: impl Into<Expr>) -> Self {
        Statement::Return(Some(value.into()))
    }

    pub fn let_(name: impl Into<String>, value: impl Into<Expr>) -> Self {
        Statement::Let {
            name: name.into(),
            mutable: false,
            ty: None,
            value: value.into(),
        }
    }

    pub fn assign(target: impl Into<String>, value: impl Into<Expr>) -> Self {
        Statement::Assign {
            target: target.into(),
            value: value.into(),
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Statement::Expression(_) => "expression",
            Statement::Assign { .. } => "assignment",
            Statement::Let { .. } => "binding",
            Statement::Conditional { .. } => "conditional",
            Statement::Loop { .. } => "loop",
            Statement::Return(_) => "return",
            Statement::Throw(_) => "throw",
        }
    }
}
