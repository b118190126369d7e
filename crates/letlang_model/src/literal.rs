//! Literal values.

use serde::{Deserialize, Serialize};

use crate::path::Reference;

/// A literal value as resolved by the front end.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Literal {
    Integer(i64),
    Float(f64),
    Boolean(bool),
    String(String),
    List(Vec<Literal>),
    /// A record value of a resolved nominal record type.
    Record {
        ty: Reference,
        fields: Vec<(String, Literal)>,
    },
    /// Symbolic atom (`:ok`). Not part of the code generator's closed set.
    Atom(String),
}

impl Literal {
    pub fn string(value: impl Into<String>) -> Self {
        Self::String(value.into())
    }

    pub fn record<I, S>(ty: Reference, fields: I) -> Self
    where
        I: IntoIterator<Item = (S, Literal)>,
        S: Into<String>,
    {
        Self::Record {
            ty,
            fields: fields.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Literal::Integer(_) => "integer",
            Literal::Float(_) => "float",
            Literal::Boolean(_) => "boolean",
            Literal::String(_) => "string",
            Literal::List(_) => "list",
            Literal::Record { .. } => "record",
            Literal::Atom(_) => "atom",
        }
    }
}
