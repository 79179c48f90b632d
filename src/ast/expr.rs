//! Expression AST nodes.

use serde::{Deserialize, Serialize};

use crate::interpreter::value::Value;
use crate::span::Span;

/// An expression in the AST.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expr {
    pub kind: ExprKind,
    #[serde(default)]
    pub span: Span,
}

impl Expr {
    pub fn new(kind: ExprKind, span: Span) -> Self {
        Self { kind, span }
    }

    pub fn constant(value: impl Into<Value>) -> Self {
        Self::new(ExprKind::Constant(value.into()), Span::default())
    }

    pub fn name(name: impl Into<String>) -> Self {
        Self::new(ExprKind::Name(name.into()), Span::default())
    }

    pub fn binop(left: Expr, op: BinaryOp, right: Expr) -> Self {
        Self::new(
            ExprKind::BinOp {
                left: Box::new(left),
                op,
                right: Box::new(right),
            },
            Span::default(),
        )
    }

    pub fn add(left: Expr, right: Expr) -> Self {
        Self::binop(left, BinaryOp::Add, right)
    }

    /// A node the external parser produced but this core does not model.
    pub fn unsupported(node: impl Into<String>) -> Self {
        Self::new(
            ExprKind::Unsupported { node: node.into() },
            Span::default(),
        )
    }

    pub fn at(mut self, span: Span) -> Self {
        self.span = span;
        self
    }
}

/// All expression variants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ExprKind {
    /// Literal constant: 42, 4.5, "text", True, None
    Constant(Value),

    /// Name reference: foo
    Name(String),

    /// Binary operation: a + b
    BinOp {
        left: Box<Expr>,
        op: BinaryOp,
        right: Box<Expr>,
    },

    /// Any other expression shape, named by its node type (`Call`, `Compare`, ...)
    Unsupported { node: String },
}

impl ExprKind {
    /// Node name used in error messages.
    pub fn node_name(&self) -> String {
        match self {
            ExprKind::Constant(_) => "Constant".to_string(),
            ExprKind::Name(_) => "Name".to_string(),
            ExprKind::BinOp { op, .. } => format!("BinOp({})", op.node_name()),
            ExprKind::Unsupported { node } => node.clone(),
        }
    }
}

/// Binary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BinaryOp {
    Add,
    Sub,
    Mult,
    Div,
}

impl BinaryOp {
    pub fn node_name(&self) -> &'static str {
        match self {
            BinaryOp::Add => "Add",
            BinaryOp::Sub => "Sub",
            BinaryOp::Mult => "Mult",
            BinaryOp::Div => "Div",
        }
    }
}

impl std::fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BinaryOp::Add => write!(f, "+"),
            BinaryOp::Sub => write!(f, "-"),
            BinaryOp::Mult => write!(f, "*"),
            BinaryOp::Div => write!(f, "/"),
        }
    }
}
