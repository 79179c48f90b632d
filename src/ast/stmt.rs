//! Statement AST nodes.

use serde::{Deserialize, Serialize};

use crate::ast::expr::Expr;
use crate::span::Span;

/// A statement in the AST.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stmt {
    pub kind: StmtKind,
    #[serde(default)]
    pub span: Span,
}

impl Stmt {
    pub fn new(kind: StmtKind, span: Span) -> Self {
        Self { kind, span }
    }

    pub fn assign(target: impl Into<String>, value: Expr) -> Self {
        let span = value.span;
        Self::new(
            StmtKind::Assign {
                target: target.into(),
                value,
            },
            span,
        )
    }

    pub fn expr(expr: Expr) -> Self {
        let span = expr.span;
        Self::new(StmtKind::Expr(expr), span)
    }

    pub fn unsupported(node: impl Into<String>) -> Self {
        Self::new(
            StmtKind::Unsupported { node: node.into() },
            Span::default(),
        )
    }
}

/// Statement variants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum StmtKind {
    /// Single-target assignment: x = expr
    Assign { target: String, value: Expr },

    /// Bare expression: expr
    Expr(Expr),

    /// Any other statement shape (`If`, `While`, multi-target assignment, ...)
    Unsupported { node: String },
}

impl StmtKind {
    pub fn node_name(&self) -> String {
        match self {
            StmtKind::Assign { .. } => "Assign".to_string(),
            StmtKind::Expr(_) => "Expr".to_string(),
            StmtKind::Unsupported { node } => node.clone(),
        }
    }
}

/// A whole program: the root of every syntax tree.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Module {
    pub body: Vec<Stmt>,
}

impl Module {
    pub fn new(body: Vec<Stmt>) -> Self {
        Self { body }
    }

    /// Parse a JSON-encoded module produced by an external parser.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{BinaryOp, ExprKind};
    use crate::interpreter::value::Value;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_module_from_json() {
        let json = r#"{
            "body": [
                {"kind": {"Assign": {"target": "a", "value": {"kind": {"Constant": 30}}}},
                 "span": {"line": 1, "column": 1}},
                {"kind": {"Expr": {"kind": {"BinOp": {
                    "left": {"kind": {"Name": "a"}},
                    "op": "Add",
                    "right": {"kind": {"Constant": 12}}
                }}}}}
            ]
        }"#;
        let module = Module::from_json(json).unwrap();
        let expected = Module::new(vec![
            Stmt::assign("a", Expr::constant(30)).at_line(1),
            Stmt::expr(Expr::add(Expr::name("a"), Expr::constant(12))),
        ]);
        assert_eq!(module, expected);
    }

    #[test]
    fn test_unsupported_nodes_deserialize() {
        let json = r#"{"body": [
            {"kind": {"Unsupported": {"node": "While"}}},
            {"kind": {"Expr": {"kind": {"Unsupported": {"node": "Call"}}}}}
        ]}"#;
        let module = Module::from_json(json).unwrap();
        assert_eq!(module.body[0].kind.node_name(), "While");
        match &module.body[1].kind {
            StmtKind::Expr(expr) => assert_eq!(expr.kind.node_name(), "Call"),
            other => panic!("Expected expression statement, got {:?}", other),
        }
    }

    #[test]
    fn test_binop_node_name() {
        let expr = Expr::binop(Expr::constant(1), BinaryOp::Sub, Expr::constant(2));
        assert_eq!(expr.kind.node_name(), "BinOp(Sub)");
        assert_eq!(
            Expr::constant(1.5).kind,
            ExprKind::Constant(Value::Float(1.5))
        );
    }

    impl Stmt {
        fn at_line(mut self, line: u32) -> Self {
            self.span = Span::new(line, 1);
            self
        }
    }
}
