//! Expression evaluation.

use crate::ast::{Expr, ExprKind};
use crate::error::RuntimeError;
use crate::interpreter::value::Value;

use super::{Interpreter, RuntimeResult};

impl Interpreter {
    /// Evaluate an expression to a value.
    pub(crate) fn evaluate_expr(&mut self, expr: &Expr) -> RuntimeResult<Value> {
        match &expr.kind {
            ExprKind::Constant(value) => Ok(value.clone()),
            ExprKind::Name(name) => self
                .environment
                .get(name)
                .cloned()
                .ok_or_else(|| RuntimeError::undefined_global(name.clone(), expr.span)),
            ExprKind::BinOp { left, op, right } => {
                self.evaluate_binary(left, *op, right, expr.span)
            }
            ExprKind::Unsupported { node } => {
                Err(RuntimeError::unsupported_node(node.clone(), expr.span))
            }
        }
    }
}
