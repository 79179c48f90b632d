//! Statement execution.

use crate::ast::{Stmt, StmtKind};
use crate::error::RuntimeError;

use super::{Interpreter, RuntimeResult};

impl Interpreter {
    /// Execute a statement.
    pub(crate) fn execute(&mut self, stmt: &Stmt) -> RuntimeResult<()> {
        match &stmt.kind {
            StmtKind::Assign { target, value } => {
                let value = self.evaluate_expr(value)?;
                self.environment.define(target.clone(), value);
            }
            StmtKind::Expr(expr) => {
                let value = self.evaluate_expr(expr)?;
                self.residual = Some(value);
            }
            StmtKind::Unsupported { node } => {
                return Err(RuntimeError::unsupported_node(node.clone(), stmt.span));
            }
        }
        Ok(())
    }
}
