//! Tree-walking interpreter.

mod expressions;
mod operators;
mod statements;

use crate::ast::Module;
use crate::error::RuntimeError;
use crate::interpreter::environment::Environment;
use crate::interpreter::value::Value;

pub(crate) type RuntimeResult<T> = Result<T, RuntimeError>;

/// The reference interpreter.
///
/// The environment and the residual result persist across [`evaluate`]
/// calls, so one instance can serve a whole interactive session.
///
/// [`evaluate`]: Interpreter::evaluate
#[derive(Debug, Clone, Default)]
pub struct Interpreter {
    pub(crate) environment: Environment,
    /// Value of the most recent bare-expression statement.
    pub(crate) residual: Option<Value>,
}

impl Interpreter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Evaluate a module and return the value of the last bare-expression
    /// statement executed so far, or `None` if there was none.
    pub fn evaluate(&mut self, module: &Module) -> RuntimeResult<Option<Value>> {
        for stmt in &module.body {
            self.execute(stmt)?;
        }
        log::debug!(
            "evaluated {} statements, {} globals bound",
            module.body.len(),
            self.environment.len()
        );
        Ok(self.residual.clone())
    }

    pub fn environment(&self) -> &Environment {
        &self.environment
    }

    /// Forget all bindings and the residual result.
    pub fn reset(&mut self) {
        self.environment.clear();
        self.residual = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{BinaryOp, Expr, Stmt};
    use pretty_assertions::assert_eq;

    fn eval(body: Vec<Stmt>) -> RuntimeResult<Option<Value>> {
        Interpreter::new().evaluate(&Module::new(body))
    }

    #[test]
    fn test_literal_addition() {
        let result = eval(vec![Stmt::expr(Expr::add(
            Expr::constant(2),
            Expr::constant(3),
        ))]);
        assert_eq!(result, Ok(Some(Value::Int(5))));
    }

    #[test]
    fn test_assignment_then_reference() {
        let result = eval(vec![
            Stmt::assign("a", Expr::constant(42)),
            Stmt::expr(Expr::name("a")),
        ]);
        assert_eq!(result, Ok(Some(Value::Int(42))));
    }

    #[test]
    fn test_addition_of_globals() {
        let result = eval(vec![
            Stmt::assign("a", Expr::constant(30)),
            Stmt::assign("b", Expr::constant(12)),
            Stmt::expr(Expr::add(Expr::name("a"), Expr::name("b"))),
        ]);
        assert_eq!(result, Ok(Some(Value::Int(42))));
    }

    /// Subtraction, multiplication and division all add. The fixture pins
    /// this down: `b = a - 4` with `a = 10` yields 14.
    #[test]
    fn test_subtraction_computes_addition() {
        let mut interpreter = Interpreter::new();
        let module = Module::new(vec![
            Stmt::assign("a", Expr::constant(10)),
            Stmt::assign(
                "b",
                Expr::binop(Expr::name("a"), BinaryOp::Sub, Expr::constant(4)),
            ),
        ]);
        assert_eq!(interpreter.evaluate(&module), Ok(None));
        assert_eq!(interpreter.environment().get("b"), Some(&Value::Int(14)));
    }

    #[test]
    fn test_mult_and_div_compute_addition() {
        let result = eval(vec![Stmt::expr(Expr::binop(
            Expr::binop(Expr::constant(6), BinaryOp::Mult, Expr::constant(2)),
            BinaryOp::Div,
            Expr::constant(2),
        ))]);
        assert_eq!(result, Ok(Some(Value::Int(10))));
    }

    #[test]
    fn test_trailing_assignment_keeps_last_expression_value() {
        let result = eval(vec![
            Stmt::expr(Expr::add(Expr::constant(2), Expr::constant(3))),
            Stmt::assign("a", Expr::constant(1)),
        ]);
        assert_eq!(result, Ok(Some(Value::Int(5))));
    }

    #[test]
    fn test_empty_module_has_no_value() {
        assert_eq!(eval(vec![]), Ok(None));
    }

    #[test]
    fn test_undefined_name() {
        let result = eval(vec![Stmt::expr(Expr::name("missing"))]);
        assert!(matches!(
            result,
            Err(RuntimeError::UndefinedGlobal { ref name, .. }) if name == "missing"
        ));
    }

    #[test]
    fn test_unsupported_statement() {
        let result = eval(vec![Stmt::unsupported("While")]);
        assert!(matches!(
            result,
            Err(RuntimeError::UnsupportedNode { ref node, .. }) if node == "While"
        ));
    }

    #[test]
    fn test_unsupported_expression() {
        let result = eval(vec![Stmt::expr(Expr::unsupported("Call"))]);
        assert!(matches!(
            result,
            Err(RuntimeError::UnsupportedNode { ref node, .. }) if node == "Call"
        ));
    }

    #[test]
    fn test_invalid_operands() {
        let result = eval(vec![Stmt::expr(Expr::add(
            Expr::constant(1),
            Expr::constant("a"),
        ))]);
        assert!(matches!(
            result,
            Err(RuntimeError::InvalidOperands {
                left: "int",
                right: "str",
                ..
            })
        ));
    }

    #[test]
    fn test_integer_overflow_is_reported_as_overflow() {
        let result = eval(vec![Stmt::expr(Expr::add(
            Expr::constant(i64::MAX),
            Expr::constant(1),
        ))]);
        assert!(matches!(
            result,
            Err(RuntimeError::Overflow { op: "+", .. })
        ));
        let message = result.unwrap_err().to_string();
        assert!(message.starts_with("Integer overflow in +"), "{}", message);
    }

    #[test]
    fn test_environment_persists_across_calls() {
        let mut interpreter = Interpreter::new();
        interpreter
            .evaluate(&Module::new(vec![Stmt::assign("x", Expr::constant(1))]))
            .unwrap();
        let result = interpreter.evaluate(&Module::new(vec![Stmt::expr(Expr::add(
            Expr::name("x"),
            Expr::constant(1),
        ))]));
        assert_eq!(result, Ok(Some(Value::Int(2))));

        interpreter.reset();
        assert!(interpreter.environment().is_empty());
    }
}
