//! pyvm: a bytecode compiler and stack VM for a small Python subset, with a
//! tree-walking interpreter as the reference engine.
//!
//! This is the library root that exports all modules. Parsing is external:
//! programs arrive as syntax trees, usually deserialized from JSON.
//!
//! # Execution Modes
//!
//! - **Tree-walk interpreter**: direct AST evaluation, the reference engine
//! - **Bytecode VM**: compile to two-byte instructions and run on a stack VM
//! - **Differential**: run both and fail when their results disagree

#![allow(clippy::module_inception)]
#![allow(clippy::result_large_err)]
#![allow(clippy::new_without_default)]

pub mod ast;
pub mod bytecode;
pub mod error;
pub mod interpreter;
pub mod repl;
pub mod session;
pub mod span;

use ast::Module;
use error::PyvmError;
use interpreter::Value;
use session::{Session, SessionOptions};

/// Execution mode for running programs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExecutionMode {
    /// Tree-walking interpreter
    TreeWalk,
    /// Bytecode virtual machine
    #[default]
    Bytecode,
    /// Both engines, compared
    Differential,
}

/// Run a module once in a fresh session.
pub fn run(module: &Module, mode: ExecutionMode) -> Result<Option<Value>, PyvmError> {
    Session::new(SessionOptions {
        mode,
        disassemble: false,
    })
    .run_turn(module)
}

/// Run a module given as a JSON syntax tree.
pub fn run_json(json: &str, mode: ExecutionMode) -> Result<Option<Value>, PyvmError> {
    let module = Module::from_json(json)?;
    run(&module, mode)
}

/// Compile a module to bytecode without executing.
pub fn compile(module: &Module) -> Result<bytecode::CodeObject, PyvmError> {
    let mut compiler = bytecode::Compiler::new();
    Ok(compiler.compile(module)?)
}

/// Disassemble compiled bytecode to a string.
pub fn disassemble(code: &bytecode::CodeObject) -> String {
    bytecode::disassemble(code)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const TWO_GLOBALS: &str = r#"{"body": [
        {"kind": {"Assign": {"target": "a", "value": {"kind": {"Constant": 30}}}}},
        {"kind": {"Assign": {"target": "b", "value": {"kind": {"Constant": 12}}}}},
        {"kind": {"Expr": {"kind": {"BinOp": {
            "left": {"kind": {"Name": "a"}},
            "op": "Add",
            "right": {"kind": {"Name": "b"}}
        }}}}}
    ]}"#;

    #[test]
    fn test_run_json_every_mode() {
        for mode in [
            ExecutionMode::TreeWalk,
            ExecutionMode::Bytecode,
            ExecutionMode::Differential,
        ] {
            assert_eq!(
                run_json(TWO_GLOBALS, mode).expect("runs"),
                Some(Value::Int(42))
            );
        }
    }

    #[test]
    fn test_run_json_rejects_malformed_tree() {
        assert!(matches!(
            run_json("{\"body\": 3}", ExecutionMode::Bytecode),
            Err(PyvmError::Json(_))
        ));
    }

    #[test]
    fn test_compile_and_disassemble() {
        let module = Module::from_json(TWO_GLOBALS).expect("parses");
        let code = compile(&module).expect("compiles");
        assert_eq!(code.len(), 7);
        assert!(disassemble(&code).contains("BINARY_OP"));
    }
}
