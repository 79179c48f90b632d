//! Error types for compilation, execution and bytecode decoding.

use std::fmt;

use crate::interpreter::value::Value;
use crate::span::Span;
use thiserror::Error;

/// Which single-byte-indexed table ran out of room.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pool {
    Constants,
    Names,
}

impl fmt::Display for Pool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Pool::Constants => write!(f, "constant pool"),
            Pool::Names => write!(f, "name table"),
        }
    }
}

/// Bytecode compilation errors.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CompileError {
    #[error("Unsupported node {node} at {span}")]
    UnsupportedNode { node: String, span: Span },

    #[error("Undefined symbol '{name}' at {span}")]
    UndefinedSymbol { name: String, span: Span },

    #[error("Too many entries in the {pool} (limit {limit}) at {span}")]
    CapacityExceeded { pool: Pool, limit: usize, span: Span },
}

impl CompileError {
    pub fn unsupported_node(node: impl Into<String>, span: Span) -> Self {
        Self::UnsupportedNode {
            node: node.into(),
            span,
        }
    }

    pub fn undefined_symbol(name: impl Into<String>, span: Span) -> Self {
        Self::UndefinedSymbol {
            name: name.into(),
            span,
        }
    }
}

/// Errors raised while evaluating a tree or executing bytecode.
///
/// Bytecode errors carry the byte offset of the failing instruction.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RuntimeError {
    #[error("Unsupported node {node} at {span}")]
    UnsupportedNode { node: String, span: Span },

    #[error("Undefined global '{name}' at {span}")]
    UndefinedGlobal { name: String, span: Span },

    #[error("Unsupported opcode {opcode} at offset {offset}")]
    UnsupportedOpcode { opcode: u8, offset: usize },

    #[error("Unsupported binary operator tag {tag} at offset {offset}")]
    UnsupportedOperator { tag: u8, offset: usize },

    #[error("Invalid operands for {op}: '{left}' and '{right}' at {span}")]
    InvalidOperands {
        op: &'static str,
        left: &'static str,
        right: &'static str,
        span: Span,
    },

    #[error("Integer overflow in {op} at {span}")]
    Overflow { op: &'static str, span: Span },

    #[error("Stack underflow at offset {offset}")]
    StackUnderflow { offset: usize },

    #[error("Operand {operand} out of range for {opcode} at offset {offset}")]
    BadOperand {
        opcode: &'static str,
        operand: u8,
        offset: usize,
    },

    #[error("Truncated instruction at offset {offset}")]
    TruncatedInstruction { offset: usize },
}

impl RuntimeError {
    pub fn unsupported_node(node: impl Into<String>, span: Span) -> Self {
        Self::UnsupportedNode {
            node: node.into(),
            span,
        }
    }

    pub fn undefined_global(name: impl Into<String>, span: Span) -> Self {
        Self::UndefinedGlobal {
            name: name.into(),
            span,
        }
    }

    /// Error for a `+` that `Value::add` refused. Two integers can only fail
    /// by overflowing.
    pub fn failed_addition(left: &Value, right: &Value, span: Span) -> Self {
        let integral = |v: &Value| matches!(v, Value::Int(_) | Value::Bool(_));
        if integral(left) && integral(right) {
            Self::Overflow { op: "+", span }
        } else {
            Self::InvalidOperands {
                op: "+",
                left: left.type_name(),
                right: right.type_name(),
                span,
            }
        }
    }
}

/// Errors from decoding a raw byte buffer into instructions.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("Bytecode length {0} is not a multiple of 2")]
    OddLength(usize),

    #[error("Unknown opcode {opcode} at offset {offset}")]
    UnknownOpcode { opcode: u8, offset: usize },
}

/// A unified error type for all phases.
#[derive(Debug, Error)]
pub enum PyvmError {
    #[error("Compile error: {0}")]
    Compile(#[from] CompileError),

    #[error("Runtime error: {0}")]
    Runtime(#[from] RuntimeError),

    #[error("Decode error: {0}")]
    Decode(#[from] DecodeError),

    #[error("Engines disagree: vm produced {vm}, interpreter produced {interpreter}")]
    Divergence { vm: String, interpreter: String },

    #[error("Syntax tree error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl PyvmError {
    pub(crate) fn divergence(vm: &Option<Value>, interpreter: &Option<Value>) -> Self {
        let render = |v: &Option<Value>| match v {
            Some(v) => v.repr(),
            None => "no value".to_string(),
        };
        Self::Divergence {
            vm: render(vm),
            interpreter: render(interpreter),
        }
    }
}
