//! Syntax tree consumed by the compiler and the reference interpreter.
//!
//! Trees are built by an external parser (or by hand through the builder
//! helpers) and can be exchanged as JSON.

pub mod expr;
pub mod stmt;

pub use expr::{BinaryOp, Expr, ExprKind};
pub use stmt::{Module, Stmt, StmtKind};
