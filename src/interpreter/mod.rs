//! Reference tree-walking interpreter.
//!
//! Evaluates syntax trees directly, without going through the compiler, and
//! serves as the oracle the bytecode pipeline is checked against.

pub mod environment;
pub mod executor;
pub mod value;

pub use environment::Environment;
pub use executor::Interpreter;
pub use value::Value;
