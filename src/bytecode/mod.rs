//! Bytecode module for pyvm.
//!
//! This module provides a bytecode compiler and virtual machine for the
//! supported statement and expression forms. The tree-walking interpreter
//! remains the reference the VM is checked against.
//!
//! # Architecture
//!
//! - `instruction`: Opcode definitions and the two-byte encoding
//! - `symbol_table`: Name to slot and name-table index mapping
//! - `chunk`: Code objects holding bytecode, constants and names
//! - `compiler`: Transforms AST into bytecode
//! - `vm`: Stack-based virtual machine for executing bytecode
//! - `disassembler`: Debug output for bytecode inspection

pub mod chunk;
pub mod compiler;
pub mod disassembler;
pub mod instruction;
pub mod symbol_table;
pub mod vm;


pub use chunk::CodeObject;
pub use compiler::Compiler;
pub use disassembler::disassemble;
pub use instruction::{decode, encode, BinaryOperator, Instruction, Opcode};
pub use symbol_table::{Scope, Symbol, SymbolTable};
pub use vm::{Frame, VM};
