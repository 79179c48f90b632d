//! Bytecode compiler: lowers the syntax tree into a code object.
//!
//! A `Compiler` is a session object. Its constant pool, instruction list and
//! symbol table accumulate across `compile` calls, so each returned code
//! object holds the whole program compiled so far.

use crate::ast::{BinaryOp, Expr, ExprKind, Module, Stmt, StmtKind};
use crate::bytecode::chunk::CodeObject;
use crate::bytecode::instruction::{encode, BinaryOperator, Instruction, Opcode};
use crate::bytecode::symbol_table::{Scope, SymbolCheckpoint, SymbolTable};
use crate::error::{CompileError, Pool};
use crate::interpreter::value::Value;
use crate::span::Span;

/// Result type for compilation.
pub type CompileResult<T> = Result<T, CompileError>;

/// Operands are a single byte, so each pool holds at most this many entries.
pub const POOL_LIMIT: usize = u8::MAX as usize + 1;

/// The bytecode compiler.
#[derive(Debug, Clone, Default)]
pub struct Compiler {
    constants: Vec<Value>,
    instructions: Vec<Instruction>,
    /// Source line per emitted instruction.
    lines: Vec<u32>,
    symtab: SymbolTable,
}

/// Compiler state captured by [`Compiler::checkpoint`].
#[derive(Debug, Clone, Copy)]
pub struct CompilerCheckpoint {
    constants: usize,
    instructions: usize,
    symbols: SymbolCheckpoint,
}

impl Compiler {
    /// Create a new compiler.
    pub fn new() -> Self {
        Self::default()
    }

    /// Compile a module, appending to the session's accumulated program.
    ///
    /// On error the compiler is left exactly as it was before the call.
    pub fn compile(&mut self, module: &Module) -> CompileResult<CodeObject> {
        let checkpoint = self.checkpoint();
        let start = self.instructions.len();

        for stmt in &module.body {
            if let Err(e) = self.compile_statement(stmt) {
                log::debug!("compile failed, rolling back: {}", e);
                self.rollback(checkpoint);
                return Err(e);
            }
        }

        log::debug!(
            "compiled {} statement(s) into {} new instruction(s), {} total",
            module.body.len(),
            self.instructions.len() - start,
            self.instructions.len()
        );
        Ok(self.code_object())
    }

    /// Build a code object from everything compiled so far.
    pub fn code_object(&self) -> CodeObject {
        CodeObject::new(
            encode(&self.instructions),
            self.constants.clone(),
            self.symtab.names().to_vec(),
        )
        .with_lines(self.lines.clone())
    }

    pub fn symbols(&self) -> &SymbolTable {
        &self.symtab
    }

    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    pub fn constants(&self) -> &[Value] {
        &self.constants
    }

    pub fn checkpoint(&self) -> CompilerCheckpoint {
        CompilerCheckpoint {
            constants: self.constants.len(),
            instructions: self.instructions.len(),
            symbols: self.symtab.checkpoint(),
        }
    }

    /// Discard everything compiled after `checkpoint`.
    pub fn rollback(&mut self, checkpoint: CompilerCheckpoint) {
        self.constants.truncate(checkpoint.constants);
        self.instructions.truncate(checkpoint.instructions);
        self.lines.truncate(checkpoint.instructions);
        self.symtab.rollback(checkpoint.symbols);
    }

    /// Forget all accumulated state.
    pub fn reset(&mut self) {
        self.constants.clear();
        self.instructions.clear();
        self.lines.clear();
        self.symtab.clear();
    }

    // ===== Statements =====

    fn compile_statement(&mut self, stmt: &Stmt) -> CompileResult<()> {
        match &stmt.kind {
            StmtKind::Assign { target, value } => {
                self.compile_expression(value)?;
                let name_index = match self.symtab.resolve(target) {
                    Some(symbol) => symbol.name_index,
                    None => self.symtab.add_symbol(target, Scope::Global).name_index,
                };
                let operand = Self::operand(name_index, Pool::Names, stmt.span)?;
                self.emit(Opcode::StoreGlobal, operand, stmt.span);
                Ok(())
            }
            // The value stays on the stack; no pop between statements.
            StmtKind::Expr(expr) => self.compile_expression(expr),
            StmtKind::Unsupported { .. } => Err(CompileError::unsupported_node(
                stmt.kind.node_name(),
                stmt.span,
            )),
        }
    }

    // ===== Expressions =====

    fn compile_expression(&mut self, expr: &Expr) -> CompileResult<()> {
        match &expr.kind {
            ExprKind::Constant(value) => {
                let index = self.add_constant(value.clone());
                let operand = Self::operand(index, Pool::Constants, expr.span)?;
                self.emit(Opcode::LoadConst, operand, expr.span);
            }
            ExprKind::Name(name) => {
                let symbol = self
                    .symtab
                    .resolve(name)
                    .ok_or_else(|| CompileError::undefined_symbol(name.clone(), expr.span))?;
                let operand = Self::operand(symbol.name_index, Pool::Names, expr.span)?;
                self.emit(Opcode::LoadGlobal, operand, expr.span);
            }
            ExprKind::BinOp {
                left,
                op: BinaryOp::Add,
                right,
            } => {
                self.compile_expression(left)?;
                self.compile_expression(right)?;
                self.emit(Opcode::BinaryOp, BinaryOperator::Add.tag(), expr.span);
            }
            ExprKind::BinOp { .. } | ExprKind::Unsupported { .. } => {
                return Err(CompileError::unsupported_node(
                    expr.kind.node_name(),
                    expr.span,
                ));
            }
        }
        Ok(())
    }

    // ===== Helpers =====

    /// Append to the constant pool. Equal values are not deduplicated.
    fn add_constant(&mut self, value: Value) -> usize {
        self.constants.push(value);
        self.constants.len() - 1
    }

    fn emit(&mut self, opcode: Opcode, operand: u8, span: Span) {
        log::trace!("emit {:>4} {} {}", self.instructions.len() * 2, opcode.mnemonic(), operand);
        self.instructions.push(Instruction::new(opcode, operand));
        self.lines.push(span.line);
    }

    fn operand(index: usize, pool: Pool, span: Span) -> CompileResult<u8> {
        u8::try_from(index).map_err(|_| CompileError::CapacityExceeded {
            pool,
            limit: POOL_LIMIT,
            span,
        })
    }
}
