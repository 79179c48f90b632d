//! Stack-based virtual machine for executing bytecode.
//!
//! A VM runs exactly one code object in exactly one frame. There is no call
//! or return; execution ends when the instruction pointer reaches the end of
//! the buffer.

use ahash::AHashMap;

use crate::bytecode::chunk::CodeObject;
use crate::bytecode::instruction::{BinaryOperator, Opcode, INSTRUCTION_SIZE};
use crate::error::RuntimeError;
use crate::interpreter::value::Value;
use crate::span::Span;

/// Result type for VM operations.
pub type VMResult<T> = Result<T, RuntimeError>;

/// Execution state for a single run.
#[derive(Debug, Clone, Default)]
pub struct Frame {
    /// Operand stack.
    pub stack: Vec<Value>,
    /// Global namespace.
    pub globals: AHashMap<String, Value>,
    /// Name table of the executing code object.
    pub names: Vec<String>,
    /// Byte offset of the next instruction; always a multiple of 2.
    pub ip: usize,
}

impl Frame {
    pub fn new(names: Vec<String>) -> Self {
        Self {
            names,
            ..Self::default()
        }
    }

    /// The value left on top of the stack, if any.
    pub fn top(&self) -> Option<&Value> {
        self.stack.last()
    }

    pub fn global(&self, name: &str) -> Option<&Value> {
        self.globals.get(name)
    }
}

/// The virtual machine.
pub struct VM {
    code: CodeObject,
    frame: Frame,
}

impl VM {
    /// Create a VM for `code` with a fresh frame.
    pub fn new(code: CodeObject) -> Self {
        let frame = Frame::new(code.names.clone());
        Self { code, frame }
    }

    /// Run to completion and return the final top of stack.
    pub fn run(self) -> VMResult<Option<Value>> {
        let frame = self.execute()?;
        Ok(frame.top().cloned())
    }

    /// Run to completion and hand back the finished frame.
    pub fn execute(mut self) -> VMResult<Frame> {
        let len = self.code.bytecode.len();
        log::debug!(
            "vm: {} bytes, {} constants, {} names",
            len,
            self.code.constants.len(),
            self.frame.names.len()
        );

        while self.frame.ip < len {
            let offset = self.frame.ip;
            if offset + INSTRUCTION_SIZE > len {
                return Err(RuntimeError::TruncatedInstruction { offset });
            }
            let byte = self.code.bytecode[offset];
            let operand = self.code.bytecode[offset + 1];
            self.frame.ip += INSTRUCTION_SIZE;

            let opcode =
                Opcode::from_u8(byte).ok_or(RuntimeError::UnsupportedOpcode { opcode: byte, offset })?;
            log::trace!("{:04} {} {}", offset, opcode.mnemonic(), operand);

            match opcode {
                Opcode::LoadConst => {
                    let value = self
                        .code
                        .constants
                        .get(operand as usize)
                        .cloned()
                        .ok_or_else(|| Self::bad_operand(opcode, operand, offset))?;
                    self.frame.stack.push(value);
                }
                Opcode::StoreGlobal => {
                    let name = self.read_name(opcode, operand, offset)?;
                    let value = self.pop(offset)?;
                    self.frame.globals.insert(name, value);
                }
                Opcode::LoadGlobal => {
                    let name = self.read_name(opcode, operand, offset)?;
                    let value = self.frame.globals.get(&name).cloned().ok_or_else(|| {
                        RuntimeError::undefined_global(name, self.span_at(offset))
                    })?;
                    self.frame.stack.push(value);
                }
                Opcode::BinaryOp => self.binary_op(operand, offset)?,
            }
        }

        Ok(self.frame)
    }

    fn binary_op(&mut self, tag: u8, offset: usize) -> VMResult<()> {
        match BinaryOperator::from_tag(tag) {
            Some(BinaryOperator::Add) => {}
            _ => return Err(RuntimeError::UnsupportedOperator { tag, offset }),
        }
        let right = self.pop(offset)?;
        let left = self.pop(offset)?;
        let result = left
            .add(&right)
            .ok_or_else(|| RuntimeError::failed_addition(&left, &right, self.span_at(offset)))?;
        self.frame.stack.push(result);
        Ok(())
    }

    fn read_name(&self, opcode: Opcode, operand: u8, offset: usize) -> VMResult<String> {
        self.frame
            .names
            .get(operand as usize)
            .cloned()
            .ok_or_else(|| Self::bad_operand(opcode, operand, offset))
    }

    fn pop(&mut self, offset: usize) -> VMResult<Value> {
        self.frame
            .stack
            .pop()
            .ok_or(RuntimeError::StackUnderflow { offset })
    }

    fn span_at(&self, offset: usize) -> Span {
        self.code
            .line_at(offset)
            .map(|line| Span::new(line, 0))
            .unwrap_or_default()
    }

    fn bad_operand(opcode: Opcode, operand: u8, offset: usize) -> RuntimeError {
        RuntimeError::BadOperand {
            opcode: opcode.mnemonic(),
            operand,
            offset,
        }
    }
}
