//! Compiled code objects: bytecode plus the tables its operands index.

use crate::bytecode::instruction::{self, Instruction, INSTRUCTION_SIZE};
use crate::error::DecodeError;
use crate::interpreter::value::Value;

/// The output of compilation and the input to the VM.
///
/// `bytecode` is the flat two-byte instruction stream. `LOAD_CONST` operands
/// index `constants`; `STORE_GLOBAL`/`LOAD_GLOBAL` operands index `names`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CodeObject {
    /// Flat instruction stream, `[opcode, operand]` pairs.
    pub bytecode: Vec<u8>,
    /// The constant pool.
    pub constants: Vec<Value>,
    /// The name table, indexed by a symbol's name index.
    pub names: Vec<String>,
    /// Source line per instruction (0 when unknown). Not part of the
    /// byte layout.
    pub lines: Vec<u32>,
}

impl CodeObject {
    pub fn new(bytecode: Vec<u8>, constants: Vec<Value>, names: Vec<String>) -> Self {
        Self {
            bytecode,
            constants,
            names,
            lines: Vec::new(),
        }
    }

    pub fn with_lines(mut self, lines: Vec<u32>) -> Self {
        self.lines = lines;
        self
    }

    /// Decode the byte stream into instructions.
    pub fn instructions(&self) -> Result<Vec<Instruction>, DecodeError> {
        instruction::decode(&self.bytecode)
    }

    /// Number of instructions (rounded down for a truncated stream).
    pub fn len(&self) -> usize {
        self.bytecode.len() / INSTRUCTION_SIZE
    }

    pub fn is_empty(&self) -> bool {
        self.bytecode.is_empty()
    }

    /// Source line of the instruction at byte `offset`, if recorded.
    pub fn line_at(&self, offset: usize) -> Option<u32> {
        self.lines
            .get(offset / INSTRUCTION_SIZE)
            .copied()
            .filter(|&line| line > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bytecode::instruction::{encode, Opcode};
    use pretty_assertions::assert_eq;

    fn sample() -> CodeObject {
        let bytecode = encode(&[
            Instruction::new(Opcode::LoadConst, 0),
            Instruction::new(Opcode::StoreGlobal, 0),
        ]);
        CodeObject::new(bytecode, vec![Value::Int(10)], vec!["a".to_string()])
            .with_lines(vec![3, 3])
    }

    #[test]
    fn test_instructions_decode() {
        let code = sample();
        assert_eq!(code.len(), 2);
        assert_eq!(
            code.instructions().expect("decodes"),
            vec![
                Instruction::new(Opcode::LoadConst, 0),
                Instruction::new(Opcode::StoreGlobal, 0),
            ]
        );
    }

    #[test]
    fn test_line_at() {
        let code = sample();
        assert_eq!(code.line_at(0), Some(3));
        assert_eq!(code.line_at(2), Some(3));
        assert_eq!(code.line_at(4), None);

        let unknown = CodeObject::new(vec![0, 0], vec![Value::Int(1)], vec![]).with_lines(vec![0]);
        assert_eq!(unknown.line_at(0), None);
    }

    #[test]
    fn test_empty() {
        let code = CodeObject::default();
        assert!(code.is_empty());
        assert_eq!(code.instructions(), Ok(vec![]));
    }
}
