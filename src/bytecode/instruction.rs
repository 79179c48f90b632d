//! Bytecode instruction definitions and the flat two-byte encoding.

use crate::error::DecodeError;

/// Width of one encoded instruction: an opcode byte and an operand byte.
pub const INSTRUCTION_SIZE: usize = 2;

/// Opcodes for the bytecode virtual machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Opcode {
    /// Push a constant: LOAD_CONST <const_index>
    LoadConst = 0,
    /// Pop and bind a global: STORE_GLOBAL <name_index>
    StoreGlobal = 1,
    /// Push a global: LOAD_GLOBAL <name_index>
    LoadGlobal = 2,
    /// Pop right, pop left, push the result: BINARY_OP <operator_tag>
    BinaryOp = 3,
}

impl Opcode {
    /// Convert from u8 to Opcode.
    pub fn from_u8(byte: u8) -> Option<Opcode> {
        match byte {
            0 => Some(Opcode::LoadConst),
            1 => Some(Opcode::StoreGlobal),
            2 => Some(Opcode::LoadGlobal),
            3 => Some(Opcode::BinaryOp),
            _ => None,
        }
    }

    pub fn mnemonic(self) -> &'static str {
        match self {
            Opcode::LoadConst => "LOAD_CONST",
            Opcode::StoreGlobal => "STORE_GLOBAL",
            Opcode::LoadGlobal => "LOAD_GLOBAL",
            Opcode::BinaryOp => "BINARY_OP",
        }
    }
}

impl From<Opcode> for u8 {
    fn from(op: Opcode) -> u8 {
        op as u8
    }
}

/// Operator tags carried in the operand of `BINARY_OP`.
///
/// Only `Add` is produced by the compiler and executed by the VM; the other
/// tags reserve encoding space.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum BinaryOperator {
    Add = 0,
    Subtract = 1,
    Multiply = 2,
    Divide = 3,
}

impl BinaryOperator {
    pub fn from_tag(tag: u8) -> Option<BinaryOperator> {
        match tag {
            0 => Some(BinaryOperator::Add),
            1 => Some(BinaryOperator::Subtract),
            2 => Some(BinaryOperator::Multiply),
            3 => Some(BinaryOperator::Divide),
            _ => None,
        }
    }

    pub fn tag(self) -> u8 {
        self as u8
    }

    pub fn symbol(self) -> &'static str {
        match self {
            BinaryOperator::Add => "+",
            BinaryOperator::Subtract => "-",
            BinaryOperator::Multiply => "*",
            BinaryOperator::Divide => "/",
        }
    }
}

/// A single decoded instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Instruction {
    pub opcode: Opcode,
    pub operand: u8,
}

impl Instruction {
    pub fn new(opcode: Opcode, operand: u8) -> Self {
        Self { opcode, operand }
    }
}

impl std::fmt::Display for Instruction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.opcode.mnemonic(), self.operand)
    }
}

/// Serialize instructions into the flat byte layout.
pub fn encode(instructions: &[Instruction]) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(instructions.len() * INSTRUCTION_SIZE);
    for instr in instructions {
        bytes.push(instr.opcode.into());
        bytes.push(instr.operand);
    }
    bytes
}

/// Decode a flat byte buffer back into instructions.
pub fn decode(bytes: &[u8]) -> Result<Vec<Instruction>, DecodeError> {
    if bytes.len() % INSTRUCTION_SIZE != 0 {
        return Err(DecodeError::OddLength(bytes.len()));
    }
    bytes
        .chunks_exact(INSTRUCTION_SIZE)
        .enumerate()
        .map(|(i, pair)| {
            let opcode = Opcode::from_u8(pair[0]).ok_or(DecodeError::UnknownOpcode {
                opcode: pair[0],
                offset: i * INSTRUCTION_SIZE,
            })?;
            Ok(Instruction::new(opcode, pair[1]))
        })
        .collect()
}
