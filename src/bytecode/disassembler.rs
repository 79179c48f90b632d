//! Bytecode disassembler for debugging.

use std::fmt::Write;

use crate::bytecode::chunk::CodeObject;
use crate::bytecode::instruction::{BinaryOperator, Opcode, INSTRUCTION_SIZE};

/// Disassemble a code object into human-readable output.
///
/// Malformed bytecode is printed as far as possible rather than rejected.
pub fn disassemble(code: &CodeObject) -> String {
    let mut output = String::new();

    writeln!(
        &mut output,
        "== <module> ({} instructions) ==",
        code.len()
    )
    .ok();

    let mut offset = 0;
    while offset < code.bytecode.len() {
        offset = disassemble_instruction(code, offset, &mut output);
    }

    if !code.constants.is_empty() {
        writeln!(&mut output, "-- constants --").ok();
        for (i, constant) in code.constants.iter().enumerate() {
            writeln!(&mut output, "{:4} {}", i, constant.repr()).ok();
        }
    }
    if !code.names.is_empty() {
        writeln!(&mut output, "-- names --").ok();
        for (i, name) in code.names.iter().enumerate() {
            writeln!(&mut output, "{:4} {}", i, name).ok();
        }
    }

    output
}

/// Disassemble the instruction at `offset`, returning the next offset.
pub fn disassemble_instruction(code: &CodeObject, offset: usize, output: &mut String) -> usize {
    write!(output, "{:04} ", offset).ok();

    // Line number, or | if same as previous
    let line = code.line_at(offset);
    if offset >= INSTRUCTION_SIZE && line == code.line_at(offset - INSTRUCTION_SIZE) {
        write!(output, "   | ").ok();
    } else {
        match line {
            Some(line) => write!(output, "{:4} ", line).ok(),
            None => write!(output, "   ? ").ok(),
        };
    }

    let byte = code.bytecode[offset];
    let Some(&operand) = code.bytecode.get(offset + 1) else {
        writeln!(output, "<truncated> {}", byte).ok();
        return offset + 1;
    };

    let opcode = match Opcode::from_u8(byte) {
        Some(op) => op,
        None => {
            writeln!(output, "<unknown {}> {}", byte, operand).ok();
            return offset + INSTRUCTION_SIZE;
        }
    };

    let detail = match opcode {
        Opcode::LoadConst => code
            .constants
            .get(operand as usize)
            .map(|c| c.repr())
            .unwrap_or_else(|| "<bad constant>".to_string()),
        Opcode::StoreGlobal | Opcode::LoadGlobal => code
            .names
            .get(operand as usize)
            .cloned()
            .unwrap_or_else(|| "<bad name>".to_string()),
        Opcode::BinaryOp => BinaryOperator::from_tag(operand)
            .map(|op| op.symbol().to_string())
            .unwrap_or_else(|| "<bad operator>".to_string()),
    };
    writeln!(output, "{:<16} {:4} ({})", opcode.mnemonic(), operand, detail).ok();

    offset + INSTRUCTION_SIZE
}
