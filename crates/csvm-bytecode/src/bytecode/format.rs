//! Shared text formatting for dump and trace output.

use crate::Colors;

use super::instructions::{Instruction, LabelId};

/// Mnemonic column width (`label`, `jmpnz`).
pub const MNEMONIC_WIDTH: usize = 5;

/// Format an instruction as `mnemonic operands`.
///
/// No trailing padding when the instruction has no operands.
pub fn format_instruction(instr: &Instruction, colors: Colors) -> String {
    let c = colors;
    let mnemonic = instr.opcode().mnemonic();
    let operands = format_operands(instr, c);
    if operands.is_empty() {
        return format!("{}{}{}", c.mnemonic, mnemonic, c.reset);
    }
    format!(
        "{}{:<w$}{} {}",
        c.mnemonic,
        mnemonic,
        c.reset,
        operands,
        w = MNEMONIC_WIDTH
    )
}

/// Operand list, empty for operand-less instructions.
pub fn format_operands(instr: &Instruction, colors: Colors) -> String {
    let c = colors;
    match *instr {
        Instruction::MoveLiteral { reg, value } => {
            format!("{}, {}{}{}", register_name(reg), c.literal, value, c.reset)
        }
        Instruction::MoveRegister { dst, src } => {
            format!("{}, {}", register_name(dst), register_name(src))
        }
        Instruction::Push(value) => format!("{}{}{}", c.literal, value, c.reset),
        Instruction::Load(reg) | Instruction::Store(reg) => register_name(reg),
        _ => instr.label().map(label_name).unwrap_or_default(),
    }
}

pub fn label_name(id: LabelId) -> String {
    format!("L{}", id.get())
}

pub fn register_name(index: u8) -> String {
    format!("r{index}")
}

/// Program offsets are shown as four (or more) hex digits.
pub fn format_offset(offset: usize) -> String {
    format!("{offset:04x}")
}
