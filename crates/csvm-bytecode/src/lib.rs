//! Bytecode format for the csvm stack machine.
//!
//! This crate contains:
//! - The instruction catalog (opcodes, encoded sizes, decoding)
//! - The program buffer and its linear instruction walk
//! - Label resolution (label id → offset table)
//! - A human-readable listing (`dump`)

pub mod bytecode;
mod colors;

// Re-export commonly used items at crate root
pub use bytecode::{
    DecodeError, Instruction, Instructions, LABEL_COUNT, LabelId, LabelTable, MNEMONIC_WIDTH,
    Opcode, Program, REGISTER_COUNT, dump, format_instruction, format_offset, format_operands,
    label_name, register_name,
};
pub use colors::Colors;
