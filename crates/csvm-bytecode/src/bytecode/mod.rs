//! Bytecode format: instruction catalog, program buffer, label resolution.

mod dump;
mod format;
mod instructions;
mod labels;
mod program;

#[cfg(test)]
mod labels_tests;

pub use dump::dump;
pub use format::{
    MNEMONIC_WIDTH, format_instruction, format_offset, format_operands, label_name,
    register_name,
};
pub use instructions::{Instruction, LabelId, Opcode, REGISTER_COUNT};
pub use labels::{LABEL_COUNT, LabelTable};
pub use program::{DecodeError, Instructions, Program};
