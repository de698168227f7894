//! Errors that can occur during execution.
//!
//! Every variant is fatal: the run stops at the faulting instruction and no
//! state is rolled back.

use csvm_bytecode::{DecodeError, REGISTER_COUNT};

#[derive(Debug, thiserror::Error)]
pub enum RuntimeError {
    /// Unknown or truncated instruction, found by label resolution or by the
    /// executor.
    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error("operand stack overflow at offset {offset}")]
    StackOverflow { offset: usize },

    #[error("operand stack underflow at offset {offset}")]
    StackUnderflow { offset: usize },

    #[error("call stack overflow at offset {offset}")]
    CallStackOverflow { offset: usize },

    #[error("call stack underflow at offset {offset}")]
    CallStackUnderflow { offset: usize },

    #[error("division by zero at offset {offset}")]
    DivisionByZero { offset: usize },

    #[error("invalid register r{index} at offset {offset} (valid: r0-r{})", REGISTER_COUNT - 1)]
    InvalidRegister { index: u8, offset: usize },

    #[error("undefined label L{label} at offset {offset}")]
    UndefinedLabel { label: u16, offset: usize },

    /// Writing program output failed.
    #[error("output error: {0}")]
    Io(#[from] std::io::Error),
}

impl RuntimeError {
    /// Offset of the faulting instruction, when there is one.
    pub fn offset(&self) -> Option<usize> {
        match *self {
            Self::Decode(ref e) => Some(e.offset()),
            Self::StackOverflow { offset }
            | Self::StackUnderflow { offset }
            | Self::CallStackOverflow { offset }
            | Self::CallStackUnderflow { offset }
            | Self::DivisionByZero { offset }
            | Self::InvalidRegister { offset, .. }
            | Self::UndefinedLabel { offset, .. } => Some(offset),
            Self::Io(_) => None,
        }
    }
}
