//! Program buffer and decoding errors.

use std::ops::Deref;

use super::instructions::{Instruction, Opcode};

/// Errors raised while decoding the program buffer.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    #[error("unknown opcode 0x{byte:02x} at offset {offset}")]
    UnknownOpcode { byte: u8, offset: usize },

    #[error(
        "truncated `{}` at offset {offset}: needs {size} bytes, {available} available",
        opcode.mnemonic()
    )]
    Truncated {
        opcode: Opcode,
        offset: usize,
        size: usize,
        available: usize,
    },

    #[error("offset {offset} is past the end of the program ({len} bytes)")]
    EndOfProgram { offset: usize, len: usize },
}

impl DecodeError {
    /// Offset of the instruction that failed to decode.
    pub fn offset(&self) -> usize {
        match *self {
            Self::UnknownOpcode { offset, .. }
            | Self::Truncated { offset, .. }
            | Self::EndOfProgram { offset, .. } => offset,
        }
    }
}

/// Immutable program buffer.
///
/// Instructions are decoded in place on demand; the buffer is never
/// rewritten after construction.
#[derive(Clone, PartialEq, Eq)]
pub struct Program {
    bytes: Box<[u8]>,
}

impl Program {
    pub fn new(bytes: impl Into<Box<[u8]>>) -> Self {
        Self {
            bytes: bytes.into(),
        }
    }

    /// Encode a sequence of instructions into a program.
    pub fn encode(instructions: &[Instruction]) -> Self {
        let mut bytes = Vec::with_capacity(instructions.iter().map(Instruction::size).sum());
        for instr in instructions {
            instr.encode_into(&mut bytes);
        }
        Self::new(bytes)
    }

    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Decode the instruction at `offset`.
    #[inline]
    pub fn decode_at(&self, offset: usize) -> Result<Instruction, DecodeError> {
        Instruction::decode(&self.bytes, offset)
    }

    /// Walk instructions in buffer order, ignoring control flow.
    ///
    /// Stops after the first decode error.
    pub fn instructions(&self) -> Instructions<'_> {
        Instructions {
            bytes: &self.bytes,
            offset: 0,
            failed: false,
        }
    }
}

impl Deref for Program {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        &self.bytes
    }
}

impl std::fmt::Debug for Program {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Program")
            .field("len", &self.bytes.len())
            .finish()
    }
}

impl From<Vec<u8>> for Program {
    fn from(bytes: Vec<u8>) -> Self {
        Self::new(bytes)
    }
}

impl FromIterator<Instruction> for Program {
    fn from_iter<I: IntoIterator<Item = Instruction>>(iter: I) -> Self {
        let mut bytes = Vec::new();
        for instr in iter {
            instr.encode_into(&mut bytes);
        }
        Self::new(bytes)
    }
}

/// Linear instruction iterator returned by [`Program::instructions`].
pub struct Instructions<'p> {
    bytes: &'p [u8],
    offset: usize,
    failed: bool,
}

impl Iterator for Instructions<'_> {
    type Item = Result<(usize, Instruction), DecodeError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed || self.offset >= self.bytes.len() {
            return None;
        }

        let offset = self.offset;
        match Instruction::decode(self.bytes, offset) {
            Ok(instr) => {
                self.offset += instr.size();
                Some(Ok((offset, instr)))
            }
            Err(e) => {
                self.failed = true;
                Some(Err(e))
            }
        }
    }
}
