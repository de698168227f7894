//! General-purpose register file.

use csvm_bytecode::REGISTER_COUNT;

/// Sixteen 64-bit registers, zeroed at the start of every run.
///
/// Indices arrive as raw instruction bytes; anything outside `0..16` is
/// rejected rather than masked.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RegisterFile {
    slots: [i64; REGISTER_COUNT],
}

impl RegisterFile {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn get(&self, index: u8) -> Option<i64> {
        self.slots.get(index as usize).copied()
    }

    #[inline]
    pub fn get_mut(&mut self, index: u8) -> Option<&mut i64> {
        self.slots.get_mut(index as usize)
    }

    pub fn as_slice(&self) -> &[i64] {
        &self.slots
    }

    pub fn clear(&mut self) {
        self.slots = [0; REGISTER_COUNT];
    }
}
