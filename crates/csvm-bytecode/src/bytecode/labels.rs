//! Label resolution.
//!
//! One forward pass over the buffer, measuring each instruction by its opcode
//! alone. Nothing is executed and operand values are never validated; only
//! label declarations are read, so a program with garbage in a `push` literal
//! still resolves.

use std::num::NonZeroUsize;

use tracing::{debug, trace};

use super::instructions::{LabelId, Opcode, read_label};
use super::program::{DecodeError, Program};

/// Number of addressable label ids.
pub const LABEL_COUNT: usize = 1 << 16;

/// Label id → offset immediately after the declaring `label` instruction.
///
/// Fixed-size table indexed by id. Offsets are never zero (a declaration
/// occupies three bytes), which keeps each slot at one word.
pub struct LabelTable {
    slots: Box<[Option<NonZeroUsize>]>,
    declared: usize,
}

impl LabelTable {
    /// Table with no declarations.
    pub fn empty() -> Self {
        Self {
            slots: vec![None; LABEL_COUNT].into_boxed_slice(),
            declared: 0,
        }
    }

    /// Scan `program` and record every label declaration.
    ///
    /// Later declarations of the same id overwrite earlier ones. An unknown
    /// opcode anywhere in the buffer fails the whole resolution.
    pub fn resolve(program: &Program) -> Result<Self, DecodeError> {
        let bytes = program.as_bytes();
        let mut table = Self::empty();
        let mut cursor = 0;

        while cursor < bytes.len() {
            let start = cursor;
            let byte = bytes[start];
            let opcode = Opcode::from_byte(byte).ok_or(DecodeError::UnknownOpcode {
                byte,
                offset: start,
            })?;
            cursor += opcode.size();

            if opcode != Opcode::Label {
                continue;
            }

            let Some(operands) = bytes.get(start + 1..cursor) else {
                return Err(DecodeError::Truncated {
                    opcode,
                    offset: start,
                    size: opcode.size(),
                    available: bytes.len() - start,
                });
            };
            table.insert(read_label(operands), cursor);
        }

        debug!(
            labels = table.declared,
            bytes = bytes.len(),
            "label resolution finished"
        );
        Ok(table)
    }

    fn insert(&mut self, id: LabelId, offset: usize) {
        let slot = &mut self.slots[id.get() as usize];
        match std::mem::replace(slot, NonZeroUsize::new(offset)) {
            Some(previous) => debug!(
                label = id.get(),
                previous = previous.get(),
                offset,
                "label redeclared, later declaration wins"
            ),
            None => self.declared += 1,
        }
        trace!(label = id.get(), offset, "label resolved");
    }

    /// Resolved offset for `id`, if declared.
    #[inline]
    pub fn get(&self, id: LabelId) -> Option<usize> {
        self.slots[id.get() as usize].map(NonZeroUsize::get)
    }

    /// Number of distinct declared ids.
    pub fn len(&self) -> usize {
        self.declared
    }

    pub fn is_empty(&self) -> bool {
        self.declared == 0
    }

    /// Declared labels in ascending id order.
    pub fn iter(&self) -> impl Iterator<Item = (LabelId, usize)> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(id, slot)| slot.map(|offset| (LabelId(id as u16), offset.get())))
    }
}

impl Default for LabelTable {
    fn default() -> Self {
        Self::empty()
    }
}

impl std::fmt::Debug for LabelTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_map()
            .entries(self.iter().map(|(id, offset)| (id.get(), offset)))
            .finish()
    }
}
