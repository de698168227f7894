//! Instruction catalog: opcodes, encoded sizes and in-place decoding.
//!
//! Every opcode has a fixed encoded length that depends only on the opcode,
//! never on operand values. A single linear scan can therefore find every
//! instruction boundary without executing control flow.
//!
//! Encoding (offsets relative to the opcode byte, little-endian):
//! - `movl`: reg(1) literal(8)
//! - `movr`: dst(1) src(1)
//! - `push`: literal(8)
//! - `ld` / `st`: reg(1)
//! - `label`, `call`, `jmp*`: label id(2)

use super::program::DecodeError;

/// Number of general-purpose registers in the register file.
pub const REGISTER_COUNT: usize = 16;

/// Label identifier declared in-line by a `label` instruction.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct LabelId(pub u16);

impl LabelId {
    pub const fn new(id: u16) -> Self {
        Self(id)
    }

    #[inline]
    pub const fn get(self) -> u16 {
        self.0
    }
}

/// One-byte instruction header.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
#[repr(u8)]
pub enum Opcode {
    Halt = 0x00,
    Debug = 0x01,
    MoveLiteral = 0x08,
    MoveRegister = 0x09,
    Push = 0x10,
    Dup = 0x11,
    Drop = 0x12,
    Swap = 0x13,
    Load = 0x20,
    Store = 0x21,
    Add = 0x30,
    Sub = 0x31,
    Mul = 0x32,
    Div = 0x33,
    Mod = 0x34,
    Label = 0xA0,
    Call = 0xA1,
    Jump = 0xA2,
    JumpIfZero = 0xA3,
    JumpIfNonZero = 0xA4,
    JumpIfPositive = 0xA5,
    JumpIfNegative = 0xA6,
    Return = 0xA7,
    PrintNumber = 0xB0,
    PrintChar = 0xB1,
}

impl Opcode {
    /// All opcodes in encoding order.
    pub const ALL: [Opcode; 25] = [
        Self::Halt,
        Self::Debug,
        Self::MoveLiteral,
        Self::MoveRegister,
        Self::Push,
        Self::Dup,
        Self::Drop,
        Self::Swap,
        Self::Load,
        Self::Store,
        Self::Add,
        Self::Sub,
        Self::Mul,
        Self::Div,
        Self::Mod,
        Self::Label,
        Self::Call,
        Self::Jump,
        Self::JumpIfZero,
        Self::JumpIfNonZero,
        Self::JumpIfPositive,
        Self::JumpIfNegative,
        Self::Return,
        Self::PrintNumber,
        Self::PrintChar,
    ];

    /// Decode from the header byte. Returns `None` for unassigned bytes.
    pub fn from_byte(b: u8) -> Option<Self> {
        let op = match b {
            0x00 => Self::Halt,
            0x01 => Self::Debug,
            0x08 => Self::MoveLiteral,
            0x09 => Self::MoveRegister,
            0x10 => Self::Push,
            0x11 => Self::Dup,
            0x12 => Self::Drop,
            0x13 => Self::Swap,
            0x20 => Self::Load,
            0x21 => Self::Store,
            0x30 => Self::Add,
            0x31 => Self::Sub,
            0x32 => Self::Mul,
            0x33 => Self::Div,
            0x34 => Self::Mod,
            0xA0 => Self::Label,
            0xA1 => Self::Call,
            0xA2 => Self::Jump,
            0xA3 => Self::JumpIfZero,
            0xA4 => Self::JumpIfNonZero,
            0xA5 => Self::JumpIfPositive,
            0xA6 => Self::JumpIfNegative,
            0xA7 => Self::Return,
            0xB0 => Self::PrintNumber,
            0xB1 => Self::PrintChar,
            _ => return None,
        };
        Some(op)
    }

    #[inline]
    pub fn to_byte(self) -> u8 {
        self as u8
    }

    /// Encoded size in bytes, header included.
    pub fn size(self) -> usize {
        match self {
            Self::Halt
            | Self::Debug
            | Self::Dup
            | Self::Drop
            | Self::Swap
            | Self::Add
            | Self::Sub
            | Self::Mul
            | Self::Div
            | Self::Mod
            | Self::Return
            | Self::PrintNumber
            | Self::PrintChar => 1,
            Self::Load | Self::Store => 2,
            Self::MoveRegister
            | Self::Label
            | Self::Call
            | Self::Jump
            | Self::JumpIfZero
            | Self::JumpIfNonZero
            | Self::JumpIfPositive
            | Self::JumpIfNegative => 3,
            Self::Push => 9,
            Self::MoveLiteral => 10,
        }
    }

    /// Short assembly-style name.
    pub fn mnemonic(self) -> &'static str {
        match self {
            Self::Halt => "halt",
            Self::Debug => "dbg",
            Self::MoveLiteral => "movl",
            Self::MoveRegister => "movr",
            Self::Push => "push",
            Self::Dup => "dup",
            Self::Drop => "drop",
            Self::Swap => "swap",
            Self::Load => "ld",
            Self::Store => "st",
            Self::Add => "add",
            Self::Sub => "sub",
            Self::Mul => "mul",
            Self::Div => "div",
            Self::Mod => "mod",
            Self::Label => "label",
            Self::Call => "call",
            Self::Jump => "jmp",
            Self::JumpIfZero => "jmpz",
            Self::JumpIfNonZero => "jmpnz",
            Self::JumpIfPositive => "jmpp",
            Self::JumpIfNegative => "jmpn",
            Self::Return => "ret",
            Self::PrintNumber => "putn",
            Self::PrintChar => "putc",
        }
    }

    /// True for opcodes whose operand is a label reference (not a declaration).
    pub fn references_label(self) -> bool {
        matches!(
            self,
            Self::Call
                | Self::Jump
                | Self::JumpIfZero
                | Self::JumpIfNonZero
                | Self::JumpIfPositive
                | Self::JumpIfNegative
        )
    }
}

/// Decoded instruction.
///
/// Register operands are kept as raw bytes; range checking against
/// [`REGISTER_COUNT`] belongs to the executor.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Instruction {
    Halt,
    Debug,
    MoveLiteral { reg: u8, value: i64 },
    MoveRegister { dst: u8, src: u8 },
    Push(i64),
    Dup,
    Drop,
    Swap,
    Load(u8),
    Store(u8),
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Label(LabelId),
    Call(LabelId),
    Jump(LabelId),
    JumpIfZero(LabelId),
    JumpIfNonZero(LabelId),
    JumpIfPositive(LabelId),
    JumpIfNegative(LabelId),
    Return,
    PrintNumber,
    PrintChar,
}

impl Instruction {
    /// Decode the instruction starting at `offset`.
    pub fn decode(bytes: &[u8], offset: usize) -> Result<Self, DecodeError> {
        let Some(&byte) = bytes.get(offset) else {
            return Err(DecodeError::EndOfProgram {
                offset,
                len: bytes.len(),
            });
        };
        let opcode = Opcode::from_byte(byte).ok_or(DecodeError::UnknownOpcode { byte, offset })?;

        let size = opcode.size();
        let Some(raw) = bytes.get(offset..offset + size) else {
            return Err(DecodeError::Truncated {
                opcode,
                offset,
                size,
                available: bytes.len() - offset,
            });
        };
        let ops = &raw[1..];

        let instr = match opcode {
            Opcode::Halt => Self::Halt,
            Opcode::Debug => Self::Debug,
            Opcode::MoveLiteral => Self::MoveLiteral {
                reg: ops[0],
                value: read_i64(&ops[1..]),
            },
            Opcode::MoveRegister => Self::MoveRegister {
                dst: ops[0],
                src: ops[1],
            },
            Opcode::Push => Self::Push(read_i64(ops)),
            Opcode::Dup => Self::Dup,
            Opcode::Drop => Self::Drop,
            Opcode::Swap => Self::Swap,
            Opcode::Load => Self::Load(ops[0]),
            Opcode::Store => Self::Store(ops[0]),
            Opcode::Add => Self::Add,
            Opcode::Sub => Self::Sub,
            Opcode::Mul => Self::Mul,
            Opcode::Div => Self::Div,
            Opcode::Mod => Self::Mod,
            Opcode::Label => Self::Label(read_label(ops)),
            Opcode::Call => Self::Call(read_label(ops)),
            Opcode::Jump => Self::Jump(read_label(ops)),
            Opcode::JumpIfZero => Self::JumpIfZero(read_label(ops)),
            Opcode::JumpIfNonZero => Self::JumpIfNonZero(read_label(ops)),
            Opcode::JumpIfPositive => Self::JumpIfPositive(read_label(ops)),
            Opcode::JumpIfNegative => Self::JumpIfNegative(read_label(ops)),
            Opcode::Return => Self::Return,
            Opcode::PrintNumber => Self::PrintNumber,
            Opcode::PrintChar => Self::PrintChar,
        };
        Ok(instr)
    }

    pub fn opcode(&self) -> Opcode {
        match self {
            Self::Halt => Opcode::Halt,
            Self::Debug => Opcode::Debug,
            Self::MoveLiteral { .. } => Opcode::MoveLiteral,
            Self::MoveRegister { .. } => Opcode::MoveRegister,
            Self::Push(_) => Opcode::Push,
            Self::Dup => Opcode::Dup,
            Self::Drop => Opcode::Drop,
            Self::Swap => Opcode::Swap,
            Self::Load(_) => Opcode::Load,
            Self::Store(_) => Opcode::Store,
            Self::Add => Opcode::Add,
            Self::Sub => Opcode::Sub,
            Self::Mul => Opcode::Mul,
            Self::Div => Opcode::Div,
            Self::Mod => Opcode::Mod,
            Self::Label(_) => Opcode::Label,
            Self::Call(_) => Opcode::Call,
            Self::Jump(_) => Opcode::Jump,
            Self::JumpIfZero(_) => Opcode::JumpIfZero,
            Self::JumpIfNonZero(_) => Opcode::JumpIfNonZero,
            Self::JumpIfPositive(_) => Opcode::JumpIfPositive,
            Self::JumpIfNegative(_) => Opcode::JumpIfNegative,
            Self::Return => Opcode::Return,
            Self::PrintNumber => Opcode::PrintNumber,
            Self::PrintChar => Opcode::PrintChar,
        }
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.opcode().size()
    }

    /// Label operand, for declarations and references alike.
    pub fn label(&self) -> Option<LabelId> {
        match *self {
            Self::Label(id)
            | Self::Call(id)
            | Self::Jump(id)
            | Self::JumpIfZero(id)
            | Self::JumpIfNonZero(id)
            | Self::JumpIfPositive(id)
            | Self::JumpIfNegative(id) => Some(id),
            _ => None,
        }
    }

    /// Append the encoded form to `out`.
    pub fn encode_into(&self, out: &mut Vec<u8>) {
        out.push(self.opcode().to_byte());
        match *self {
            Self::MoveLiteral { reg, value } => {
                out.push(reg);
                out.extend_from_slice(&value.to_le_bytes());
            }
            Self::MoveRegister { dst, src } => {
                out.push(dst);
                out.push(src);
            }
            Self::Push(value) => out.extend_from_slice(&value.to_le_bytes()),
            Self::Load(reg) | Self::Store(reg) => out.push(reg),
            Self::Label(id)
            | Self::Call(id)
            | Self::Jump(id)
            | Self::JumpIfZero(id)
            | Self::JumpIfNonZero(id)
            | Self::JumpIfPositive(id)
            | Self::JumpIfNegative(id) => out.extend_from_slice(&id.get().to_le_bytes()),
            _ => {}
        }
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.size());
        self.encode_into(&mut out);
        out
    }
}

fn read_i64(b: &[u8]) -> i64 {
    i64::from_le_bytes([b[0], b[1], b[2], b[3], b[4], b[5], b[6], b[7]])
}

/// Low byte first.
pub(crate) fn read_label(b: &[u8]) -> LabelId {
    LabelId(u16::from_le_bytes([b[0], b[1]]))
}
