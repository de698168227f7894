//! Human-readable program listing.
//!
//! Output layout:
//!
//! ```text
//! [labels]
//! L1 = 000c
//!
//! [code]
//!   0000 10 push  7
//!   0009 a0 label L1
//!   000c a3 jmpz  L1  ; -> 000c
//! ```
//!
//! Label targets come from [`LabelTable::resolve`], the same pass the VM runs
//! before executing. When resolution fails, the error takes the place of the
//! label list and every reference is marked `; unresolved`.
//!
//! The listing is a diagnostic view, so it keeps going where execution would
//! stop: an unknown byte is shown as `<unknown>` and decoding resumes at the
//! next byte. A truncated tail ends the listing.

use std::fmt::Write as _;

use crate::Colors;

use super::format::{format_instruction, format_offset};
use super::instructions::{Instruction, Opcode};
use super::labels::LabelTable;
use super::program::{DecodeError, Program};

/// Generate a listing of `program`.
pub fn dump(program: &Program, colors: Colors) -> String {
    let mut out = String::new();
    let labels = LabelTable::resolve(program);
    let entries = scan(program);

    dump_labels(&mut out, &labels, colors);
    dump_code(&mut out, &entries, labels.as_ref().ok(), colors);

    out
}

enum Entry {
    Instr(usize, Instruction),
    Unknown(usize, u8),
    Truncated(usize, Opcode),
}

/// Decode every entry, stepping over unknown bytes.
fn scan(program: &Program) -> Vec<Entry> {
    let mut entries = Vec::new();
    let mut offset = 0;

    while offset < program.len() {
        match program.decode_at(offset) {
            Ok(instr) => {
                entries.push(Entry::Instr(offset, instr));
                offset += instr.size();
            }
            Err(DecodeError::UnknownOpcode { byte, .. }) => {
                entries.push(Entry::Unknown(offset, byte));
                offset += 1;
            }
            Err(DecodeError::Truncated { opcode, .. }) => {
                entries.push(Entry::Truncated(offset, opcode));
                break;
            }
            Err(DecodeError::EndOfProgram { .. }) => break,
        }
    }

    entries
}

fn dump_labels(out: &mut String, labels: &Result<LabelTable, DecodeError>, c: Colors) {
    if matches!(labels, Ok(table) if table.is_empty()) {
        return;
    }

    writeln!(out, "{}[labels]{}", c.heading, c.reset).unwrap();
    match labels {
        Ok(table) => {
            for (id, offset) in table.iter() {
                writeln!(out, "L{} = {}", id.get(), format_offset(offset)).unwrap();
            }
        }
        Err(e) => writeln!(out, "{}; unresolved: {e}{}", c.error, c.reset).unwrap(),
    }
    out.push('\n');
}

fn dump_code(out: &mut String, entries: &[Entry], labels: Option<&LabelTable>, c: Colors) {
    writeln!(out, "{}[code]{}", c.heading, c.reset).unwrap();

    for entry in entries {
        let line = match *entry {
            Entry::Instr(offset, ref instr) => {
                let mut line = format!(
                    "{} {}",
                    prefix(offset, instr.opcode().to_byte(), c),
                    format_instruction(instr, c)
                );
                if instr.opcode().references_label()
                    && let Some(id) = instr.label()
                {
                    let note = match labels.map(|table| table.get(id)) {
                        Some(Some(target)) => format!("-> {}", format_offset(target)),
                        Some(None) => "undefined".to_string(),
                        None => "unresolved".to_string(),
                    };
                    write!(line, "  {}; {}{}", c.muted, note, c.reset).unwrap();
                }
                line
            }
            Entry::Unknown(offset, byte) => format!("{} <unknown>", prefix(offset, byte, c)),
            Entry::Truncated(offset, opcode) => format!(
                "{} <truncated {}>",
                prefix(offset, opcode.to_byte(), c),
                opcode.mnemonic()
            ),
        };
        writeln!(out, "{line}").unwrap();
    }
}

/// `  offset byte` with both columns dimmed.
fn prefix(offset: usize, byte: u8, c: Colors) -> String {
    format!(
        "  {}{} {:02x}{}",
        c.muted,
        format_offset(offset),
        byte,
        c.reset
    )
}
