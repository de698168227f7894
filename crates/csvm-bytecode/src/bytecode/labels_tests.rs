//! Tests for label resolution.

use super::instructions::{Instruction, LabelId};
use super::labels::LabelTable;
use super::program::{DecodeError, Program};

#[test]
fn label_maps_to_offset_after_declaration() {
    let program = Program::encode(&[
        Instruction::Push(1),
        Instruction::Label(LabelId(7)),
        Instruction::Halt,
    ]);
    let labels = LabelTable::resolve(&program).unwrap();

    assert_eq!(labels.get(LabelId(7)), Some(12));
    assert_eq!(labels.get(LabelId(8)), None);
    assert_eq!(labels.len(), 1);
}

#[test]
fn later_declaration_wins() {
    let program = Program::encode(&[
        Instruction::Jump(LabelId(3)),
        Instruction::Label(LabelId(3)),
        Instruction::Halt,
        Instruction::Label(LabelId(3)),
        Instruction::Halt,
    ]);
    let labels = LabelTable::resolve(&program).unwrap();

    assert_eq!(labels.get(LabelId(3)), Some(10));
    assert_eq!(labels.len(), 1);
}

#[test]
fn label_offsets_agree_with_linear_decode() {
    let program = Program::encode(&[
        Instruction::MoveLiteral { reg: 0, value: 1 },
        Instruction::Label(LabelId(0)),
        Instruction::Push(2),
        Instruction::Label(LabelId(u16::MAX)),
        Instruction::MoveRegister { dst: 1, src: 0 },
        Instruction::Label(LabelId(256)),
    ]);
    let labels = LabelTable::resolve(&program).unwrap();

    for item in program.instructions() {
        let (offset, instr) = item.unwrap();
        if let Instruction::Label(id) = instr {
            assert_eq!(labels.get(id), Some(offset + instr.size()));
        }
    }
    assert_eq!(labels.len(), 3);
}

#[test]
fn operand_bytes_are_not_scanned() {
    // 0xA0 inside a literal must not be mistaken for a declaration.
    let program = Program::encode(&[Instruction::Push(0xA0_05_00), Instruction::Halt]);
    let labels = LabelTable::resolve(&program).unwrap();
    assert!(labels.is_empty());
}

#[test]
fn unknown_opcode_fails_resolution() {
    let mut bytes = Instruction::Label(LabelId(1)).to_bytes();
    bytes.push(0x02);
    bytes.extend(Instruction::Label(LabelId(2)).to_bytes());

    let err = LabelTable::resolve(&Program::new(bytes)).unwrap_err();
    assert_eq!(
        err,
        DecodeError::UnknownOpcode {
            byte: 0x02,
            offset: 3
        }
    );
}

#[test]
fn truncated_tail_outside_label_is_ignored() {
    let program = Program::new(vec![0xA0, 0x01, 0x00, 0x10, 0x01]);
    let labels = LabelTable::resolve(&program).unwrap();
    assert_eq!(labels.get(LabelId(1)), Some(3));
}

#[test]
fn truncated_label_fails_resolution() {
    let program = Program::new(vec![0x11, 0xA0, 0x01]);
    let err = LabelTable::resolve(&program).unwrap_err();
    assert!(matches!(err, DecodeError::Truncated { offset: 1, .. }));
}

#[test]
fn iter_is_ordered_by_id() {
    let program = Program::encode(&[
        Instruction::Label(LabelId(9)),
        Instruction::Label(LabelId(2)),
    ]);
    let labels = LabelTable::resolve(&program).unwrap();
    let entries: Vec<_> = labels.iter().collect();

    assert_eq!(entries, [(LabelId(2), 6), (LabelId(9), 3)]);
    assert_eq!(format!("{labels:?}"), "{2: 6, 9: 3}");
}
