//! Tests for execution tracing.

use std::cell::RefCell;
use std::io::{self, Write};
use std::rc::Rc;

use csvm_bytecode::{Colors, Instruction, LabelId, Program};

use super::trace::{PrintTracer, Verbosity};
use super::vm::{Exit, VM};

use Instruction::*;

const L1: LabelId = LabelId(1);

fn trace(instrs: &[Instruction], verbosity: Verbosity) -> Vec<String> {
    let program = Program::encode(instrs);
    let mut tracer = PrintTracer::builder()
        .verbosity(verbosity)
        .writer(Vec::new())
        .build();
    VM::builder(&program)
        .build()
        .execute_with(&mut tracer)
        .unwrap();
    lines(tracer.finish().unwrap())
}

fn lines(out: Vec<u8>) -> Vec<String> {
    String::from_utf8(out)
        .unwrap()
        .lines()
        .map(str::to_owned)
        .collect()
}

/// Writer whose contents stay readable while a tracer owns a clone.
#[derive(Clone, Default)]
struct SharedBuf(Rc<RefCell<Vec<u8>>>);

impl SharedBuf {
    fn lines(&self) -> Vec<String> {
        lines(self.0.borrow().clone())
    }
}

impl Write for SharedBuf {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.borrow_mut().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Program output sink that records the trace seen at each program write.
struct TraceAtOutput {
    trace: SharedBuf,
    seen: Rc<RefCell<Vec<Vec<String>>>>,
}

impl Write for TraceAtOutput {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.seen.borrow_mut().push(self.trace.lines());
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

struct BrokenPipe;

impl Write for BrokenPipe {
    fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
        Err(io::ErrorKind::BrokenPipe.into())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// push 7; call L1; halt; label L1; ret
fn call_program() -> [Instruction; 5] {
    [Push(7), Call(L1), Halt, Label(L1), Return]
}

#[test]
fn default_verbosity_shows_control_flow() {
    let lines = trace(&call_program(), Verbosity::Default);

    insta::assert_debug_snapshot!(lines, @r#"
    [
        "  0000 push  7",
        "  0009 call  L1",
        "       ▶ 0010  ret 000c",
        "  0010 ret",
        "       ◀ 000c",
        "  000c halt",
        "       ◼ 7",
    ]
    "#);
}

#[test]
fn verbose_adds_stack_snapshots() {
    let lines = trace(&call_program(), Verbosity::Verbose);

    insta::assert_debug_snapshot!(lines, @r#"
    [
        "  0000 push  7",
        "       stack [7]",
        "  0009 call  L1",
        "       ▶ 0010  ret 000c",
        "       stack [7]",
        "  0010 ret",
        "       ◀ 000c",
        "       stack [7]",
        "  000c halt",
        "       ◼ 7",
    ]
    "#);
}

#[test]
fn very_verbose_adds_registers() {
    let lines = trace(
        &[MoveLiteral { reg: 2, value: 5 }, Load(2), Drop],
        Verbosity::VeryVerbose,
    );

    assert_eq!(
        lines,
        [
            "  0000 movl  r2, 5",
            "       stack []",
            "       regs  r2=5",
            "  000a ld    r2",
            "       stack [5]",
            "       regs  r2=5",
            "  000c drop",
            "       stack []",
            "       regs  r2=5",
            "       ◼ end of program",
        ]
    );
}

#[test]
fn zeroed_registers_print_a_dash() {
    let lines = trace(&[Push(1)], Verbosity::VeryVerbose);
    assert_eq!(lines[2], "       regs  -");
}

#[test]
fn jumps_show_target() {
    let lines = trace(
        &[Push(0), JumpIfZero(L1), Label(L1), Push(3), Halt],
        Verbosity::Default,
    );

    assert_eq!(
        lines,
        [
            "  0000 push  0",
            "  0009 jmpz  L1",
            "       → 000f",
            "  000f push  3",
            "  0018 halt",
            "       ◼ 3",
        ]
    );
}

#[test]
fn untaken_branch_has_no_sub_line() {
    let lines = trace(
        &[Push(1), JumpIfZero(L1), Label(L1)],
        Verbosity::Default,
    );

    assert_eq!(
        lines,
        [
            "  0000 push  1",
            "  0009 jmpz  L1",
            "  000c label L1",
            "       ◼ end of program",
        ]
    );
}

#[test]
fn trace_stops_at_fault() {
    let program = Program::encode(&[Push(1), Drop, Drop, Push(2)]);
    let mut tracer = PrintTracer::builder().writer(Vec::new()).build();
    let mut vm = VM::builder(&program).build();

    assert!(vm.execute_with(&mut tracer).is_err());
    assert_eq!(
        lines(tracer.finish().unwrap()),
        ["  0000 push  1", "  0009 drop", "  000a drop"]
    );
}

#[test]
fn colored_trace_wraps_fields() {
    let program = Program::encode(&[Push(4), Halt]);
    let mut tracer = PrintTracer::builder()
        .colored(true)
        .writer(Vec::new())
        .build();
    let exit = VM::builder(&program).build().execute_with(&mut tracer).unwrap();

    assert_eq!(exit, Exit::Halted(4));
    let c = Colors::ON;
    let lines = lines(tracer.finish().unwrap());
    assert_eq!(
        lines[0],
        format!(
            "  {}0000{} {}push {} {}4{}",
            c.muted, c.reset, c.mnemonic, c.reset, c.literal, c.reset
        )
    );
    assert_eq!(lines[2], format!("       {}◼ 4{}", c.muted, c.reset));
}

#[test]
fn lines_reach_writer_before_run_ends() {
    let trace = SharedBuf::default();
    let seen = Rc::new(RefCell::new(Vec::new()));
    let output = TraceAtOutput {
        trace: trace.clone(),
        seen: Rc::clone(&seen),
    };
    let program = Program::encode(&[Push(1), PrintNumber, Push(2), Halt]);
    let mut tracer = PrintTracer::builder().writer(trace.clone()).build();

    let exit = VM::builder(&program)
        .output(output)
        .build()
        .execute_with(&mut tracer)
        .unwrap();

    assert_eq!(exit, Exit::Halted(2));
    assert_eq!(seen.borrow()[0], ["  0000 push  1", "  0009 putn"]);
    assert_eq!(
        trace.lines(),
        [
            "  0000 push  1",
            "  0009 putn",
            "  000a push  2",
            "  0013 halt",
            "       ◼ 2",
        ]
    );
}

#[test]
fn write_error_surfaces_on_finish() {
    let program = Program::encode(&[Push(1), Push(2), Add, Halt]);
    let mut tracer = PrintTracer::builder().writer(BrokenPipe).build();

    let exit = VM::builder(&program).build().execute_with(&mut tracer).unwrap();

    assert_eq!(exit, Exit::Halted(3));
    let err = tracer.finish().err().unwrap();
    assert_eq!(err.kind(), io::ErrorKind::BrokenPipe);
}
