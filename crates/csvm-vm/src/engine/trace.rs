//! Tracing infrastructure for debugging VM execution.
//!
//! The VM is generic over [`Tracer`]. With [`NoopTracer`] every hook is an
//! empty `#[inline(always)]` function and the calls compile away; the
//! `execute` entry point uses it.
//!
//! [`PrintTracer`] writes one line per executed instruction plus sub-lines
//! for control transfers and, at higher verbosity, machine state. Lines go to
//! its writer as they are produced, so a long or non-terminating run streams
//! instead of accumulating. With `-v`:
//!
//! ```text
//!   0000 push  7
//!        stack [7]
//!   0009 call  L1
//!        ▶ 0010  ret 000c
//!        stack [7]
//!   0010 ret
//!        ◀ 000c
//!        stack [7]
//!   000c halt
//!        ◼ 7
//! ```

use std::fmt;
use std::io::{self, Write};

use csvm_bytecode::{Colors, Instruction, format_instruction, format_offset};

/// Verbosity level for trace output.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord)]
pub enum Verbosity {
    /// Instructions and control transfers.
    #[default]
    Default,
    /// Also the operand stack after each instruction (-v).
    Verbose,
    /// Also non-zero registers after each instruction (-vv).
    VeryVerbose,
}

/// Tracer trait for VM execution instrumentation.
///
/// Hooks receive raw machine data; formatting belongs to the implementation.
/// Call order per instruction: `trace_instruction`, then at most one of
/// `trace_jump` / `trace_call` / `trace_return` / `trace_halt`, then
/// `trace_state` unless the run halted.
pub trait Tracer {
    /// Called after decoding, before executing.
    fn trace_instruction(&mut self, ip: usize, instr: &Instruction);

    /// Called when a jump redirects the instruction pointer.
    fn trace_jump(&mut self, target: usize);

    /// Called when a call pushes `return_addr` and enters `target`.
    fn trace_call(&mut self, target: usize, return_addr: usize);

    /// Called when a return pops `return_addr`.
    fn trace_return(&mut self, return_addr: usize);

    /// Called after an instruction completes without halting.
    fn trace_state(&mut self, stack: &[i64], registers: &[i64]);

    /// Called when `halt` produces the run result.
    fn trace_halt(&mut self, value: i64);

    /// Called when execution runs off the end of the program.
    fn trace_end(&mut self);
}

/// No-op tracer that gets optimized away completely.
pub struct NoopTracer;

impl Tracer for NoopTracer {
    #[inline(always)]
    fn trace_instruction(&mut self, _ip: usize, _instr: &Instruction) {}

    #[inline(always)]
    fn trace_jump(&mut self, _target: usize) {}

    #[inline(always)]
    fn trace_call(&mut self, _target: usize, _return_addr: usize) {}

    #[inline(always)]
    fn trace_return(&mut self, _return_addr: usize) {}

    #[inline(always)]
    fn trace_state(&mut self, _stack: &[i64], _registers: &[i64]) {}

    #[inline(always)]
    fn trace_halt(&mut self, _value: i64) {}

    #[inline(always)]
    fn trace_end(&mut self) {}
}

/// Sub-line indent: aligns with the mnemonic column of instruction lines.
const SUB_INDENT: &str = "       ";

/// Tracer that writes a human-readable execution trace.
///
/// Hooks cannot fail, so the first write error is kept and later lines are
/// dropped; [`PrintTracer::finish`] reports it.
pub struct PrintTracer<W: Write> {
    verbosity: Verbosity,
    colors: Colors,
    out: W,
    error: Option<io::Error>,
}

/// Builder for [`PrintTracer`].
pub struct PrintTracerBuilder<W> {
    verbosity: Verbosity,
    colored: bool,
    out: W,
}

impl<W: Write> PrintTracerBuilder<W> {
    pub fn verbosity(mut self, verbosity: Verbosity) -> Self {
        self.verbosity = verbosity;
        self
    }

    pub fn colored(mut self, colored: bool) -> Self {
        self.colored = colored;
        self
    }

    /// Set the trace destination.
    pub fn writer<O: Write>(self, out: O) -> PrintTracerBuilder<O> {
        PrintTracerBuilder {
            verbosity: self.verbosity,
            colored: self.colored,
            out,
        }
    }

    pub fn build(self) -> PrintTracer<W> {
        PrintTracer::new(self.out, self.verbosity, Colors::new(self.colored))
    }
}

impl PrintTracer<io::Stderr> {
    /// Create a builder. The trace goes to stderr unless a writer is set;
    /// stdout belongs to the program.
    pub fn builder() -> PrintTracerBuilder<io::Stderr> {
        PrintTracerBuilder {
            verbosity: Verbosity::Default,
            colored: false,
            out: io::stderr(),
        }
    }
}

impl<W: Write> PrintTracer<W> {
    pub fn new(out: W, verbosity: Verbosity, colors: Colors) -> Self {
        Self {
            verbosity,
            colors,
            out,
            error: None,
        }
    }

    pub fn writer(&self) -> &W {
        &self.out
    }

    /// Flush and hand back the writer, or the first write error.
    pub fn finish(mut self) -> io::Result<W> {
        if let Some(e) = self.error.take() {
            return Err(e);
        }
        self.out.flush()?;
        Ok(self.out)
    }

    fn line(&mut self, line: fmt::Arguments<'_>) {
        if self.error.is_some() {
            return;
        }
        if let Err(e) = writeln!(self.out, "{line}") {
            self.error = Some(e);
        }
    }

    fn sub_line(&mut self, content: fmt::Arguments<'_>) {
        let c = self.colors;
        self.line(format_args!("{SUB_INDENT}{}{}{}", c.muted, content, c.reset));
    }
}

impl<W: Write> Tracer for PrintTracer<W> {
    fn trace_instruction(&mut self, ip: usize, instr: &Instruction) {
        let c = self.colors;
        self.line(format_args!(
            "  {}{}{} {}",
            c.muted,
            format_offset(ip),
            c.reset,
            format_instruction(instr, c)
        ));
    }

    fn trace_jump(&mut self, target: usize) {
        self.sub_line(format_args!("→ {}", format_offset(target)));
    }

    fn trace_call(&mut self, target: usize, return_addr: usize) {
        self.sub_line(format_args!(
            "▶ {}  ret {}",
            format_offset(target),
            format_offset(return_addr)
        ));
    }

    fn trace_return(&mut self, return_addr: usize) {
        self.sub_line(format_args!("◀ {}", format_offset(return_addr)));
    }

    fn trace_state(&mut self, stack: &[i64], registers: &[i64]) {
        if self.verbosity >= Verbosity::Verbose {
            self.sub_line(format_args!("stack {stack:?}"));
        }
        if self.verbosity >= Verbosity::VeryVerbose {
            let set: Vec<String> = registers
                .iter()
                .enumerate()
                .filter(|&(_, &v)| v != 0)
                .map(|(i, v)| format!("r{i}={v}"))
                .collect();
            let regs = if set.is_empty() {
                "-".to_string()
            } else {
                set.join(" ")
            };
            self.sub_line(format_args!("regs  {regs}"));
        }
    }

    fn trace_halt(&mut self, value: i64) {
        self.sub_line(format_args!("◼ {value}"));
    }

    fn trace_end(&mut self) {
        self.sub_line(format_args!("◼ end of program"));
    }
}
