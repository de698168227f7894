//! Virtual machine for executing csvm programs.

use std::io::{self, Write};

use csvm_bytecode::{Instruction, LabelId, LabelTable, Program};
use tracing::{debug, trace};

use super::error::RuntimeError;
use super::registers::RegisterFile;
use super::stack::{CallStack, OperandStack, StackFault};
use super::trace::{NoopTracer, Tracer};

/// How a run ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Exit {
    /// `halt` popped this value.
    Halted(i64),
    /// Execution ran off the end of the buffer.
    Completed,
}

impl Exit {
    /// Run result; a completed run yields 0.
    pub fn value(self) -> i64 {
        match self {
            Self::Halted(value) => value,
            Self::Completed => 0,
        }
    }

    /// Result truncated to a process exit code.
    pub fn exit_code(self) -> i32 {
        self.value() as i32
    }
}

/// Where the instruction pointer goes after an instruction.
enum Flow {
    Next,
    Jump(usize),
    Halt(i64),
}

/// Virtual machine state for one program.
///
/// State is reset at the start of every run, so a VM can execute its program
/// repeatedly. Output accumulates in the sink across runs.
pub struct VM<'p, W> {
    program: &'p Program,
    labels: LabelTable,
    ip: usize,
    stack: OperandStack,
    calls: CallStack,
    registers: RegisterFile,
    output: W,
    steps: u64,
}

/// Builder for VM instances.
pub struct VMBuilder<'p, W> {
    program: &'p Program,
    output: W,
}

impl<'p, W: Write> VMBuilder<'p, W> {
    /// Set the sink for `putn`, `putc` and `dbg` output.
    pub fn output<O: Write>(self, output: O) -> VMBuilder<'p, O> {
        VMBuilder {
            program: self.program,
            output,
        }
    }

    /// Build the VM.
    pub fn build(self) -> VM<'p, W> {
        VM {
            program: self.program,
            labels: LabelTable::empty(),
            ip: 0,
            stack: OperandStack::new(),
            calls: CallStack::new(),
            registers: RegisterFile::new(),
            output: self.output,
            steps: 0,
        }
    }
}

impl<'p> VM<'p, io::Sink> {
    /// Create a VM builder. Output is discarded unless a sink is set.
    pub fn builder(program: &'p Program) -> VMBuilder<'p, io::Sink> {
        VMBuilder {
            program,
            output: io::sink(),
        }
    }
}

impl<'p, W: Write> VM<'p, W> {
    /// Execute the program from offset 0.
    ///
    /// Uses `NoopTracer`, which compiles away entirely.
    pub fn execute(&mut self) -> Result<Exit, RuntimeError> {
        self.execute_with(&mut NoopTracer)
    }

    /// Execute the program with a tracer for debugging.
    ///
    /// Output is flushed before returning on every path. A flush failure is
    /// reported only when the run itself succeeded.
    pub fn execute_with<T: Tracer>(&mut self, tracer: &mut T) -> Result<Exit, RuntimeError> {
        let result = self.run(tracer);
        let flushed = self.output.flush();
        let exit = result?;
        flushed?;
        Ok(exit)
    }

    fn run<T: Tracer>(&mut self, tracer: &mut T) -> Result<Exit, RuntimeError> {
        self.reset();
        self.labels = LabelTable::resolve(self.program)?;
        debug!(
            bytes = self.program.len(),
            labels = self.labels.len(),
            "execution started"
        );

        while self.ip < self.program.len() {
            let instr = self.program.decode_at(self.ip)?;
            tracer.trace_instruction(self.ip, &instr);
            self.steps += 1;

            match self.exec(instr, tracer)? {
                Flow::Next => self.ip += instr.size(),
                Flow::Jump(target) => self.ip = target,
                Flow::Halt(value) => {
                    tracer.trace_halt(value);
                    debug!(steps = self.steps, value, "halted");
                    return Ok(Exit::Halted(value));
                }
            }
            tracer.trace_state(self.stack.as_slice(), self.registers.as_slice());
        }

        tracer.trace_end();
        debug!(steps = self.steps, "end of program reached");
        Ok(Exit::Completed)
    }

    fn reset(&mut self) {
        self.ip = 0;
        self.stack.clear();
        self.calls.clear();
        self.registers.clear();
        self.steps = 0;
    }

    fn exec<T: Tracer>(
        &mut self,
        instr: Instruction,
        tracer: &mut T,
    ) -> Result<Flow, RuntimeError> {
        match instr {
            Instruction::Halt => return Ok(Flow::Halt(self.pop()?)),
            Instruction::Debug => writeln!(
                self.output,
                "ip={}, sp={}, csp={}",
                self.ip,
                self.stack.depth(),
                self.calls.depth()
            )?,
            Instruction::MoveLiteral { reg, value } => *self.register_mut(reg)? = value,
            Instruction::MoveRegister { dst, src } => {
                let value = self.register(src)?;
                *self.register_mut(dst)? = value;
            }
            Instruction::Push(value) => self.push(value)?,
            Instruction::Dup => {
                let top = self.stack.peek().map_err(|f| self.operand_fault(f))?;
                self.push(top)?;
            }
            Instruction::Drop => {
                self.pop()?;
            }
            Instruction::Swap => {
                let a = self.pop()?;
                let b = self.pop()?;
                self.push(a)?;
                self.push(b)?;
            }
            Instruction::Load(reg) => {
                let value = self.register(reg)?;
                self.push(value)?;
            }
            Instruction::Store(reg) => {
                let value = self.pop()?;
                *self.register_mut(reg)? = value;
            }
            Instruction::Add => self.arith(|a, b| Some(a.wrapping_add(b)))?,
            Instruction::Sub => self.arith(|a, b| Some(a.wrapping_sub(b)))?,
            Instruction::Mul => self.arith(|a, b| Some(a.wrapping_mul(b)))?,
            Instruction::Div => self.arith(|a, b| (b != 0).then(|| a.wrapping_div(b)))?,
            Instruction::Mod => self.arith(|a, b| (b != 0).then(|| a.wrapping_rem(b)))?,
            Instruction::Label(_) => {}
            Instruction::Call(id) => return self.exec_call(id, instr.size(), tracer),
            Instruction::Jump(id) => return self.jump(id, tracer),
            Instruction::JumpIfZero(id) => return self.branch(id, |v| v == 0, tracer),
            Instruction::JumpIfNonZero(id) => return self.branch(id, |v| v != 0, tracer),
            Instruction::JumpIfPositive(id) => return self.branch(id, |v| v > 0, tracer),
            Instruction::JumpIfNegative(id) => return self.branch(id, |v| v < 0, tracer),
            Instruction::Return => return self.exec_return(tracer),
            Instruction::PrintNumber => {
                let value = self.pop()?;
                writeln!(self.output, "{value}")?;
            }
            Instruction::PrintChar => {
                let value = self.pop()?;
                self.output.write_all(&[value as u8])?;
            }
        }
        Ok(Flow::Next)
    }

    /// Pop `a` (top) then `b`, push `op(a, b)`. `None` means division by zero.
    fn arith(&mut self, op: impl FnOnce(i64, i64) -> Option<i64>) -> Result<(), RuntimeError> {
        let a = self.pop()?;
        let b = self.pop()?;
        let value = op(a, b).ok_or(RuntimeError::DivisionByZero { offset: self.ip })?;
        self.push(value)
    }

    fn exec_call<T: Tracer>(
        &mut self,
        id: LabelId,
        size: usize,
        tracer: &mut T,
    ) -> Result<Flow, RuntimeError> {
        let target = self.target(id)?;
        let return_addr = self.ip + size;
        self.calls
            .push(return_addr)
            .map_err(|_| RuntimeError::CallStackOverflow { offset: self.ip })?;

        trace!(
            label = id.get(),
            target,
            return_addr,
            depth = self.calls.depth(),
            "call"
        );
        tracer.trace_call(target, return_addr);
        Ok(Flow::Jump(target))
    }

    fn exec_return<T: Tracer>(&mut self, tracer: &mut T) -> Result<Flow, RuntimeError> {
        let return_addr = self
            .calls
            .pop()
            .map_err(|_| RuntimeError::CallStackUnderflow { offset: self.ip })?;

        trace!(return_addr, depth = self.calls.depth(), "return");
        tracer.trace_return(return_addr);
        Ok(Flow::Jump(return_addr))
    }

    fn jump<T: Tracer>(&mut self, id: LabelId, tracer: &mut T) -> Result<Flow, RuntimeError> {
        let target = self.target(id)?;
        tracer.trace_jump(target);
        Ok(Flow::Jump(target))
    }

    /// Conditional jump: the label is only looked up when the branch is taken.
    fn branch<T: Tracer>(
        &mut self,
        id: LabelId,
        taken: impl FnOnce(i64) -> bool,
        tracer: &mut T,
    ) -> Result<Flow, RuntimeError> {
        if taken(self.pop()?) {
            self.jump(id, tracer)
        } else {
            Ok(Flow::Next)
        }
    }

    fn target(&self, id: LabelId) -> Result<usize, RuntimeError> {
        self.labels.get(id).ok_or(RuntimeError::UndefinedLabel {
            label: id.get(),
            offset: self.ip,
        })
    }

    #[inline]
    fn push(&mut self, value: i64) -> Result<(), RuntimeError> {
        self.stack.push(value).map_err(|f| self.operand_fault(f))
    }

    #[inline]
    fn pop(&mut self) -> Result<i64, RuntimeError> {
        self.stack.pop().map_err(|f| self.operand_fault(f))
    }

    fn operand_fault(&self, fault: StackFault) -> RuntimeError {
        match fault {
            StackFault::Overflow => RuntimeError::StackOverflow { offset: self.ip },
            StackFault::Underflow => RuntimeError::StackUnderflow { offset: self.ip },
        }
    }

    fn register(&self, index: u8) -> Result<i64, RuntimeError> {
        self.registers.get(index).ok_or(RuntimeError::InvalidRegister {
            index,
            offset: self.ip,
        })
    }

    fn register_mut(&mut self, index: u8) -> Result<&mut i64, RuntimeError> {
        let offset = self.ip;
        self.registers
            .get_mut(index)
            .ok_or(RuntimeError::InvalidRegister { index, offset })
    }

    /// Live operand stack, bottom first.
    pub fn stack(&self) -> &[i64] {
        self.stack.as_slice()
    }

    pub fn call_depth(&self) -> usize {
        self.calls.depth()
    }

    pub fn registers(&self) -> &[i64] {
        self.registers.as_slice()
    }

    /// Offset of the current instruction; after a fault, the faulting one.
    pub fn ip(&self) -> usize {
        self.ip
    }

    /// Instructions dispatched in the last run.
    pub fn steps(&self) -> u64 {
        self.steps
    }

    pub fn output(&self) -> &W {
        &self.output
    }

    pub fn into_output(self) -> W {
        self.output
    }
}
