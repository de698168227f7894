//! Execution engine for csvm programs.
//!
//! Labels are resolved once per run, then the VM decodes and dispatches one
//! instruction at a time until `halt`, the end of the buffer, or a fatal error.

mod error;
mod registers;
mod stack;
mod trace;
mod vm;

#[cfg(test)]
mod stack_tests;
#[cfg(test)]
mod trace_tests;

pub use error::RuntimeError;
pub use registers::RegisterFile;
pub use stack::{
    BoundedStack, CALL_STACK_CAPACITY, CallStack, OPERAND_STACK_CAPACITY, OperandStack,
    StackFault,
};
pub use trace::{NoopTracer, PrintTracer, PrintTracerBuilder, Tracer, Verbosity};
pub use vm::{Exit, VM, VMBuilder};
