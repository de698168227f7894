//! Runtime VM for executing csvm bytecode.
//!
//! This crate provides the fetch-decode-execute engine together with its
//! bounded operand and call stacks, the register file, and execution tracing.

pub mod engine;

// Re-export commonly used items at crate root
pub use engine::{
    BoundedStack, CALL_STACK_CAPACITY, CallStack, Exit, NoopTracer, OPERAND_STACK_CAPACITY,
    OperandStack, PrintTracer, PrintTracerBuilder, RegisterFile, RuntimeError, StackFault, Tracer,
    VM, VMBuilder, Verbosity,
};
