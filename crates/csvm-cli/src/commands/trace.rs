//! Trace program execution for debugging.

use std::io::{self, BufWriter, LineWriter};
use std::path::PathBuf;

use csvm_vm::{PrintTracer, VM, Verbosity};

use super::program_loader::load_or_exit;

pub struct TraceArgs {
    pub program_path: PathBuf,
    pub verbosity: Verbosity,
    pub color: bool,
}

pub fn run(args: TraceArgs) {
    let program = load_or_exit(&args.program_path);

    let stdout = BufWriter::new(io::stdout().lock());
    let mut vm = VM::builder(&program).output(stdout).build();
    let mut tracer = PrintTracer::builder()
        .verbosity(args.verbosity)
        .colored(args.color)
        .writer(LineWriter::new(io::stderr().lock()))
        .build();

    let result = vm.execute_with(&mut tracer);
    if let Err(e) = tracer.finish() {
        eprintln!("error: trace output: {}", e);
        std::process::exit(1);
    }

    match result {
        Ok(exit) => std::process::exit(exit.exit_code()),
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(1);
        }
    }
}
