//! Run a program with output on stdout.

use std::io::{self, BufWriter};
use std::path::PathBuf;

use csvm_vm::VM;

use super::program_loader::load_or_exit;

pub struct RunArgs {
    pub program_path: PathBuf,
}

pub fn run(args: RunArgs) {
    let program = load_or_exit(&args.program_path);

    let stdout = BufWriter::new(io::stdout().lock());
    let mut vm = VM::builder(&program).output(stdout).build();

    // The VM flushes its output before returning, so exiting directly loses
    // nothing.
    match vm.execute() {
        Ok(exit) => std::process::exit(exit.exit_code()),
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(1);
        }
    }
}
