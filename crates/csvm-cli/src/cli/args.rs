//! Argument builders for the CLI.

use std::path::PathBuf;

use clap::{Arg, ArgAction, value_parser};

/// Program file (positional, `-` for stdin).
pub fn program_path_arg() -> Arg {
    Arg::new("program_path")
        .value_name("PROGRAM")
        .required(true)
        .value_parser(value_parser!(PathBuf))
        .help("Bytecode file to execute (- for stdin)")
}

/// Print a listing instead of running (--dump).
pub fn dump_arg() -> Arg {
    Arg::new("dump")
        .long("dump")
        .action(ArgAction::SetTrue)
        .conflicts_with("trace")
        .help("Print a disassembly listing instead of running")
}

/// Trace execution to stderr (--trace).
pub fn trace_arg() -> Arg {
    Arg::new("trace")
        .long("trace")
        .action(ArgAction::SetTrue)
        .help("Print an execution trace to stderr")
}

/// Trace verbosity (-v, -vv).
pub fn verbose_arg() -> Arg {
    Arg::new("verbose")
        .short('v')
        .action(ArgAction::Count)
        .requires("trace")
        .help("Trace verbosity (-v adds the stack, -vv adds registers)")
}

/// Color output control (--color).
pub fn color_arg() -> Arg {
    Arg::new("color")
        .long("color")
        .value_name("WHEN")
        .default_value("auto")
        .value_parser(["auto", "always", "never"])
        .help("Colorize listings, traces and logs")
}
