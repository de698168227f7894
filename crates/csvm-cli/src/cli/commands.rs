//! Command builder for the CLI.

use clap::Command;

use super::args::*;

/// Build the complete CLI.
pub fn build_cli() -> Command {
    Command::new("csvm")
        .about("Run csvm bytecode programs")
        .version(env!("CARGO_PKG_VERSION"))
        .override_usage(
            "\
  csvm <PROGRAM>
  csvm --dump <PROGRAM>
  csvm --trace [-v|-vv] <PROGRAM>",
        )
        .after_help(
            r#"EXIT STATUS:
  The value popped by `halt`, truncated to an exit code; 0 when the program
  runs off its end; 1 on any error.

ENVIRONMENT:
  CSVM_LOG    log filter directives, e.g. CSVM_LOG=debug (default: warn)

EXAMPLES:
  csvm prog.bin                # run, program output on stdout
  csvm --dump prog.bin         # disassembly listing
  csvm --trace -v prog.bin     # run with trace and stack snapshots"#,
        )
        .arg(program_path_arg())
        .arg(dump_arg())
        .arg(trace_arg())
        .arg(verbose_arg())
        .arg(color_arg())
}
