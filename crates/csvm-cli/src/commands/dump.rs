use std::io::{self, Write};
use std::path::PathBuf;

use csvm_bytecode::{Colors, dump};

use super::program_loader::load_or_exit;

pub struct DumpArgs {
    pub program_path: PathBuf,
    pub color: bool,
}

pub fn run(args: DumpArgs) {
    let program = load_or_exit(&args.program_path);
    let listing = dump(&program, Colors::new(args.color));

    let written = write_listing(&mut io::stdout().lock(), &listing);
    if let Err(e) = ignore_broken_pipe(written) {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}

pub(crate) fn write_listing(out: &mut impl Write, listing: &str) -> io::Result<()> {
    out.write_all(listing.as_bytes())?;
    out.flush()
}

/// A reader closing the pipe early (`csvm --dump prog | head`) is not a failure.
pub(crate) fn ignore_broken_pipe(result: io::Result<()>) -> io::Result<()> {
    match result {
        Err(e) if e.kind() == io::ErrorKind::BrokenPipe => Ok(()),
        other => other,
    }
}
