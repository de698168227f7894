use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use csvm_bytecode::Program;
use tracing::debug;

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("failed to read '{}': {source}", path.display())]
    File { path: PathBuf, source: io::Error },

    #[error("failed to read stdin: {0}")]
    Stdin(#[source] io::Error),
}

/// Read the whole program into memory. `-` reads stdin.
pub fn load_program(path: &Path) -> Result<Program, LoadError> {
    let bytes = if path.as_os_str() == "-" {
        load_stdin()?
    } else {
        fs::read(path).map_err(|source| LoadError::File {
            path: path.to_path_buf(),
            source,
        })?
    };

    debug!(path = %path.display(), bytes = bytes.len(), "program loaded");
    Ok(Program::from(bytes))
}

fn load_stdin() -> Result<Vec<u8>, LoadError> {
    let mut buf = Vec::new();
    io::stdin()
        .read_to_end(&mut buf)
        .map_err(LoadError::Stdin)?;
    Ok(buf)
}

/// Load or exit with a diagnostic; shared by every command.
pub fn load_or_exit(path: &Path) -> Program {
    match load_program(path) {
        Ok(program) => program,
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(1);
        }
    }
}
