//! Dispatch logic: extract params from ArgMatches and convert to command args.
//!
//! `--dump` and `--trace` select the command; plain invocation runs the
//! program. Each `*Params` pulls only the fields its command uses.

use std::path::PathBuf;

use clap::ArgMatches;
use csvm_vm::Verbosity;

use super::ColorChoice;
use crate::commands::dump::DumpArgs;
use crate::commands::run::RunArgs;
use crate::commands::trace::TraceArgs;

pub struct RunParams {
    pub program_path: PathBuf,
}

impl RunParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            program_path: program_path(m),
        }
    }
}

impl From<RunParams> for RunArgs {
    fn from(p: RunParams) -> Self {
        Self {
            program_path: p.program_path,
        }
    }
}

pub struct DumpParams {
    pub program_path: PathBuf,
    pub color: ColorChoice,
}

impl DumpParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            program_path: program_path(m),
            color: color_choice(m),
        }
    }
}

impl From<DumpParams> for DumpArgs {
    fn from(p: DumpParams) -> Self {
        Self {
            program_path: p.program_path,
            color: p.color.should_colorize(),
        }
    }
}

pub struct TraceParams {
    pub program_path: PathBuf,
    pub verbose: u8,
    pub color: ColorChoice,
}

impl TraceParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            program_path: program_path(m),
            verbose: m.get_count("verbose"),
            color: color_choice(m),
        }
    }
}

impl From<TraceParams> for TraceArgs {
    fn from(p: TraceParams) -> Self {
        let verbosity = match p.verbose {
            0 => Verbosity::Default,
            1 => Verbosity::Verbose,
            _ => Verbosity::VeryVerbose,
        };

        Self {
            program_path: p.program_path,
            verbosity,
            color: p.color.should_colorize(),
        }
    }
}

/// Color mode from `--color`, shared with logging setup.
pub fn color_choice(m: &ArgMatches) -> ColorChoice {
    match m.get_one::<String>("color").map(|s| s.as_str()) {
        Some("always") => ColorChoice::Always,
        Some("never") => ColorChoice::Never,
        _ => ColorChoice::Auto,
    }
}

fn program_path(m: &ArgMatches) -> PathBuf {
    // Required by the command definition; clap rejects a missing positional.
    m.get_one::<PathBuf>("program_path")
        .cloned()
        .unwrap_or_default()
}
