pub mod dump;
pub mod program_loader;
pub mod run;
pub mod trace;

#[cfg(test)]
mod dump_tests;
