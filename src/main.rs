//! nsprep: render a branch-specific deployment config from a template.
//!
//! This is the main entry point for the `nsprep` CLI. It parses arguments,
//! dispatches to the command handler, and maps errors to exit codes so a
//! calling build stops on failure.

mod cli;
mod commands;
pub mod config;
pub mod context;
pub mod error;
pub mod exit_codes;
pub mod fs;
pub mod git;
pub mod namespace;
pub mod render;
pub mod template;

#[cfg(test)]
mod test_support;

use cli::Cli;
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = match Cli::try_parse_args() {
        Ok(cli) => cli,
        Err(err) => {
            let _ = err.print();
            return ExitCode::from(exit_codes::for_parse_error(&err) as u8);
        }
    };

    match commands::dispatch(cli) {
        Ok(()) => ExitCode::from(exit_codes::SUCCESS as u8),
        Err(err) => {
            eprintln!("Error: {}", err);
            ExitCode::from(err.exit_code() as u8)
        }
    }
}
