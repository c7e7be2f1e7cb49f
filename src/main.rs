//! kernel-sweep: purge obsolete kernel packages on Debian-family systems.
//!
//! This is the main entry point for the `kernel-sweep` CLI. It parses
//! arguments, runs the cleanup, and maps errors to exit codes.

mod cleanup;
mod cli;
mod config;
mod error;
mod events;
mod exit_codes;
mod host;
mod kernel;
mod logging;

#[cfg(test)]
mod test_support;

use clap::Parser;
use cli::Cli;
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            // Help and version go to stdout and succeed; usage errors go to stderr.
            let _ = err.print();
            let code = if err.use_stderr() {
                exit_codes::USAGE_ERROR
            } else {
                exit_codes::SUCCESS
            };
            return ExitCode::from(code as u8);
        }
    };

    logging::init();

    match cleanup::cmd_cleanup(cli) {
        Ok(()) => ExitCode::from(exit_codes::SUCCESS as u8),
        Err(err) => {
            // Print user-actionable error message to stderr
            eprintln!("Error: {}", err);

            ExitCode::from(err.exit_code() as u8)
        }
    }
}
