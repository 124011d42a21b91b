//! Delivery Cost CLI

use std::{io, process::ExitCode};

use clap::Parser;

mod cli;
mod logging;

#[expect(clippy::print_stderr, reason = "CLI error reporting")]
fn main() -> ExitCode {
    let cli = cli::Cli::parse();

    if let Err(error) = logging::init_subscriber(&cli.logging) {
        eprintln!("{error}");

        return ExitCode::FAILURE;
    }

    match cli.run(io::stdout().lock()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("Error: {error}");

            ExitCode::FAILURE
        }
    }
}
