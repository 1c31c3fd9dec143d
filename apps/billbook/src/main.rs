//! # Billbook Entry Point
//!
//! Parses arguments, sets up logging, runs the command and turns a
//! [`billbook::error::CliError`] into a message on stderr and an exit code.

use std::process::ExitCode;

use clap::Parser;

use billbook::cli::Cli;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    billbook::init_tracing(cli.verbose);

    match billbook::run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {}", err);
            ExitCode::from(u8::try_from(err.exit_code()).unwrap_or(1))
        }
    }
}
