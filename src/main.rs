//! imagededup - Near-Duplicate Image Finder
//!
//! Entry point for the imagededup CLI application.

use clap::Parser;
use imagededup::{cli::Cli, error::ExitCode, logging};

fn main() {
    let cli = Cli::parse();

    logging::init_logging(cli.verbose, cli.quiet);

    match imagededup::run_app(cli) {
        Ok(code) => std::process::exit(code.as_i32()),
        Err(err) => {
            eprintln!("Error: {err:#}");
            std::process::exit(ExitCode::GeneralError.as_i32());
        }
    }
}
